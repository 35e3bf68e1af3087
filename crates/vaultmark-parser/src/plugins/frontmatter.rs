//! YAML front matter plugin for markdown-it
//!
//! Front matter is valid only when every positional constraint holds:
//! the opening fence is the first block of the whole document (not even
//! blank lines may precede it), both fences are exactly `---` at column 0
//! with nothing else on their lines, and the close fence exists. When any
//! constraint fails the rule declines and the `---` lines fall back to
//! their default readings (thematic break, setext underline, plain text).
//!
//! The body is opaque: one child span per source line, never parsed.

use markdown_it::common::sourcemap::SourcePos;
use markdown_it::parser::block::{BlockRule, BlockState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

use crate::matcher;

/// The front matter block.
#[derive(Debug, Clone)]
pub struct YamlFrontMatter;

impl NodeValue for YamlFrontMatter {
    fn render(&self, _node: &Node, _fmt: &mut dyn Renderer) {
        // metadata only, nothing to show
    }
}

/// A fence line (`---`).
#[derive(Debug, Clone)]
pub struct YamlMarker;

impl NodeValue for YamlMarker {
    fn render(&self, _node: &Node, _fmt: &mut dyn Renderer) {}
}

/// One opaque body line.
#[derive(Debug, Clone)]
pub struct YamlContent {
    pub content: String,
}

impl NodeValue for YamlContent {
    fn render(&self, _node: &Node, _fmt: &mut dyn Renderer) {}
}

/// Raw text of `line` from its true start, indentation included.
fn raw_line<'a>(state: &'a BlockState, line: usize) -> &'a str {
    let offsets = &state.line_offsets[line];
    &state.src[offsets.line_start..offsets.line_end]
}

/// Scanner for the document-initial front matter block.
pub struct FrontMatterScanner;

impl BlockRule for FrontMatterScanner {
    fn check(_state: &mut BlockState) -> Option<()> {
        // only ever valid before any other block exists
        None
    }

    fn run(state: &mut BlockState) -> Option<(Node, usize)> {
        // first block of the document, at the very first line, at column 0
        if state.line != 0 || state.blk_indent != 0 {
            return None;
        }
        if !matcher::frontmatter_fence(raw_line(state, 0)) {
            return None;
        }

        let mut close_line = None;
        for line in 1..state.line_max {
            if matcher::frontmatter_fence(raw_line(state, line)) {
                close_line = Some(line);
                break;
            }
        }
        let close_line = close_line?;

        let mut node = Node::new(YamlFrontMatter);
        node.srcmap = state.get_map(0, close_line);

        let mut open = Node::new(YamlMarker);
        open.srcmap = line_map(state, 0);
        node.children.push(open);

        for line in 1..close_line {
            let mut content = Node::new(YamlContent {
                content: raw_line(state, line).to_string(),
            });
            content.srcmap = line_map(state, line);
            node.children.push(content);
        }

        let mut close = Node::new(YamlMarker);
        close.srcmap = line_map(state, close_line);
        node.children.push(close);

        Some((node, close_line + 1))
    }
}

fn line_map(state: &BlockState, line: usize) -> Option<SourcePos> {
    let offsets = &state.line_offsets[line];
    Some(SourcePos::new(offsets.line_start, offsets.line_end))
}

/// Add the front matter rule to a markdown-it parser, ahead of the built-in
/// rules so the opening fence is never consumed as a thematic break.
pub fn add_frontmatter_plugin(md: &mut MarkdownIt) {
    md.block.add_rule::<FrontMatterScanner>().before_all();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_parser() -> MarkdownIt {
        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        add_frontmatter_plugin(&mut md);
        md
    }

    fn frontmatter_body(ast: &Node) -> Option<Vec<String>> {
        let mut body = None;
        ast.walk(|node, _| {
            if node.is::<YamlFrontMatter>() {
                body = Some(
                    node.children
                        .iter()
                        .filter_map(|child| child.cast::<YamlContent>())
                        .map(|content| content.content.clone())
                        .collect(),
                );
            }
        });
        body
    }

    #[test]
    fn valid_front_matter() {
        let md = setup_parser();
        let ast = md.parse("---\ntags: blah\n---\n\nsome text");
        assert_eq!(frontmatter_body(&ast), Some(vec!["tags: blah".to_string()]));
        let html = ast.render();
        assert!(html.contains("<p>some text</p>"));
        assert!(!html.contains("tags: blah"));
    }

    #[test]
    fn body_lines_are_opaque() {
        let md = setup_parser();
        let ast = md.parse("---\ntitle: **not bold**\n - not: a list\n---\n");
        assert_eq!(
            frontmatter_body(&ast),
            Some(vec![
                "title: **not bold**".to_string(),
                " - not: a list".to_string()
            ])
        );
        assert!(!ast.render().contains("<strong>"));
    }

    #[test]
    fn missing_close_falls_back() {
        let md = setup_parser();
        let ast = md.parse("---\n\nsome text\n\nA header\n===\n");
        assert_eq!(frontmatter_body(&ast), None);
        let html = ast.render();
        assert!(html.contains("<hr"));
        assert!(html.contains("<h1>A header</h1>"));
    }

    #[test]
    fn indented_close_falls_back() {
        let md = setup_parser();
        let ast = md.parse("---\n\nsome text\n\n ---\n");
        assert_eq!(frontmatter_body(&ast), None);
    }

    #[test]
    fn trailing_space_after_open_falls_back() {
        let md = setup_parser();
        let ast = md.parse("--- \n\nsome text\n\n---\n");
        assert_eq!(frontmatter_body(&ast), None);
    }

    #[test]
    fn content_before_open_falls_back() {
        let md = setup_parser();
        let ast = md.parse("some text\n\n---\n\nsome text\n\n---\n");
        assert_eq!(frontmatter_body(&ast), None);
    }

    #[test]
    fn blank_line_before_open_falls_back() {
        let md = setup_parser();
        let ast = md.parse("\n---\ntags: blah\n---\n");
        assert_eq!(frontmatter_body(&ast), None);
    }

    #[test]
    fn later_fences_keep_their_default_reading() {
        let md = setup_parser();
        let ast = md.parse("---\ntags: blah\n---\n\n---\n\nsome text\n\nA header\n---\n");
        assert!(frontmatter_body(&ast).is_some());
        let html = ast.render();
        assert!(html.contains("<hr"));
        assert!(html.contains("<h2>A header</h2>"));
    }
}
