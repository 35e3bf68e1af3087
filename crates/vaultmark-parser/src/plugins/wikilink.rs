//! Internal link and embed plugin for markdown-it
//!
//! Supports Obsidian-style wikilinks:
//! - `[[Some File]]`
//! - `[[Some File#heading]]`
//! - `[[Some File#^blockid]]`
//! - `[[Some File|display text]]`
//! - `![[moon.jpg]]` (embed)
//!
//! An embed is never matched standalone: the embed rule re-runs the
//! internal-link matcher one byte past the `!` and wraps the result.

use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

use crate::matcher::{self, InternalLinkParts};

/// An internal link: `[[path#subpath|display]]`.
#[derive(Debug, Clone)]
pub struct InternalLink {
    pub path: String,
    /// Subpath without its leading `#`; a `^` prefix denotes a block anchor
    /// but is kept as plain text.
    pub subpath: Option<String>,
    pub display: Option<String>,
}

impl InternalLink {
    /// Text a renderer should show for this link.
    pub fn display_text(&self) -> &str {
        match &self.display {
            Some(d) if !d.is_empty() => d,
            _ => &self.path,
        }
    }

    /// Link target as written, path plus optional `#subpath`.
    pub fn target(&self) -> String {
        match &self.subpath {
            Some(sub) => format!("{}#{}", self.path, sub),
            None => self.path.clone(),
        }
    }
}

impl NodeValue for InternalLink {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.open(
            "a",
            &[
                ("class", "internal-link".to_string()),
                ("href", self.target()),
            ],
        );
        fmt.text(self.display_text());
        fmt.close("a");
    }
}

/// A structural token of an internal link: `[[`, `|` or `]]`.
#[derive(Debug, Clone)]
pub struct InternalMark {
    pub mark: &'static str,
}

impl NodeValue for InternalMark {
    fn render(&self, _node: &Node, _fmt: &mut dyn Renderer) {}
}

/// The link path.
#[derive(Debug, Clone)]
pub struct InternalPath {
    pub path: String,
}

impl NodeValue for InternalPath {
    fn render(&self, _node: &Node, _fmt: &mut dyn Renderer) {}
}

/// The subpath, spanning from its `#` to the next delimiter.
#[derive(Debug, Clone)]
pub struct InternalSubpath {
    pub subpath: String,
}

impl NodeValue for InternalSubpath {
    fn render(&self, _node: &Node, _fmt: &mut dyn Renderer) {}
}

/// The display text after `|`.
#[derive(Debug, Clone)]
pub struct InternalDisplay {
    pub display: String,
}

impl NodeValue for InternalDisplay {
    fn render(&self, _node: &Node, _fmt: &mut dyn Renderer) {}
}

/// An embedded internal link: `!` + `[[...]]`.
#[derive(Debug, Clone)]
pub struct Embed;

impl NodeValue for Embed {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("span", &[("class", "embed".to_string())]);
        fmt.contents(&node.children);
        fmt.close("span");
    }
}

/// The `!` introducing an embed.
#[derive(Debug, Clone)]
pub struct EmbedMark;

impl NodeValue for EmbedMark {
    fn render(&self, _node: &Node, _fmt: &mut dyn Renderer) {}
}

/// Build an `InternalLink` node from matched parts. `base` is the absolute
/// position of the opening `[[` in the inline buffer and `input` the slice
/// starting there.
fn build_link_node(
    state: &InlineState,
    base: usize,
    input: &str,
    parts: &InternalLinkParts,
) -> Node {
    let path = input[parts.path.clone()].to_string();
    let subpath = parts
        .subpath
        .clone()
        .map(|r| input[r.start + 1..r.end].to_string());
    let display = parts
        .display
        .clone()
        .filter(|r| !r.is_empty())
        .map(|r| input[r.clone()].to_string());

    let mut node = Node::new(InternalLink {
        path: path.clone(),
        subpath: subpath.clone(),
        display: display.clone(),
    });
    node.srcmap = state.get_map(base, base + parts.len);

    let mut open = Node::new(InternalMark { mark: "[[" });
    open.srcmap = state.get_map(base, base + 2);
    node.children.push(open);

    if !parts.path.is_empty() {
        let mut path_node = Node::new(InternalPath { path });
        path_node.srcmap = state.get_map(base + parts.path.start, base + parts.path.end);
        node.children.push(path_node);
    }

    if let Some(range) = &parts.subpath {
        let mut sub_node = Node::new(InternalSubpath {
            subpath: subpath.unwrap_or_default(),
        });
        sub_node.srcmap = state.get_map(base + range.start, base + range.end);
        node.children.push(sub_node);
    }

    if let Some(pipe) = parts.pipe {
        let mut pipe_node = Node::new(InternalMark { mark: "|" });
        pipe_node.srcmap = state.get_map(base + pipe, base + pipe + 1);
        node.children.push(pipe_node);

        if let Some(range) = parts.display.clone().filter(|r| !r.is_empty()) {
            let mut display_node = Node::new(InternalDisplay {
                display: display.unwrap_or_default(),
            });
            display_node.srcmap = state.get_map(base + range.start, base + range.end);
            node.children.push(display_node);
        }
    }

    let mut close = Node::new(InternalMark { mark: "]]" });
    close.srcmap = state.get_map(base + parts.len - 2, base + parts.len);
    node.children.push(close);

    node
}

/// Scanner for internal link syntax. Registered ahead of the standard link
/// rule so `[[` is never consumed as a bracketed link label.
pub struct InternalLinkScanner;

impl InlineRule for InternalLinkScanner {
    const MARKER: char = '[';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..state.pos_max];
        let parts = matcher::internal_link(input)?;
        let node = build_link_node(state, state.pos, input, &parts);
        Some((node, parts.len))
    }
}

/// Scanner for embed syntax: `!` immediately followed by an internal link,
/// with zero characters between.
pub struct EmbedScanner;

impl InlineRule for EmbedScanner {
    const MARKER: char = '!';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..state.pos_max];
        let rest = input.strip_prefix('!')?;
        let parts = matcher::internal_link(rest)?;
        let link = build_link_node(state, state.pos + 1, rest, &parts);

        let mut mark = Node::new(EmbedMark);
        mark.srcmap = state.get_map(state.pos, state.pos + 1);

        let mut node = Node::new(Embed);
        node.srcmap = state.get_map(state.pos, state.pos + 1 + parts.len);
        node.children.push(mark);
        node.children.push(link);

        Some((node, parts.len + 1))
    }
}

/// Add the internal link and embed rules to a markdown-it parser.
pub fn add_wikilink_plugin(md: &mut MarkdownIt) {
    md.inline.add_rule::<InternalLinkScanner>().before_all();
    md.inline.add_rule::<EmbedScanner>().before_all();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_parser() -> MarkdownIt {
        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        add_wikilink_plugin(&mut md);
        md
    }

    fn collect_links(ast: &Node) -> Vec<InternalLink> {
        let mut links = Vec::new();
        ast.walk(|node, _| {
            if let Some(link) = node.cast::<InternalLink>() {
                links.push(link.clone());
            }
        });
        links
    }

    #[test]
    fn bare_link() {
        let md = setup_parser();
        let ast = md.parse("before [[Some File]] after");
        let links = collect_links(&ast);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].path, "Some File");
        assert_eq!(links[0].subpath, None);
        assert_eq!(links[0].display, None);
    }

    #[test]
    fn heading_link() {
        let md = setup_parser();
        let links = collect_links(&md.parse("[[Some File#heading]]"));
        assert_eq!(links[0].subpath.as_deref(), Some("heading"));
    }

    #[test]
    fn block_anchor_link() {
        let md = setup_parser();
        let links = collect_links(&md.parse("[[Some File#^blockid]]"));
        assert_eq!(links[0].subpath.as_deref(), Some("^blockid"));
    }

    #[test]
    fn display_text() {
        let md = setup_parser();
        let links = collect_links(&md.parse("[[Some File|something else]]"));
        assert_eq!(links[0].display.as_deref(), Some("something else"));
        assert_eq!(links[0].display_text(), "something else");
    }

    #[test]
    fn heading_and_display_text() {
        let md = setup_parser();
        let links = collect_links(&md.parse("[[Some File#heading|something else]]"));
        assert_eq!(links[0].path, "Some File");
        assert_eq!(links[0].subpath.as_deref(), Some("heading"));
        assert_eq!(links[0].display.as_deref(), Some("something else"));
    }

    #[test]
    fn embed_wraps_link() {
        let md = setup_parser();
        let ast = md.parse("![[moon.jpg]]");
        let mut embeds = 0;
        ast.walk(|node, _| {
            if node.is::<Embed>() {
                assert!(node.children[0].is::<EmbedMark>());
                assert!(node.children[1].is::<InternalLink>());
                embeds += 1;
            }
        });
        assert_eq!(embeds, 1);
    }

    #[test]
    fn embed_requires_adjacent_link() {
        let md = setup_parser();
        let ast = md.parse("! [[gap]]");
        let mut embeds = 0;
        ast.walk(|node, _| {
            if node.is::<Embed>() {
                embeds += 1;
            }
        });
        assert_eq!(embeds, 0);
        assert_eq!(collect_links(&ast).len(), 1);
    }

    #[test]
    fn unterminated_link_degrades_to_text() {
        let md = setup_parser();
        let ast = md.parse("open [[Some File and nothing");
        assert!(collect_links(&ast).is_empty());
        let html = ast.render();
        assert!(html.contains("[[Some File and nothing"));
    }

    #[test]
    fn regular_markdown_links_still_work() {
        let md = setup_parser();
        let html = md.parse("Regular [link](http://example.com) works.").render();
        assert!(html.contains("href=\"http://example.com\""));
    }

    #[test]
    fn marks_cover_the_delimiters() {
        let md = setup_parser();
        let src = "[[a#b|c]]";
        let ast = md.parse(src);
        let mut marks = Vec::new();
        ast.walk(|node, _| {
            if let Some(mark) = node.cast::<InternalMark>() {
                marks.push(mark.mark);
            }
        });
        assert_eq!(marks, vec!["[[", "|", "]]"]);
    }
}
