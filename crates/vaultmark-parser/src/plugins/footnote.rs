//! Inline footnote plugin for markdown-it (`[^label]`)
//!
//! Labels are maximal runs excluding whitespace and square brackets, so
//! `[^1]` and `[^a$wacky^foot-note]` both match. A `[^label]:` sequence at
//! the start of a block's content belongs to the block-level
//! [`FootnoteReference`](crate::plugins::footnote_ref::FootnoteReference)
//! rule instead; the inline rule yields to it by suffix lookahead.

use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

use crate::matcher;

/// An inline footnote: `[^label]`.
#[derive(Debug, Clone)]
pub struct Footnote {
    pub label: String,
}

impl NodeValue for Footnote {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("sup", &[("class", "footnote-reference".to_string())]);
        fmt.text(&format!("[{}]", self.label));
        fmt.close("sup");
    }
}

/// A structural token of a footnote: `[^`, `]` or `]:`.
#[derive(Debug, Clone)]
pub struct FootnoteMark {
    pub mark: &'static str,
}

impl NodeValue for FootnoteMark {
    fn render(&self, _node: &Node, _fmt: &mut dyn Renderer) {}
}

/// The footnote label between the marks.
#[derive(Debug, Clone)]
pub struct FootnoteLabel {
    pub label: String,
}

impl NodeValue for FootnoteLabel {
    fn render(&self, _node: &Node, _fmt: &mut dyn Renderer) {}
}

/// Scanner for inline footnote syntax.
pub struct FootnoteScanner;

impl InlineRule for FootnoteScanner {
    const MARKER: char = '[';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..state.pos_max];
        let parts = matcher::footnote(input)?;

        // A reference head opening this block belongs to the block rule.
        if state.pos == 0 && input[parts.len..].starts_with(':') {
            return None;
        }

        let label = input[parts.label.clone()].to_string();

        let mut open = Node::new(FootnoteMark { mark: "[^" });
        open.srcmap = state.get_map(state.pos, state.pos + 2);

        let mut label_node = Node::new(FootnoteLabel {
            label: label.clone(),
        });
        label_node.srcmap =
            state.get_map(state.pos + parts.label.start, state.pos + parts.label.end);

        let mut close = Node::new(FootnoteMark { mark: "]" });
        close.srcmap = state.get_map(state.pos + parts.len - 1, state.pos + parts.len);

        let mut node = Node::new(Footnote { label });
        node.srcmap = state.get_map(state.pos, state.pos + parts.len);
        node.children.push(open);
        node.children.push(label_node);
        node.children.push(close);

        Some((node, parts.len))
    }
}

/// Add the inline footnote rule to a markdown-it parser.
pub fn add_footnote_plugin(md: &mut MarkdownIt) {
    md.inline.add_rule::<FootnoteScanner>().before_all();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_footnotes(input: &str) -> Vec<String> {
        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        add_footnote_plugin(&mut md);

        let ast = md.parse(input);
        let mut labels = Vec::new();
        ast.walk(|node, _| {
            if let Some(footnote) = node.cast::<Footnote>() {
                labels.push(footnote.label.clone());
            }
        });
        labels
    }

    #[test]
    fn numeric_label() {
        assert_eq!(parse_footnotes("Some info[^1]"), vec!["1"]);
    }

    #[test]
    fn wacky_label() {
        assert_eq!(
            parse_footnotes("Some more info[^a$wacky^foot-note]"),
            vec!["a$wacky^foot-note"]
        );
    }

    #[test]
    fn empty_label_is_plain_text() {
        assert!(parse_footnotes("nothing [^] here").is_empty());
    }

    #[test]
    fn whitespace_breaks_the_label() {
        assert!(parse_footnotes("not [^a label] here").is_empty());
    }

    #[test]
    fn mark_children_split_the_span() {
        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        add_footnote_plugin(&mut md);

        let ast = md.parse("x[^note]y");
        let mut checked = false;
        ast.walk(|node, _| {
            if node.is::<Footnote>() {
                assert_eq!(node.children.len(), 3);
                assert_eq!(node.children[0].cast::<FootnoteMark>().map(|m| m.mark), Some("[^"));
                assert_eq!(
                    node.children[1].cast::<FootnoteLabel>().map(|l| l.label.as_str()),
                    Some("note")
                );
                assert_eq!(node.children[2].cast::<FootnoteMark>().map(|m| m.mark), Some("]"));
                checked = true;
            }
        });
        assert!(checked);
    }
}
