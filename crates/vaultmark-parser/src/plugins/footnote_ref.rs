//! Footnote reference plugin for markdown-it (`[^label]: body`)
//!
//! A reference opens at a line start (up to three spaces of indent, like
//! other block constructs) and owns everything after the colon plus any
//! lazy continuation lines. The body is parsed as inline content. A
//! reference ends at a blank line, at a line that opens a new block, at a
//! new reference head, or — inside a list item — at the first line that
//! de-indents below the item's content column.
//!
//! References do not interrupt paragraphs: a `[^label]: …` line that lazily
//! continues a paragraph stays inline text, so the same occurrence is never
//! both a reference and an inline footnote.

use markdown_it::common::sourcemap::SourcePos;
use markdown_it::parser::block::{BlockRule, BlockState};
use markdown_it::parser::inline::InlineRoot;
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

use super::footnote::{FootnoteLabel, FootnoteMark};
use crate::matcher;

/// A block-level footnote reference: `[^label]: body`.
#[derive(Debug, Clone)]
pub struct FootnoteReference {
    pub label: String,
}

impl NodeValue for FootnoteReference {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        fmt.cr();
        fmt.open(
            "div",
            &[
                ("class", "footnote-definition".to_string()),
                ("data-footnote", self.label.clone()),
            ],
        );
        fmt.contents(&node.children);
        fmt.close("div");
        fmt.cr();
    }
}

/// Scanner for footnote reference blocks.
pub struct FootnoteRefScanner;

impl BlockRule for FootnoteRefScanner {
    fn check(_state: &mut BlockState) -> Option<()> {
        // never interrupts a paragraph
        None
    }

    fn run(state: &mut BlockState) -> Option<(Node, usize)> {
        if state.line_indent(state.line) >= 4 {
            return None;
        }
        let start_line = state.line;
        let head = matcher::footnote_reference_head(state.get_line(start_line))?;
        let label = state.get_line(start_line)[head.label.clone()].to_string();

        let mut next_line = start_line;
        loop {
            next_line += 1;
            if next_line >= state.line_max || state.is_empty(next_line) {
                break;
            }
            // de-indenting below the enclosing item's content column ends the body
            if state.line_indent(next_line) < 0 {
                break;
            }
            // over-indented lines are lazy continuations regardless of content
            if state.line_indent(next_line) >= 4 {
                continue;
            }
            // a new reference head starts its own block
            if matcher::footnote_reference_head(state.get_line(next_line)).is_some() {
                break;
            }
            // quirk for blockquotes, this line should already be checked by that rule
            if state.line_offsets[next_line].indent_nonspace < 0 {
                continue;
            }
            // some blocks can terminate the body without an empty line
            let old_state_line = state.line;
            state.line = next_line;
            let terminate = state.test_rules_at_line();
            state.line = old_state_line;
            if terminate {
                break;
            }
        }

        let head_start = state.line_offsets[start_line].first_nonspace;
        let head_end = head_start + head.len;
        let first_line_end = state.line_offsets[start_line].line_end;
        let first_rest = state.src[head_end..first_line_end].to_string();

        let (content, mapping) = if next_line > start_line + 1 {
            let (rest, rest_map) =
                state.get_lines(start_line + 1, next_line, state.blk_indent, false);
            let mut content = first_rest;
            content.push('\n');
            let shift = content.len();
            content.push_str(&rest);
            let mut mapping = vec![(0, head_end)];
            mapping.extend(rest_map.into_iter().map(|(pos, src)| (pos + shift, src)));
            (content, mapping)
        } else {
            (first_rest, vec![(0, head_end)])
        };

        let mut node = Node::new(FootnoteReference {
            label: label.clone(),
        });
        node.srcmap = state.get_map(start_line, next_line - 1);

        let mut open = Node::new(FootnoteMark { mark: "[^" });
        open.srcmap = Some(SourcePos::new(head_start, head_start + 2));
        node.children.push(open);

        let mut label_node = Node::new(FootnoteLabel { label });
        label_node.srcmap = Some(SourcePos::new(
            head_start + head.label.start,
            head_start + head.label.end,
        ));
        node.children.push(label_node);

        let mut close = Node::new(FootnoteMark { mark: "]:" });
        close.srcmap = Some(SourcePos::new(head_start + head.label.end, head_end));
        node.children.push(close);

        node.children.push(Node::new(InlineRoot::new(content, mapping)));

        Some((node, next_line - start_line))
    }
}

/// Add the footnote reference rule to a markdown-it parser, ahead of the
/// built-in rules so reference heads are never consumed as link reference
/// definitions.
pub fn add_footnote_ref_plugin(md: &mut MarkdownIt) {
    md.block.add_rule::<FootnoteRefScanner>().before_all();
}
