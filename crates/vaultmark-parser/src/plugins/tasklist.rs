//! Task list plugin for markdown-it
//!
//! A task is a list item whose content opens with a bracketed marker and a
//! space: `[ ]`, `[x]`, `[X]`, `[a]`, `[[]`, `[]]`, `[\]]` are all valid and
//! distinct. The marker text is stored verbatim; deciding what counts as
//! "checked" is left to consumers (the HTML renderer treats `x`/`X` as
//! checked, anything else as unchecked).
//!
//! Recognition runs as a core pass after block and inline parsing, as a
//! reclassification of finished list item content. By then the host has
//! already committed every setext heading, so an item like `1. [X] foo`
//! followed by `===` is a heading and never becomes a task — the
//! provisional task reading is revoked simply by never applying it to
//! non-paragraph content.

use markdown_it::common::sourcemap::SourcePos;
use markdown_it::parser::core::CoreRule;
use markdown_it::parser::inline::{Text, TextSpecial};
use markdown_it::plugins::cmark::block::list::{BulletList, ListItem, OrderedList};
use markdown_it::plugins::cmark::block::paragraph::Paragraph;
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

use crate::matcher;

/// A task list item's content: the marker plus the item text.
#[derive(Debug, Clone)]
pub struct Task {
    /// Marker text between the brackets, unchanged (`x`, ` `, `\]`, ...).
    pub marker: String,
}

impl NodeValue for Task {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("p", &[("class", "task".to_string())]);
        fmt.contents(&node.children);
        fmt.close("p");
        fmt.cr();
    }
}

/// The bracketed marker, brackets included.
#[derive(Debug, Clone)]
pub struct TaskMarker {
    /// Marker text between the brackets.
    pub marker: String,
}

impl NodeValue for TaskMarker {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        let checked = self.marker.eq_ignore_ascii_case("x");
        let mut attrs = vec![
            ("type", "checkbox".to_string()),
            ("disabled", String::new()),
        ];
        if checked {
            attrs.push(("checked", String::new()));
        }
        fmt.self_close("input", &attrs);
    }
}

/// Core pass that rewrites qualifying list item content into tasks.
pub struct TaskListRule;

impl CoreRule for TaskListRule {
    fn run(root: &mut Node, _md: &MarkdownIt) {
        rewrite(root);
    }
}

fn rewrite(node: &mut Node) {
    for child in node.children.iter_mut() {
        rewrite(child);
        if child.is::<ListItem>() {
            convert_item(child);
        }
    }
}

/// Byte span recorded for a node, if any.
fn span_of(node: &Node) -> Option<(usize, usize)> {
    node.srcmap.as_ref().map(|map| map.get_byte_offsets())
}

/// Source text at the start of an inline run, rebuilt from its text nodes.
/// Escaped characters contribute their written form (`\]`, not `]`), which
/// the escape rule keeps in `TextSpecial::markup`.
fn leading_source(children: &[Node], limit: usize) -> String {
    let mut out = String::new();
    for child in children {
        if let Some(text) = child.cast::<Text>() {
            out.push_str(&text.content);
        } else if let Some(special) = child.cast::<TextSpecial>() {
            out.push_str(&special.markup);
        } else {
            break;
        }
        if out.len() >= limit {
            break;
        }
    }
    out
}

/// Marker length and body when the inline run opens with a task marker.
/// The length counts source bytes, so it spans escape sequences whole.
fn leading_marker(children: &[Node]) -> Option<(usize, String)> {
    // a marker is at most `[\]]` plus the mandatory space
    let source = leading_source(children, 8);
    let len = matcher::task_marker(&source)?;
    Some((len, source[1..len - 1].to_string()))
}

/// Remove `marker_len` source bytes from the front of the inline run.
/// Wholly consumed nodes are dropped; a partially consumed text node keeps
/// its tail, with its srcmap start moved past the marker.
fn strip_marker(children: &mut Vec<Node>, marker_len: usize) {
    let mut remaining = marker_len;
    while remaining > 0 && !children.is_empty() {
        let src_len = if let Some(text) = children[0].cast::<Text>() {
            text.content.len()
        } else if let Some(special) = children[0].cast::<TextSpecial>() {
            special.markup.len()
        } else {
            return;
        };
        if src_len <= remaining {
            children.remove(0);
            remaining -= src_len;
        } else {
            let first = &mut children[0];
            if let Some((start, end)) = span_of(first) {
                first.srcmap = Some(SourcePos::new(start + remaining, end));
            }
            if let Some(text) = first.cast_mut::<Text>() {
                text.content.replace_range(..remaining, "");
            }
            remaining = 0;
        }
    }
}

/// Reclassify the item's leading content. Loose items carry a paragraph
/// child; tight items may carry their inline run directly. Anything else —
/// setext headings the host committed, block quotes, code — is left alone.
fn convert_item(item: &mut Node) {
    let Some(first) = item.children.first() else {
        return;
    };
    if first.is::<Paragraph>() {
        if let Some(para) = item.children.first_mut() {
            convert_paragraph(para);
        }
    } else if first.is::<Text>() {
        convert_inline_run(item);
    }
}

/// Replace a `Paragraph` opening with a marker by a `Task` holding the
/// marker node plus the paragraph's inline children.
fn convert_paragraph(para: &mut Node) {
    let Some((marker_len, marker)) = leading_marker(&para.children) else {
        return;
    };
    let span = span_of(para);
    strip_marker(&mut para.children, marker_len);

    let mut task = Node::new(Task {
        marker: marker.clone(),
    });
    task.children.push(marker_node(marker, span.map(|(s, _)| s), marker_len));
    task.children.append(&mut para.children);
    if let Some((start, end)) = span {
        task.srcmap = Some(SourcePos::new(start, end));
    }
    *para = task;
}

/// Same reclassification for items whose inline run sits directly under the
/// item: the task wraps the run up to the first nested list.
fn convert_inline_run(item: &mut Node) {
    let Some((marker_len, marker)) = leading_marker(&item.children) else {
        return;
    };
    let start = item.children.first().and_then(span_of).map(|(s, _)| s);
    strip_marker(&mut item.children, marker_len);
    let split = item
        .children
        .iter()
        .position(|child| child.is::<BulletList>() || child.is::<OrderedList>())
        .unwrap_or(item.children.len());
    let end = item.children[..split].last().and_then(span_of).map(|(_, e)| e);

    let mut task = Node::new(Task {
        marker: marker.clone(),
    });
    task.children.push(marker_node(marker, start, marker_len));
    if let (Some(start), Some(end)) = (start, end) {
        task.srcmap = Some(SourcePos::new(start, end));
    }

    let tail = item.children.split_off(split);
    task.children.append(&mut item.children);
    item.children.push(task);
    item.children.extend(tail);
}

fn marker_node(marker: String, start: Option<usize>, marker_len: usize) -> Node {
    let mut node = Node::new(TaskMarker { marker });
    if let Some(start) = start {
        node.srcmap = Some(SourcePos::new(start, start + marker_len));
    }
    node
}

/// Add the task list pass to a markdown-it parser.
pub fn add_tasklist_plugin(md: &mut MarkdownIt) {
    md.add_rule::<TaskListRule>();
}
