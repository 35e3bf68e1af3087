//! Hashtag plugin for markdown-it (`#tag`)
//!
//! Recognizes note tags anywhere in inline text:
//! - `#tag`, `#nested_tag`, `#other-tag9`, `#ñáø`
//!
//! A `#` preceded by an alphanumeric character (`word#tag`) and all-digit
//! labels (`#1234`) stay plain text.

use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

use crate::matcher;

/// A whole hashtag span: the `#` mark plus its label.
#[derive(Debug, Clone)]
pub struct Hashtag {
    pub label: String,
}

impl NodeValue for Hashtag {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("span", &[("class", "tag".to_string())]);
        fmt.contents(&node.children);
        fmt.close("span");
    }
}

/// The introducing `#`.
#[derive(Debug, Clone)]
pub struct HashtagMark;

impl NodeValue for HashtagMark {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.text("#");
    }
}

/// The label text after the `#`.
#[derive(Debug, Clone)]
pub struct HashtagLabel {
    pub label: String,
}

impl NodeValue for HashtagLabel {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.text(&self.label);
    }
}

/// Scanner for hashtag syntax.
pub struct HashtagScanner;

impl InlineRule for HashtagScanner {
    const MARKER: char = '#';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..state.pos_max];
        let prev = state.src[..state.pos].chars().next_back();
        let len = matcher::hashtag(input, prev)?;
        let label = input[1..len].to_string();

        let mut mark = Node::new(HashtagMark);
        mark.srcmap = state.get_map(state.pos, state.pos + 1);

        let mut label_node = Node::new(HashtagLabel {
            label: label.clone(),
        });
        label_node.srcmap = state.get_map(state.pos + 1, state.pos + len);

        let mut node = Node::new(Hashtag { label });
        node.srcmap = state.get_map(state.pos, state.pos + len);
        node.children.push(mark);
        node.children.push(label_node);

        Some((node, len))
    }
}

/// Add the hashtag rule to a markdown-it parser.
pub fn add_hashtag_plugin(md: &mut MarkdownIt) {
    md.inline.add_rule::<HashtagScanner>();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_tags(input: &str) -> Vec<String> {
        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        add_hashtag_plugin(&mut md);

        let ast = md.parse(input);
        let mut tags = Vec::new();

        fn walk(node: &Node, tags: &mut Vec<String>) {
            if let Some(tag) = node.cast::<Hashtag>() {
                tags.push(tag.label.clone());
            }
            for child in &node.children {
                walk(child, tags);
            }
        }

        walk(&ast, &mut tags);
        tags
    }

    #[test]
    fn simple_tag() {
        assert_eq!(parse_tags("Some text. #tag here"), vec!["tag"]);
    }

    #[test]
    fn multiple_tags() {
        assert_eq!(
            parse_tags("#tag1x and #tag2y"),
            vec!["tag1x".to_string(), "tag2y".to_string()]
        );
    }

    #[test]
    fn hyphens_underscores_and_unicode() {
        assert_eq!(parse_tags("#other-tag9^not part"), vec!["other-tag9"]);
        assert_eq!(parse_tags("see #my_tag."), vec!["my_tag"]);
        assert_eq!(parse_tags("unicode #ñáø tag"), vec!["ñáø"]);
    }

    #[test]
    fn digits_only_is_not_a_tag() {
        assert!(parse_tags("Test number #1234").is_empty());
        assert_eq!(parse_tags("Test #tag9 too"), vec!["tag9"]);
    }

    #[test]
    fn mid_word_hash_is_not_a_tag() {
        assert!(parse_tags("word#tag").is_empty());
    }

    #[test]
    fn bare_hash_is_not_a_tag() {
        assert!(parse_tags("Just # alone").is_empty());
    }

    #[test]
    fn label_and_mark_children() {
        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        add_hashtag_plugin(&mut md);

        let ast = md.parse("a #tag b");
        let mut found = false;
        ast.walk(|node, _| {
            if let Some(tag) = node.cast::<Hashtag>() {
                assert_eq!(tag.label, "tag");
                assert!(node.children[0].is::<HashtagMark>());
                assert_eq!(
                    node.children[1].cast::<HashtagLabel>().map(|l| l.label.as_str()),
                    Some("tag")
                );
                found = true;
            }
        });
        assert!(found);
    }
}
