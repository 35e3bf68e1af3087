//! Convert a markdown-it AST into flat note metadata

use markdown_it::parser::inline::{Text, TextSpecial};
use markdown_it::Node;

use crate::plugins::footnote::Footnote;
use crate::plugins::footnote_ref::FootnoteReference;
use crate::plugins::frontmatter::{YamlContent, YamlFrontMatter};
use crate::plugins::hashtag::Hashtag;
use crate::plugins::tasklist::{Task, TaskMarker};
use crate::plugins::wikilink::{Embed, InternalLink};
use crate::types::{
    FootnoteDefinition, Frontmatter, InlineFootnote, NoteMetadata, Tag, TaskItem, Wikilink,
};

/// Extracts [`NoteMetadata`] from a parsed AST
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Collect all dialect metadata from `root`, in document order
    pub fn extract(root: &Node) -> NoteMetadata {
        let mut meta = NoteMetadata::default();
        Self::walk_node(root, &mut meta);
        meta
    }

    fn walk_node(node: &Node, meta: &mut NoteMetadata) {
        if let Some(fm) = Self::frontmatter_of(node) {
            meta.frontmatter = Some(fm);
            return;
        }

        // An embed owns its inner link; consume both here and stop.
        if node.is::<Embed>() {
            if let Some(link) = node.children.iter().find(|c| c.is::<InternalLink>()) {
                meta.wikilinks
                    .push(Self::wikilink_of(link, true, offset_of(node)));
            }
            return;
        }

        if node.is::<InternalLink>() {
            meta.wikilinks
                .push(Self::wikilink_of(node, false, offset_of(node)));
        }

        if let Some(tag) = node.cast::<Hashtag>() {
            meta.tags.push(Tag::new(tag.label.clone(), offset_of(node)));
        }

        if let Some(task) = node.cast::<Task>() {
            meta.tasks.push(TaskItem {
                marker: task.marker.clone(),
                text: Self::extract_text(node),
                offset: offset_of(node),
            });
        }

        if let Some(footnote) = node.cast::<Footnote>() {
            meta.footnotes.push(InlineFootnote {
                label: footnote.label.clone(),
                offset: offset_of(node),
            });
        }

        if let Some(def) = node.cast::<FootnoteReference>() {
            meta.footnote_definitions.push(FootnoteDefinition {
                label: def.label.clone(),
                offset: offset_of(node),
            });
        }

        for child in node.children.iter() {
            Self::walk_node(child, meta);
        }
    }

    fn wikilink_of(node: &Node, is_embed: bool, offset: usize) -> Wikilink {
        // only called on InternalLink nodes, but stay total
        let Some(link) = node.cast::<InternalLink>() else {
            return Wikilink::new(String::new(), offset);
        };
        Wikilink {
            target: link.path.clone(),
            subpath: link.subpath.clone(),
            display: link.display.clone(),
            is_embed,
            offset,
        }
    }

    fn frontmatter_of(node: &Node) -> Option<Frontmatter> {
        node.cast::<YamlFrontMatter>()?;
        let raw = node
            .children
            .iter()
            .filter_map(|child| child.cast::<YamlContent>())
            .map(|content| content.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let span = node
            .srcmap
            .as_ref()
            .map(|map| map.get_byte_offsets())
            .unwrap_or((0, 0));
        Some(Frontmatter::new(raw, span))
    }

    /// Plain text of a node's inline content, markers excluded
    fn extract_text(node: &Node) -> String {
        let mut text = String::new();
        Self::collect_text(node, &mut text);
        text.trim().to_string()
    }

    fn collect_text(node: &Node, text: &mut String) {
        if node.is::<TaskMarker>() {
            return;
        }
        if let Some(t) = node.cast::<Text>() {
            text.push_str(&t.content);
        }
        if let Some(t) = node.cast::<TextSpecial>() {
            text.push_str(&t.content);
        }
        for child in node.children.iter() {
            Self::collect_text(child, text);
        }
    }
}

/// Start offset recorded for a node; zero when the host kept no map.
fn offset_of(node: &Node) -> usize {
    node.srcmap
        .as_ref()
        .map(|map| map.get_byte_offsets().0)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault_markdown;

    fn extract(input: &str) -> NoteMetadata {
        let md = vault_markdown();
        MetadataExtractor::extract(&md.parse(input))
    }

    #[test]
    fn collects_links_in_document_order() {
        let meta = extract("[[A]] then [[B|b]] then ![[C.jpg]]");
        let targets: Vec<_> = meta.wikilinks.iter().map(|l| l.target.as_str()).collect();
        assert_eq!(targets, vec!["A", "B", "C.jpg"]);
        assert!(meta.wikilinks[2].is_embed);
        assert_eq!(meta.wikilinks[1].display.as_deref(), Some("b"));
    }

    #[test]
    fn embeds_are_not_double_counted() {
        let meta = extract("![[moon.jpg]]");
        assert_eq!(meta.wikilinks.len(), 1);
        assert!(meta.wikilinks[0].is_embed);
    }

    #[test]
    fn offsets_point_into_the_source() {
        let src = "intro #alpha and [[Note]]";
        let meta = extract(src);
        let tag = &meta.tags[0];
        assert_eq!(&src[tag.offset..tag.offset + 6], "#alpha");
        let link = &meta.wikilinks[0];
        assert_eq!(&src[link.offset..link.offset + 2], "[[");
    }

    #[test]
    fn task_text_excludes_the_marker() {
        let meta = extract("- [x] water the plants");
        assert_eq!(meta.tasks.len(), 1);
        assert_eq!(meta.tasks[0].text, "water the plants");
        assert!(meta.tasks[0].is_checked());
    }

    #[test]
    fn escaped_marker_task_is_recognized() {
        let meta = extract("- [\\]] tricky \\*text*");
        assert_eq!(meta.tasks.len(), 1);
        assert_eq!(meta.tasks[0].marker, "\\]");
        assert_eq!(meta.tasks[0].text, "tricky *text*");
    }

    #[test]
    fn footnotes_and_definitions_are_separate() {
        let meta = extract("Some info[^1]\n\n[^1]: The details");
        assert_eq!(meta.footnotes.len(), 1);
        assert_eq!(meta.footnote_definitions.len(), 1);
        assert_eq!(meta.footnotes[0].label, "1");
        assert_eq!(meta.footnote_definitions[0].label, "1");
    }

    #[test]
    fn frontmatter_body_is_joined_verbatim() {
        let meta = extract("---\ntags: blah\nother: 1\n---\n\nbody");
        let fm = meta.frontmatter.expect("frontmatter");
        assert_eq!(fm.raw, "tags: blah\nother: 1");
        assert_eq!(fm.span.0, 0);
    }
}
