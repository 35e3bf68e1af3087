//! Node tag declarations for the dialect
//!
//! Downstream tooling (highlighting, folding, fixture serialization)
//! addresses dialect nodes through stable identifiers rather than concrete
//! `NodeValue` types. This module is that mapping: every node kind the
//! dialect can emit, its canonical name, and the short code used by
//! conformance fixtures.

use crate::plugins::footnote::{Footnote, FootnoteLabel, FootnoteMark};
use crate::plugins::footnote_ref::FootnoteReference;
use crate::plugins::frontmatter::{YamlContent, YamlFrontMatter, YamlMarker};
use crate::plugins::hashtag::{Hashtag, HashtagLabel, HashtagMark};
use crate::plugins::tasklist::{Task, TaskMarker};
use crate::plugins::wikilink::{
    Embed, EmbedMark, InternalDisplay, InternalLink, InternalMark, InternalPath, InternalSubpath,
};
use markdown_it::Node;

/// Stable identifier for every node kind the dialect emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Task,
    TaskMarker,
    Hashtag,
    HashtagMark,
    HashtagLabel,
    InternalLink,
    InternalMark,
    InternalPath,
    InternalSubpath,
    InternalDisplay,
    Embed,
    EmbedMark,
    Footnote,
    FootnoteMark,
    FootnoteLabel,
    FootnoteReference,
    YamlFrontMatter,
    YamlMarker,
    YamlContent,
}

impl NodeTag {
    /// Canonical node name.
    pub fn name(self) -> &'static str {
        match self {
            NodeTag::Task => "Task",
            NodeTag::TaskMarker => "TaskMarker",
            NodeTag::Hashtag => "Hashtag",
            NodeTag::HashtagMark => "HashtagMark",
            NodeTag::HashtagLabel => "HashtagLabel",
            NodeTag::InternalLink => "InternalLink",
            NodeTag::InternalMark => "InternalMark",
            NodeTag::InternalPath => "InternalPath",
            NodeTag::InternalSubpath => "InternalSubpath",
            NodeTag::InternalDisplay => "InternalDisplay",
            NodeTag::Embed => "Embed",
            NodeTag::EmbedMark => "EmbedMark",
            NodeTag::Footnote => "Footnote",
            NodeTag::FootnoteMark => "FootnoteMark",
            NodeTag::FootnoteLabel => "FootnoteLabel",
            NodeTag::FootnoteReference => "FootnoteReference",
            NodeTag::YamlFrontMatter => "YAMLFrontMatter",
            NodeTag::YamlMarker => "YAMLMarker",
            NodeTag::YamlContent => "YAMLContent",
        }
    }

    /// Short code used by conformance fixtures.
    pub fn code(self) -> &'static str {
        match self {
            NodeTag::Task => "T",
            NodeTag::TaskMarker => "t",
            NodeTag::Hashtag => "H",
            NodeTag::HashtagMark => "hm",
            NodeTag::HashtagLabel => "hl",
            NodeTag::InternalLink => "IL",
            NodeTag::InternalMark => "iM",
            NodeTag::InternalPath => "iP",
            NodeTag::InternalSubpath => "iS",
            NodeTag::InternalDisplay => "iD",
            NodeTag::Embed => "EM",
            NodeTag::EmbedMark => "eM",
            NodeTag::Footnote => "FN",
            NodeTag::FootnoteMark => "fM",
            NodeTag::FootnoteLabel => "fL",
            NodeTag::FootnoteReference => "FR",
            NodeTag::YamlFrontMatter => "YF",
            NodeTag::YamlMarker => "ym",
            NodeTag::YamlContent => "yc",
        }
    }

    /// All dialect tags, in fixture-table order.
    pub fn all() -> &'static [NodeTag] {
        &[
            NodeTag::Task,
            NodeTag::TaskMarker,
            NodeTag::Hashtag,
            NodeTag::HashtagMark,
            NodeTag::HashtagLabel,
            NodeTag::InternalLink,
            NodeTag::InternalMark,
            NodeTag::InternalPath,
            NodeTag::InternalSubpath,
            NodeTag::InternalDisplay,
            NodeTag::Embed,
            NodeTag::EmbedMark,
            NodeTag::Footnote,
            NodeTag::FootnoteMark,
            NodeTag::FootnoteLabel,
            NodeTag::FootnoteReference,
            NodeTag::YamlFrontMatter,
            NodeTag::YamlMarker,
            NodeTag::YamlContent,
        ]
    }
}

/// The dialect tag of `node`, or `None` for host-engine nodes.
pub fn tag_of(node: &Node) -> Option<NodeTag> {
    if node.is::<Task>() {
        Some(NodeTag::Task)
    } else if node.is::<TaskMarker>() {
        Some(NodeTag::TaskMarker)
    } else if node.is::<Hashtag>() {
        Some(NodeTag::Hashtag)
    } else if node.is::<HashtagMark>() {
        Some(NodeTag::HashtagMark)
    } else if node.is::<HashtagLabel>() {
        Some(NodeTag::HashtagLabel)
    } else if node.is::<InternalLink>() {
        Some(NodeTag::InternalLink)
    } else if node.is::<InternalMark>() {
        Some(NodeTag::InternalMark)
    } else if node.is::<InternalPath>() {
        Some(NodeTag::InternalPath)
    } else if node.is::<InternalSubpath>() {
        Some(NodeTag::InternalSubpath)
    } else if node.is::<InternalDisplay>() {
        Some(NodeTag::InternalDisplay)
    } else if node.is::<Embed>() {
        Some(NodeTag::Embed)
    } else if node.is::<EmbedMark>() {
        Some(NodeTag::EmbedMark)
    } else if node.is::<Footnote>() {
        Some(NodeTag::Footnote)
    } else if node.is::<FootnoteMark>() {
        Some(NodeTag::FootnoteMark)
    } else if node.is::<FootnoteLabel>() {
        Some(NodeTag::FootnoteLabel)
    } else if node.is::<FootnoteReference>() {
        Some(NodeTag::FootnoteReference)
    } else if node.is::<YamlFrontMatter>() {
        Some(NodeTag::YamlFrontMatter)
    } else if node.is::<YamlMarker>() {
        Some(NodeTag::YamlMarker)
    } else if node.is::<YamlContent>() {
        Some(NodeTag::YamlContent)
    } else {
        None
    }
}
