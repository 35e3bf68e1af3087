//! Vaultmark Parser
//!
//! A markdown-it dialect for personal knowledge-base notes. On top of
//! CommonMark it recognizes:
//! - Internal links and embeds: `[[Note#heading|alias]]`, `![[image.png]]`
//! - Tags: `#project`, `#ñandú`
//! - Inline footnotes `[^1]` and reference blocks `[^1]: details`
//! - Task list items with free-form markers: `- [x]`, `- [a]`, `- [\]]`
//! - Document-initial YAML frontmatter, kept opaque
//!
//! The dialect is a set of ordinary markdown-it rules; mix and match the
//! plugins onto your own [`MarkdownIt`] instance, or use [`vault_markdown`]
//! for the full set and [`VaultParser`] for file-level parsing with
//! metadata extraction.

pub mod error;
pub mod extract;
pub mod matcher;
pub mod parser;
pub mod plugins;
pub mod tags;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use markdown_it::MarkdownIt;

// Re-export main types for convenience
pub use error::{ParserError, ParserResult};
pub use extract::MetadataExtractor;
pub use parser::VaultParser;
pub use tags::{tag_of, NodeTag};
pub use types::{
    FootnoteDefinition, Frontmatter, InlineFootnote, NoteMetadata, ParsedNote, Tag, TaskItem,
    Wikilink,
};

/// Add every dialect rule to an existing markdown-it parser.
///
/// CommonMark rules must already be present; block and inline rules are
/// registered ahead of the built-in ones so `[[`, `[^` and the opening
/// `---` fence are claimed before the standard link, reference and
/// thematic-break rules see them.
pub fn add(md: &mut MarkdownIt) {
    plugins::add_frontmatter_plugin(md);
    plugins::add_footnote_ref_plugin(md);
    plugins::add_wikilink_plugin(md);
    plugins::add_footnote_plugin(md);
    plugins::add_hashtag_plugin(md);
    plugins::add_tasklist_plugin(md);
}

/// A parser with CommonMark plus the full dialect registered.
pub fn vault_markdown() -> MarkdownIt {
    let mut md = MarkdownIt::new();
    markdown_it::plugins::cmark::add(&mut md);
    add(&mut md);
    md
}
