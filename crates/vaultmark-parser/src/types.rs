//! Metadata types extracted from parsed notes
//!
//! These are the flat, serializable views an indexer consumes. Every type
//! carries the byte offset of its source span so callers can map metadata
//! back to the document.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Frontmatter metadata block
///
/// The body is kept verbatim and never interpreted; callers that want
/// structured properties run their own YAML pass over `raw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Raw frontmatter content (without the fence lines)
    pub raw: String,

    /// Byte span of the whole block, fences included
    pub span: (usize, usize),
}

impl Frontmatter {
    /// Create new frontmatter from raw body text
    pub fn new(raw: String, span: (usize, usize)) -> Self {
        Self { raw, span }
    }

    /// Body lines, exactly as written
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.raw.lines()
    }
}

/// Internal link `[[target#subpath|display]]` or embed `![[target]]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wikilink {
    /// Target note name, as written
    pub target: String,

    /// Subpath after `#`, without the `#`; a leading `^` marks a block anchor
    pub subpath: Option<String>,

    /// Optional display text after `|`
    pub display: Option<String>,

    /// Whether this is an embed (`![[note]]`)
    pub is_embed: bool,

    /// Byte offset in the source document
    pub offset: usize,
}

impl Wikilink {
    /// Create a simple wikilink
    pub fn new(target: impl Into<String>, offset: usize) -> Self {
        Self {
            target: target.into(),
            subpath: None,
            display: None,
            is_embed: false,
            offset,
        }
    }

    /// Get the display text (display, or the target)
    pub fn display_text(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.target)
    }

    /// Whether the subpath is a block anchor (`#^id`)
    pub fn is_block_anchor(&self) -> bool {
        self.subpath.as_deref().is_some_and(|s| s.starts_with('^'))
    }
}

/// Tag reference `#tag`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Tag label (without `#`)
    pub name: String,

    /// Byte offset in the source document
    pub offset: usize,
}

impl Tag {
    /// Create a new tag
    pub fn new(name: impl Into<String>, offset: usize) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }
}

/// Task list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    /// Marker text between the brackets, verbatim (` `, `x`, `a`, `\]`, ...)
    pub marker: String,

    /// Item text with the marker stripped
    pub text: String,

    /// Byte offset of the task content in the source document
    pub offset: usize,
}

impl TaskItem {
    /// Whether the marker means "done" (`x` or `X`)
    pub fn is_checked(&self) -> bool {
        self.marker.eq_ignore_ascii_case("x")
    }
}

/// Inline footnote `[^label]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InlineFootnote {
    /// Footnote label (without the marks)
    pub label: String,

    /// Byte offset in the source document
    pub offset: usize,
}

/// Footnote reference block `[^label]: body`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootnoteDefinition {
    /// Footnote label (without the marks)
    pub label: String,

    /// Byte offset of the whole block in the source document
    pub offset: usize,
}

/// All dialect metadata extracted from one document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteMetadata {
    /// Frontmatter, when the document opens with a valid block
    pub frontmatter: Option<Frontmatter>,

    /// Internal links and embeds, in document order
    pub wikilinks: Vec<Wikilink>,

    /// Tags, in document order
    pub tags: Vec<Tag>,

    /// Task list items, in document order
    pub tasks: Vec<TaskItem>,

    /// Inline footnotes, in document order
    pub footnotes: Vec<InlineFootnote>,

    /// Footnote reference blocks, in document order
    pub footnote_definitions: Vec<FootnoteDefinition>,
}

impl NoteMetadata {
    /// Targets of every non-embed link
    pub fn link_targets(&self) -> impl Iterator<Item = &str> {
        self.wikilinks
            .iter()
            .filter(|link| !link.is_embed)
            .map(|link| link.target.as_str())
    }

    /// Tasks still open (marker other than `x`/`X`)
    pub fn open_tasks(&self) -> impl Iterator<Item = &TaskItem> {
        self.tasks.iter().filter(|task| !task.is_checked())
    }
}

/// A fully parsed note: source identity plus extracted metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedNote {
    /// Source path of the note
    pub path: PathBuf,

    /// Extracted dialect metadata
    pub metadata: NoteMetadata,

    /// BLAKE3 hash of the source content
    pub content_hash: String,

    /// Source size in bytes
    pub file_size: usize,
}
