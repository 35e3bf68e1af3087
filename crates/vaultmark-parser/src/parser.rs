//! MarkdownIt-based note parser facade

use std::path::Path;

use markdown_it::{MarkdownIt, Node};
use tracing::debug;

use crate::error::{ParserError, ParserResult};
use crate::extract::MetadataExtractor;
use crate::types::ParsedNote;

/// Default file size cap: 10 MiB
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Note parser with the full dialect registered
pub struct VaultParser {
    md: MarkdownIt,
    max_file_size: Option<usize>,
}

impl VaultParser {
    /// Create a new parser with CommonMark plus every dialect plugin
    pub fn new() -> Self {
        Self {
            md: crate::vault_markdown(),
            max_file_size: Some(DEFAULT_MAX_FILE_SIZE),
        }
    }

    /// Create with a custom max file size (`None` disables the check)
    pub fn with_max_file_size(mut self, max_size: Option<usize>) -> Self {
        self.max_file_size = max_size;
        self
    }

    /// Parse content into an AST, for callers that want the tree itself
    pub fn parse_ast(&self, content: &str) -> Node {
        self.md.parse(content)
    }

    /// Parse content into a [`ParsedNote`]
    pub fn parse_content(&self, content: &str, source_path: &Path) -> ParserResult<ParsedNote> {
        if let Some(max) = self.max_file_size {
            if content.len() > max {
                return Err(ParserError::FileTooLarge {
                    size: content.len(),
                    max,
                });
            }
        }

        let ast = self.md.parse(content);
        let metadata = MetadataExtractor::extract(&ast);
        debug!(
            path = %source_path.display(),
            links = metadata.wikilinks.len(),
            tags = metadata.tags.len(),
            tasks = metadata.tasks.len(),
            "parsed note"
        );

        Ok(ParsedNote {
            path: source_path.to_path_buf(),
            metadata,
            content_hash: Self::hash_content(content),
            file_size: content.len(),
        })
    }

    /// Read and parse a note from disk. Only `.md` and `.markdown` files
    /// are accepted.
    pub async fn parse_file(&self, path: &Path) -> ParserResult<ParsedNote> {
        if !matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("md") | Some("markdown")
        ) {
            return Err(ParserError::invalid_path(path.display().to_string()));
        }
        if let Some(max) = self.max_file_size {
            let len = tokio::fs::metadata(path).await?.len() as usize;
            if len > max {
                return Err(ParserError::FileTooLarge { size: len, max });
            }
        }
        let content = tokio::fs::read_to_string(path).await?;
        self.parse_content(&content, path)
    }

    /// Hash content using BLAKE3
    fn hash_content(content: &str) -> String {
        blake3::hash(content.as_bytes()).to_hex().to_string()
    }
}

impl Default for VaultParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_content_extracts_metadata() {
        let parser = VaultParser::new();
        let note = parser
            .parse_content("#tag and [[Link]]", Path::new("note.md"))
            .unwrap();
        assert_eq!(note.metadata.tags.len(), 1);
        assert_eq!(note.metadata.wikilinks.len(), 1);
        assert_eq!(note.file_size, 17);
    }

    #[test]
    fn size_limit_is_enforced() {
        let parser = VaultParser::new().with_max_file_size(Some(8));
        let err = parser
            .parse_content("longer than eight", Path::new("note.md"))
            .unwrap_err();
        assert!(matches!(err, ParserError::FileTooLarge { max: 8, .. }));
    }

    #[test]
    fn hash_is_stable_and_content_sensitive() {
        let parser = VaultParser::new();
        let a = parser.parse_content("same", Path::new("a.md")).unwrap();
        let b = parser.parse_content("same", Path::new("b.md")).unwrap();
        let c = parser.parse_content("other", Path::new("c.md")).unwrap();
        assert_eq!(a.content_hash, b.content_hash);
        assert_ne!(a.content_hash, c.content_hash);
    }
}
