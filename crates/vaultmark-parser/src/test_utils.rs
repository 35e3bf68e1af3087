//! Test utilities for parser-related tests.
//!
//! Shared helpers for parsing notes in tests. Enable with the
//! `test-utils` feature:
//!
//! ```toml
//! [dev-dependencies]
//! vaultmark-parser = { path = "../vaultmark-parser", features = ["test-utils"] }
//! ```

use std::path::Path;

use crate::error::ParserResult;
use crate::types::ParsedNote;
use crate::VaultParser;

/// Parse markdown content into a [`ParsedNote`] for testing.
pub fn parse_note(content: &str, path: &str) -> ParserResult<ParsedNote> {
    VaultParser::new().parse_content(content, Path::new(path))
}

/// Parse content and return the node tags present, in document order.
///
/// Useful for asserting on tree shape without walking it by hand.
pub fn tag_codes(content: &str) -> Vec<&'static str> {
    let ast = crate::vault_markdown().parse(content);
    let mut codes = Vec::new();
    ast.walk(|node, _| {
        if let Some(tag) = crate::tags::tag_of(node) {
            codes.push(tag.code());
        }
    });
    codes
}
