//! Pure matchers for the dialect constructs
//!
//! Each function inspects a read-only slice starting at the candidate
//! position and either declines (`None`) or reports the spans that make up
//! the construct. Nothing here touches the host engine: the markdown-it
//! rules in [`crate::plugins`] translate these results into nodes, which
//! keeps the recognition logic testable in isolation and re-entrant across
//! incremental re-parses.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Matches `[^label]:` at the start of a line. Labels exclude whitespace
/// and square brackets and must be non-empty.
static REFERENCE_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\^([^\s\[\]]+)\]:").expect("footnote reference regex"));

/// Matches a task marker at the start of a list item's content: `[` plus a
/// single marker char plus `]` plus a space. The marker char is either the
/// escape sequence `\]` (a literal `]`) or any single non-newline character,
/// including `[` and `]` themselves, so `[ ]`, `[x]`, `[[]`, `[]]` and
/// `[\]]` are all valid. Alternation order makes the escape win when both
/// readings are possible.
static TASK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(\\\]|.)\] ").expect("task marker regex"));

/// Component spans of a matched internal link, relative to the start of the
/// match (the first `[`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalLinkParts {
    /// Target path; may be empty only when a subpath or display follows.
    pub path: Range<usize>,
    /// Subpath span including its leading `#`.
    pub subpath: Option<Range<usize>>,
    /// Byte offset of the `|` separator, when present.
    pub pipe: Option<usize>,
    /// Display text span (may be empty when `|` is directly followed by `]]`).
    pub display: Option<Range<usize>>,
    /// Total consumed length including both bracket pairs.
    pub len: usize,
}

/// Label span of a matched inline footnote or reference head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootnoteParts {
    pub label: Range<usize>,
    /// Total consumed length (`[^label]` for inline, `[^label]:` for heads).
    pub len: usize,
}

/// Match `[[path#subpath|display]]` with `input` starting at `[[`.
///
/// Declines when the closing `]]` does not appear before a line break, or
/// when every component is absent (`[[]]`).
pub fn internal_link(input: &str) -> Option<InternalLinkParts> {
    if !input.starts_with("[[") {
        return None;
    }
    let bytes = input.as_bytes();
    let mut i = 2;

    // Path may not contain `]`, `|`, `#` or line breaks.
    while i < bytes.len() && !matches!(bytes[i], b'#' | b'|' | b']' | b'\n' | b'\r') {
        i += 1;
    }
    if i >= bytes.len() {
        return None;
    }
    let path = 2..i;

    let mut subpath = None;
    if bytes[i] == b'#' {
        // Subpath runs until `|` or the closing `]]`; a lone `]` is part of it.
        let start = i;
        let end = scan_until(input, i + 1, true)?;
        subpath = Some(start..end);
        i = end;
    }

    let mut pipe = None;
    let mut display = None;
    if bytes[i] == b'|' {
        pipe = Some(i);
        // Display runs until the closing `]]` and may contain `#`, `|`, `]`.
        let start = i + 1;
        let end = scan_until(input, start, false)?;
        display = Some(start..end);
        i = end;
    }

    if !input[i..].starts_with("]]") {
        return None;
    }
    if path.is_empty() && subpath.is_none() && pipe.is_none() {
        return None;
    }

    Some(InternalLinkParts {
        path,
        subpath,
        pipe,
        display,
        len: i + 2,
    })
}

/// Scan forward from `from` to the earliest terminator on the current line:
/// the literal `]]`, or additionally `|` when `stop_at_pipe` is set. Returns
/// the terminator's byte offset, or `None` when the line ends first.
fn scan_until(input: &str, from: usize, stop_at_pipe: bool) -> Option<usize> {
    let line_end = input[from..]
        .find(['\n', '\r'])
        .map(|n| from + n)
        .unwrap_or(input.len());
    let line = &input[from..line_end];
    let close = line.find("]]").map(|n| from + n);
    let pipe = if stop_at_pipe {
        line.find('|').map(|n| from + n)
    } else {
        None
    };
    match (close, pipe) {
        (Some(c), Some(p)) => Some(c.min(p)),
        (Some(c), None) => Some(c),
        (None, Some(p)) => Some(p),
        (None, None) => None,
    }
}

/// Match an inline footnote `[^label]` with `input` starting at `[`.
///
/// The label is a maximal non-empty run of characters excluding whitespace,
/// `[` and `]`.
pub fn footnote(input: &str) -> Option<FootnoteParts> {
    let rest = input.strip_prefix("[^")?;
    let mut len = 0;
    for ch in rest.chars() {
        if ch.is_whitespace() || ch == '[' || ch == ']' {
            break;
        }
        len += ch.len_utf8();
    }
    if len == 0 || rest.as_bytes().get(len) != Some(&b']') {
        return None;
    }
    Some(FootnoteParts {
        label: 2..2 + len,
        len: len + 3,
    })
}

/// Match a footnote reference head `[^label]:` at the start of a line's
/// content.
pub fn footnote_reference_head(line: &str) -> Option<FootnoteParts> {
    let cap = REFERENCE_HEAD.captures(line)?;
    let label = cap.get(1)?;
    Some(FootnoteParts {
        label: label.start()..label.end(),
        len: cap.get(0)?.end(),
    })
}

/// Match a hashtag with `input` starting at `#`; `prev` is the character
/// immediately before the cursor, if any.
///
/// Labels are maximal runs of Unicode alphanumerics plus `-` and `_`.
/// A `#` preceded by an alphanumeric never matches (no mid-word tags), and
/// an all-digit label is rejected so issue-style references like `#1234`
/// stay plain text. Returns the consumed length including the `#`.
pub fn hashtag(input: &str, prev: Option<char>) -> Option<usize> {
    let rest = input.strip_prefix('#')?;
    if prev.is_some_and(|c| c.is_alphanumeric()) {
        return None;
    }
    let mut len = 0;
    for ch in rest.chars() {
        if ch.is_alphanumeric() || ch == '-' || ch == '_' {
            len += ch.len_utf8();
        } else {
            break;
        }
    }
    if len == 0 {
        return None;
    }
    if rest[..len].chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(1 + len)
}

/// Match a task marker at the start of a list item's content. Returns the
/// marker length including both brackets; the mandatory trailing space is
/// not part of the marker span.
pub fn task_marker(text: &str) -> Option<usize> {
    let cap = TASK_MARKER.captures(text)?;
    Some(cap.get(1)?.end() + 1)
}

/// A front matter fence is a line that is exactly `---`: no indentation, no
/// trailing whitespace, nothing else.
pub fn frontmatter_fence(line: &str) -> bool {
    line == "---"
}
