//! Core data models used throughout Autolinker.
//!
//! These types describe locations in a text buffer, the matches found by
//! the match engine, and the records kept for undo.

use serde::{Deserialize, Serialize};

/// Opening reference marker.
pub const LINK_OPEN: &str = "[[";
/// Closing reference marker.
pub const LINK_CLOSE: &str = "]]";

/// Combined character length of both reference markers.
pub const MARKER_LEN: usize = 4;

/// A zero-based `(line, ch)` location in a text buffer.
///
/// `ch` counts characters (Unicode scalar values), not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }

    /// The position `n` characters to the right on the same line.
    pub fn offset(self, n: usize) -> Self {
        Self {
            line: self.line,
            ch: self.ch + n,
        }
    }
}

/// An occurrence of an indexed term that qualifies for rewriting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Normalized index key.
    pub term: String,
    /// The word exactly as it appears in the line.
    pub raw_word: String,
    /// Document that owns `term` in the index.
    pub owner: String,
    /// Start of the raw word.
    pub start: Position,
    /// One past the last character of the raw word.
    pub end: Position,
}

/// Record of one applied rewrite, sufficient to revert it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The raw word that was wrapped.
    pub text: String,
    /// Start of the word before it was wrapped.
    pub position: Position,
    /// Document the rewrite was applied to.
    pub file: String,
}

/// Wrap a raw word in reference markers: `banana` → `[[banana]]`.
pub fn render_link(raw_word: &str) -> String {
    format!("{}{}{}", LINK_OPEN, raw_word, LINK_CLOSE)
}

/// Returns true if the word already carries a reference marker.
pub fn is_linked(raw_word: &str) -> bool {
    raw_word.contains(LINK_OPEN) || raw_word.contains(LINK_CLOSE)
}
