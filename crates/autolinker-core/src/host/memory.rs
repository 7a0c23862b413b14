//! In-memory host implementations for testing and embedding.
//!
//! [`MemoryDocuments`] and [`MemorySettingsStore`] keep their state behind
//! `std::sync::RwLock` so they satisfy the `Send + Sync` bounds of the
//! async traits. [`MemoryBuffer`] stores one `String` per line.

use std::sync::{Mutex, RwLock};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::models::Position;
use crate::settings::Settings;

use super::{DocumentSource, Notifier, SettingsStore, TextBuffer};

/// A document collection held in memory, listed in insertion order.
pub struct MemoryDocuments {
    docs: RwLock<Vec<(String, String)>>,
    unreadable: RwLock<Vec<String>>,
}

impl MemoryDocuments {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
            unreadable: RwLock::new(Vec::new()),
        }
    }

    /// Build a collection from `(id, text)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let docs = Self::new();
        for (id, text) in pairs {
            docs.insert(id, text);
        }
        docs
    }

    /// Insert or replace a document, keeping its original listing slot.
    pub fn insert(&self, id: impl Into<String>, text: impl Into<String>) {
        let id = id.into();
        let text = text.into();
        let mut docs = self.docs.write().unwrap();
        match docs.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = text,
            None => docs.push((id, text)),
        }
    }

    /// Make reads of `id` fail, simulating an I/O error.
    pub fn mark_unreadable(&self, id: impl Into<String>) {
        self.unreadable.write().unwrap().push(id.into());
    }
}

impl Default for MemoryDocuments {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentSource for MemoryDocuments {
    async fn list_documents(&self) -> Result<Vec<String>> {
        let docs = self.docs.read().unwrap();
        Ok(docs.iter().map(|(id, _)| id.clone()).collect())
    }

    async fn read_document(&self, id: &str) -> Result<String> {
        if self.unreadable.read().unwrap().iter().any(|u| u == id) {
            return Err(anyhow!("read failed: {}", id));
        }
        let docs = self.docs.read().unwrap();
        docs.iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, text)| text.clone())
            .ok_or_else(|| anyhow!("no such document: {}", id))
    }
}

/// A line-oriented text buffer held in memory.
///
/// The line terminator of the loaded text (`\r\n` if any line used it,
/// otherwise `\n`) is kept and used again by [`text`](Self::text).
#[derive(Debug, Clone)]
pub struct MemoryBuffer {
    document_id: String,
    lines: Vec<String>,
    cursor: Position,
    line_ending: &'static str,
    trailing_newline: bool,
    dirty: bool,
}

impl MemoryBuffer {
    pub fn new(document_id: impl Into<String>, text: &str) -> Self {
        let line_ending = if text.contains("\r\n") { "\r\n" } else { "\n" };
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines = body
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        Self {
            document_id: document_id.into(),
            lines,
            cursor: Position::default(),
            line_ending,
            trailing_newline,
            dirty: false,
        }
    }

    /// The full buffer text, with the original line endings and trailing
    /// newline preserved.
    pub fn text(&self) -> String {
        let mut out = self.lines.join(self.line_ending);
        if self.trailing_newline {
            out.push_str(self.line_ending);
        }
        out
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Move the cursor, clamped to the buffer.
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.clamp(pos);
    }

    /// True once the buffer has been modified.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Replace line `line` wholesale, as a typing burst would, and put the
    /// cursor at its end. Lines past the end are appended.
    pub fn set_line(&mut self, line: usize, text: &str) {
        while self.lines.len() <= line {
            self.lines.push(String::new());
        }
        self.lines[line] = text.to_string();
        self.cursor = Position::new(line, text.chars().count());
        self.dirty = true;
    }

    /// Insert `text` (possibly multi-line) at `at` and leave the cursor
    /// after it. Returns the clamped insertion point.
    pub fn insert_text(&mut self, at: Position, text: &str) -> Position {
        let at = self.clamp(at);
        self.replace_range(text, at, at);
        let inserted: Vec<&str> = text.split('\n').collect();
        let last = inserted.last().map(|l| l.chars().count()).unwrap_or(0);
        self.cursor = if inserted.len() == 1 {
            at.offset(last)
        } else {
            Position::new(at.line + inserted.len() - 1, last)
        };
        at
    }

    fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.lines.len().saturating_sub(1));
        let len = self.lines.get(line).map(|l| l.chars().count()).unwrap_or(0);
        Position::new(line, pos.ch.min(len))
    }

    fn byte_index(line: &str, ch: usize) -> usize {
        line.char_indices()
            .nth(ch)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }
}

impl TextBuffer for MemoryBuffer {
    fn document_id(&self) -> &str {
        &self.document_id
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn line(&self, line: usize) -> Option<String> {
        self.lines.get(line).cloned()
    }

    fn replace_range(&mut self, text: &str, start: Position, end: Position) {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        let start = self.clamp(start);
        let end = self.clamp(end);

        let head = {
            let l = &self.lines[start.line];
            l[..Self::byte_index(l, start.ch)].to_string()
        };
        let tail = {
            let l = &self.lines[end.line];
            l[Self::byte_index(l, end.ch)..].to_string()
        };

        let joined = format!("{}{}{}", head, text, tail);
        let replacement: Vec<String> = joined.split('\n').map(str::to_string).collect();
        self.lines.splice(start.line..=end.line, replacement);
        self.dirty = true;
    }
}

/// Collects notifications instead of showing them.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Settings persisted to a JSON value in memory.
pub struct MemorySettingsStore {
    data: RwLock<Value>,
}

impl MemorySettingsStore {
    /// Start with raw persisted data (which may be partial or malformed).
    pub fn with_data(data: Value) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    pub fn data(&self) -> Value {
        self.data.read().unwrap().clone()
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::with_data(Value::Null)
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<Value> {
        Ok(self.data())
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        *self.data.write().unwrap() = serde_json::to_value(settings)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_roundtrip_text() {
        let b = MemoryBuffer::new("a.md", "one\ntwo\n");
        assert_eq!(b.line_count(), 2);
        assert_eq!(b.text(), "one\ntwo\n");
        let b = MemoryBuffer::new("a.md", "");
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.text(), "");
    }

    #[test]
    fn test_crlf_roundtrip_text() {
        let b = MemoryBuffer::new("a.md", "one\r\ntwo\r\n");
        assert_eq!(b.line_count(), 2);
        assert_eq!(b.line(1).unwrap(), "two");
        assert_eq!(b.text(), "one\r\ntwo\r\n");

        let b = MemoryBuffer::new("a.md", "one\r\ntwo");
        assert_eq!(b.text(), "one\r\ntwo");
    }

    #[test]
    fn test_crlf_survives_rewrite() {
        let mut b = MemoryBuffer::new("a.md", "intro\r\nI love banana bread\r\n");
        b.replace_range("[[banana]]", Position::new(1, 7), Position::new(1, 13));
        assert_eq!(b.text(), "intro\r\nI love [[banana]] bread\r\n");
    }

    #[test]
    fn test_replace_range_single_line() {
        let mut b = MemoryBuffer::new("a.md", "I love banana bread");
        b.replace_range("[[banana]]", Position::new(0, 7), Position::new(0, 13));
        assert_eq!(b.text(), "I love [[banana]] bread");
        assert!(b.is_dirty());
    }

    #[test]
    fn test_replace_range_multibyte() {
        let mut b = MemoryBuffer::new("a.md", "crème brûlée");
        b.replace_range("[[brûlée]]", Position::new(0, 6), Position::new(0, 12));
        assert_eq!(b.text(), "crème [[brûlée]]");
    }

    #[test]
    fn test_insert_multiline() {
        let mut b = MemoryBuffer::new("a.md", "start end");
        let at = b.insert_text(Position::new(0, 6), "one\ntwo\nthree ");
        assert_eq!(at, Position::new(0, 6));
        assert_eq!(b.text(), "start one\ntwo\nthree end");
        assert_eq!(b.cursor(), Position::new(2, 6));
    }

    #[test]
    fn test_set_line_appends() {
        let mut b = MemoryBuffer::new("a.md", "first");
        b.set_line(2, "third");
        assert_eq!(b.text(), "first\n\nthird");
        assert_eq!(b.cursor(), Position::new(2, 5));
    }

    #[tokio::test]
    async fn test_documents_listing_and_failure() {
        let docs = MemoryDocuments::from_pairs([("a.md", "x"), ("b.md", "y")]);
        docs.insert("a.md", "z");
        assert_eq!(docs.list_documents().await.unwrap(), vec!["a.md", "b.md"]);
        assert_eq!(docs.read_document("a.md").await.unwrap(), "z");
        docs.mark_unreadable("b.md");
        assert!(docs.read_document("b.md").await.is_err());
        assert!(docs.read_document("missing.md").await.is_err());
    }
}
