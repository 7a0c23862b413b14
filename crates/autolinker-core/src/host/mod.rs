//! Host abstraction for Autolinker.
//!
//! The engine never touches storage or editor state directly. A host
//! application (the `autolink` CLI, an editor plugin, a test) supplies
//! implementations of these traits:
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`DocumentSource`] | Enumerate documents and read their full text |
//! | [`TextBuffer`] | The active editor buffer: cursor, lines, span replacement |
//! | [`Notifier`] | Fire-and-forget user feedback |
//! | [`SettingsStore`] | Load and save persisted settings |
//!
//! [`memory`] provides in-memory implementations of all four.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::models::Position;
use crate::settings::Settings;

/// Read access to the document collection being indexed.
///
/// Reads may fail; a scan treats a failed read as "skip this document".
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Identifiers of every document, in the order they should be scanned.
    async fn list_documents(&self) -> Result<Vec<String>>;

    /// Full text of one document.
    async fn read_document(&self, id: &str) -> Result<String>;
}

/// The active editor buffer.
///
/// All positions are in character units. Replacements are synchronous and
/// must be applied as a single atomic span edit.
pub trait TextBuffer {
    /// Identifier of the document this buffer edits.
    fn document_id(&self) -> &str;

    /// Current cursor position.
    fn cursor(&self) -> Position;

    /// Text of line `line`, without its line terminator.
    fn line(&self, line: usize) -> Option<String>;

    /// Replace `[start, end)` with `text`.
    fn replace_range(&mut self, text: &str, start: Position, end: Position);
}

/// User-visible feedback. Never blocks, never fails.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Persistence for [`Settings`].
///
/// `load` returns raw, untrusted data; callers merge it with
/// [`Settings::overlay`].
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<Value>;

    async fn save(&self, settings: &Settings) -> Result<()>;
}
