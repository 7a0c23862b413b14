//! # Autolinker Core
//!
//! Shared, I/O-free logic for Autolinker: term normalization, the term
//! index, the match engine, positional rewriting with undo history, and
//! change ingestion.
//!
//! This crate contains no tokio, filesystem, or other native-only
//! dependencies. Everything outside the engine (document storage, the
//! editor buffer, notifications, settings persistence) is reached through
//! the traits in [`host`].
//!
//! # Example
//!
//! ```rust
//! use autolinker_core::host::memory::{MemoryBuffer, RecordingNotifier};
//! use autolinker_core::ingest::EditorEvent;
//! use autolinker_core::linker::AutoLinker;
//! use autolinker_core::models::Position;
//! use autolinker_core::settings::Settings;
//!
//! let mut linker = AutoLinker::new(Settings::default());
//! linker.document_modified("apple.md", "The Banana Tree");
//!
//! let mut buffer = MemoryBuffer::new("other.md", "I love banana bread");
//! buffer.set_cursor(Position::new(0, 19));
//! let notifier = RecordingNotifier::new();
//!
//! let linked = linker.handle_event(&EditorEvent::Changed, Some(&mut buffer), &notifier);
//! assert_eq!(linked, 1);
//! assert_eq!(buffer.text(), "I love [[banana]] bread");
//! ```

pub mod history;
pub mod host;
pub mod index;
pub mod ingest;
pub mod linker;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod rewrite;
pub mod settings;
