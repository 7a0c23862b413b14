//! `autolink session`: drive the linker from a stream of editor events.
//!
//! Reads one JSON object per line from stdin and dispatches it to a single
//! [`AutoLinker`], the way an editor would deliver change and paste
//! events. This is the event source the line-edit and paste paths are
//! registered against; each event is handled to completion before the
//! next line is read.
//!
//! | Command | Fields | Effect |
//! |---------|--------|--------|
//! | `open` | `document` | Make the document the active buffer |
//! | `close` | | Leave no buffer active |
//! | `cursor` | `line`, `ch` | Move the cursor |
//! | `edit` | `line`, `text` | Replace a line, then fire a change event |
//! | `paste` | `text`, optional `line`/`ch` | Insert text, then fire a paste event |
//! | `undo` | | Undo the newest link |
//! | `toggle` | | Flip auto-linking (persisted) |
//! | `scan` | | Rebuild the term index |
//! | `modified` | `document`, optional `text` | Fold a document into the index |
//! | `print` | | Print the active buffer |
//! | `save` | | Write modified buffers back to the vault |
//!
//! Modified buffers are also saved when stdin closes. A malformed line is
//! reported on stderr and skipped.

use anyhow::{bail, Context, Result};
use autolinker_core::host::memory::MemoryBuffer;
use autolinker_core::host::{DocumentSource, TextBuffer};
use autolinker_core::ingest::EditorEvent;
use autolinker_core::linker::AutoLinker;
use autolinker_core::models::Position;
use serde::Deserialize;
use std::collections::BTreeMap;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::notify::ConsoleNotifier;
use crate::scan::Host;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "lowercase")]
enum SessionCommand {
    Open {
        document: String,
    },
    Close,
    Cursor {
        line: usize,
        ch: usize,
    },
    Edit {
        line: usize,
        text: String,
    },
    Paste {
        text: String,
        #[serde(default)]
        line: Option<usize>,
        #[serde(default)]
        ch: Option<usize>,
    },
    Undo,
    Toggle,
    Scan,
    Modified {
        document: String,
        #[serde(default)]
        text: Option<String>,
    },
    Print,
    Save,
}

/// Open buffers plus the linker they feed.
struct Session<'h> {
    host: &'h Host,
    linker: AutoLinker,
    notifier: ConsoleNotifier,
    buffers: BTreeMap<String, MemoryBuffer>,
    active: Option<String>,
}

/// The active buffer as the linker sees it, if any.
fn active_buffer<'a>(
    buffers: &'a mut BTreeMap<String, MemoryBuffer>,
    active: &Option<String>,
) -> Option<&'a mut dyn TextBuffer> {
    let id = active.as_ref()?;
    buffers.get_mut(id).map(|b| b as &mut dyn TextBuffer)
}

impl<'h> Session<'h> {
    fn active_memory_buffer(&mut self) -> Result<&mut MemoryBuffer> {
        let Some(id) = self.active.clone() else {
            bail!("no document is open");
        };
        self.buffers
            .get_mut(&id)
            .with_context(|| format!("buffer missing for {}", id))
    }

    async fn apply(&mut self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::Open { document } => {
                if !self.buffers.contains_key(&document) {
                    let text = self.host.vault.read_document(&document).await?;
                    self.buffers
                        .insert(document.clone(), MemoryBuffer::new(document.clone(), &text));
                }
                self.active = Some(document);
            }
            SessionCommand::Close => {
                self.active = None;
            }
            SessionCommand::Cursor { line, ch } => {
                self.active_memory_buffer()?
                    .set_cursor(Position::new(line, ch));
            }
            SessionCommand::Edit { line, text } => {
                if let Ok(buffer) = self.active_memory_buffer() {
                    buffer.set_line(line, &text);
                }
                let buffer = active_buffer(&mut self.buffers, &self.active);
                self.linker
                    .handle_event(&EditorEvent::Changed, buffer, &self.notifier);
            }
            SessionCommand::Paste { text, line, ch } => {
                let at = match self.active_memory_buffer() {
                    Ok(buffer) => {
                        let cursor = buffer.cursor();
                        let requested = Position::new(
                            line.unwrap_or(cursor.line),
                            ch.unwrap_or(cursor.ch),
                        );
                        Some(buffer.insert_text(requested, &text))
                    }
                    Err(_) => None,
                };
                if let Some(at) = at {
                    let event = EditorEvent::Pasted { text, at };
                    let buffer = active_buffer(&mut self.buffers, &self.active);
                    self.linker.handle_event(&event, buffer, &self.notifier);
                }
            }
            SessionCommand::Undo => {
                let buffer = active_buffer(&mut self.buffers, &self.active);
                let outcome = self.linker.undo_last(buffer, &self.notifier);
                tracing::debug!(?outcome, "undo");
            }
            SessionCommand::Toggle => {
                self.linker
                    .toggle_auto_link(&self.host.store, &self.notifier)
                    .await?;
            }
            SessionCommand::Scan => {
                self.linker
                    .scan_vault(&self.host.vault, &self.notifier)
                    .await?;
            }
            SessionCommand::Modified { document, text } => {
                let text = match text {
                    Some(t) => t,
                    None => self.host.vault.read_document(&document).await?,
                };
                self.linker.document_modified(&document, &text);
            }
            SessionCommand::Print => {
                let buffer = self.active_memory_buffer()?;
                println!("{}", buffer.text());
            }
            SessionCommand::Save => {
                self.save_all().await?;
            }
        }
        Ok(())
    }

    async fn save_all(&mut self) -> Result<()> {
        for (id, buffer) in self.buffers.iter_mut() {
            if !buffer.is_dirty() {
                continue;
            }
            let text = buffer.text();
            self.host.vault.write_document(id, &text).await?;
            buffer.mark_clean();
            self.linker.document_modified(id, &text);
            println!("saved {}", id);
        }
        Ok(())
    }
}

/// Process every command from `input` against a freshly loaded linker.
pub async fn run_session_from<R>(config: &Config, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let host = Host::open(config)?;
    let notifier = ConsoleNotifier::new();
    let linker = AutoLinker::load(&host.store, &host.vault, &notifier).await?;

    let mut session = Session {
        host: &host,
        linker,
        notifier,
        buffers: BTreeMap::new(),
        active: None,
    };

    let mut lines = input.lines();
    let mut line_no = 0usize;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let command: SessionCommand = match serde_json::from_str(trimmed) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("line {}: invalid command: {}", line_no, e);
                continue;
            }
        };
        if let Err(e) = session.apply(command).await {
            eprintln!("line {}: {:#}", line_no, e);
        }
    }

    session.save_all().await
}

pub async fn run_session(config: &Config) -> Result<()> {
    run_session_from(config, BufReader::new(tokio::io::stdin())).await
}
