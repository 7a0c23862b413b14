//! The plugin-instance context.
//!
//! [`AutoLinker`] owns everything that lives for the lifetime of one
//! linker instance: its [`Settings`], the [`TermIndex`], and the rewrite
//! [`History`]. Hosts hold one `AutoLinker` and pass their collaborators
//! into each call; nothing is stored in globals, so independent instances
//! never interfere.
//!
//! # Operations
//!
//! | Method | Purpose |
//! |--------|---------|
//! | [`load`](AutoLinker::load) | Restore settings, scan if configured |
//! | [`scan_vault`](AutoLinker::scan_vault) | Rebuild the term index |
//! | [`document_modified`](AutoLinker::document_modified) | Incremental index update |
//! | [`handle_event`](AutoLinker::handle_event) | Line-edit and paste ingestion |
//! | [`undo_last`](AutoLinker::undo_last) | Revert the newest link |
//! | [`toggle_auto_link`](AutoLinker::toggle_auto_link) | Flip and persist auto-linking |
//! | [`update_settings`](AutoLinker::update_settings) | Replace and persist settings |

use anyhow::Result;

use crate::history::History;
use crate::host::{DocumentSource, Notifier, SettingsStore, TextBuffer};
use crate::index::{ScanReport, TermIndex};
use crate::ingest::{dispatch, EditorEvent, IngestContext};
use crate::rewrite::{undo, UndoOutcome};
use crate::settings::Settings;

#[derive(Debug, Default)]
pub struct AutoLinker {
    settings: Settings,
    index: TermIndex,
    history: History,
}

impl AutoLinker {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            index: TermIndex::new(),
            history: History::new(),
        }
    }

    /// Load persisted settings over the defaults, then scan the vault if
    /// `scan_on_startup` is set.
    ///
    /// A failing settings store leaves the defaults in place.
    pub async fn load<St, S>(
        store: &St,
        source: &S,
        notifier: &dyn Notifier,
    ) -> Result<Self>
    where
        St: SettingsStore + ?Sized,
        S: DocumentSource + ?Sized,
    {
        let settings = match store.load().await {
            Ok(data) => Settings::overlay(&data),
            Err(e) => {
                tracing::warn!(error = %e, "could not load settings; using defaults");
                Settings::default()
            }
        };
        let mut linker = Self::new(settings);
        if linker.settings.scan_on_startup {
            linker.scan_vault(source, notifier).await?;
        }
        Ok(linker)
    }

    /// Rebuild the term index from every document in `source`.
    pub async fn scan_vault<S>(&mut self, source: &S, notifier: &dyn Notifier) -> Result<ScanReport>
    where
        S: DocumentSource + ?Sized,
    {
        self.scan_vault_with(source, notifier, |_, _| {}).await
    }

    /// [`scan_vault`](Self::scan_vault) with a per-document progress callback.
    pub async fn scan_vault_with<S, F>(
        &mut self,
        source: &S,
        notifier: &dyn Notifier,
        on_progress: F,
    ) -> Result<ScanReport>
    where
        S: DocumentSource + ?Sized,
        F: FnMut(usize, usize),
    {
        let report = self
            .index
            .rebuild_with(source, &self.settings, on_progress)
            .await?;
        notifier.notify(&format!(
            "Indexed {} terms from {} documents",
            report.terms, report.documents_scanned
        ));
        Ok(report)
    }

    /// Fold a document's new text into the index.
    pub fn document_modified(&mut self, document_id: &str, text: &str) {
        self.index.update(text, document_id, &self.settings);
    }

    /// Run change ingestion for one editor event. Returns links created.
    ///
    /// Without an active buffer the event is ignored.
    pub fn handle_event(
        &mut self,
        event: &EditorEvent,
        buffer: Option<&mut dyn TextBuffer>,
        notifier: &dyn Notifier,
    ) -> usize {
        let Some(buffer) = buffer else {
            return 0;
        };
        let mut ctx = IngestContext {
            index: &self.index,
            settings: &self.settings,
            history: &mut self.history,
            notifier,
        };
        dispatch(&mut ctx, event, buffer)
    }

    /// Revert the most recent link.
    pub fn undo_last(
        &mut self,
        buffer: Option<&mut dyn TextBuffer>,
        notifier: &dyn Notifier,
    ) -> UndoOutcome {
        undo(&mut self.history, buffer, notifier)
    }

    /// Flip `auto_link_enabled` and persist it. Returns the new value.
    pub async fn toggle_auto_link<St>(&mut self, store: &St, notifier: &dyn Notifier) -> Result<bool>
    where
        St: SettingsStore + ?Sized,
    {
        self.settings.auto_link_enabled = !self.settings.auto_link_enabled;
        store.save(&self.settings).await?;
        let state = if self.settings.auto_link_enabled {
            "enabled"
        } else {
            "disabled"
        };
        notifier.notify(&format!("Auto-linking {}", state));
        Ok(self.settings.auto_link_enabled)
    }

    /// Replace the settings and persist them.
    ///
    /// The index is not rebuilt; call [`scan_vault`](Self::scan_vault) to
    /// apply new length, ignore, or case rules to existing entries.
    pub async fn update_settings<St>(&mut self, settings: Settings, store: &St) -> Result<()>
    where
        St: SettingsStore + ?Sized,
    {
        self.settings = settings;
        store.save(&self.settings).await
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn index(&self) -> &TermIndex {
        &self.index
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}
