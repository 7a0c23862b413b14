//! Term index: the cache of candidate link targets.
//!
//! Maps each normalized term to the document that owns it. Every write
//! overwrites, so after a scan each term belongs to the last scanned
//! document that contains it.
//!
//! Entries are never evicted individually. A term indexed for a document
//! survives edits and deletions of that document until another document
//! claims it or [`TermIndex::rebuild`] starts over from scratch.
//!
//! # Example
//!
//! ```rust
//! use autolinker_core::index::TermIndex;
//! use autolinker_core::settings::Settings;
//!
//! let mut index = TermIndex::new();
//! index.update("The Banana Tree", "apple.md", &Settings::default());
//! assert_eq!(index.get("banana"), Some("apple.md"));
//! assert_eq!(index.get("the"), None);
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::host::DocumentSource;
use crate::normalize::{clean_word, normalize, qualifies};
use crate::settings::Settings;

/// Outcome of a full rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Documents read and indexed.
    pub documents_scanned: usize,
    /// Documents whose read failed.
    pub documents_skipped: usize,
    /// Distinct terms in the index after the scan.
    pub terms: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TermIndex {
    terms: HashMap<String, String>,
}

impl TermIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every qualifying word of `text` as owned by `document_id`.
    pub fn update(&mut self, text: &str, document_id: &str, settings: &Settings) {
        for raw in text.split_whitespace() {
            let clean = clean_word(raw);
            if !qualifies(clean, settings) {
                continue;
            }
            let term = normalize(raw, settings.case_sensitive);
            self.terms.insert(term, document_id.to_string());
        }
    }

    /// Clear the index and rescan every document in `source`.
    pub async fn rebuild<S>(&mut self, source: &S, settings: &Settings) -> anyhow::Result<ScanReport>
    where
        S: DocumentSource + ?Sized,
    {
        self.rebuild_with(source, settings, |_, _| {}).await
    }

    /// Like [`rebuild`](Self::rebuild), calling `on_progress(n, total)`
    /// after each document.
    ///
    /// Fails only if the document listing itself fails; unreadable
    /// documents are skipped and counted.
    pub async fn rebuild_with<S, F>(
        &mut self,
        source: &S,
        settings: &Settings,
        mut on_progress: F,
    ) -> anyhow::Result<ScanReport>
    where
        S: DocumentSource + ?Sized,
        F: FnMut(usize, usize),
    {
        let ids = source.list_documents().await?;
        let total = ids.len();
        self.terms.clear();

        let mut report = ScanReport::default();
        for (n, id) in ids.iter().enumerate() {
            match source.read_document(id).await {
                Ok(text) => {
                    self.update(&text, id, settings);
                    report.documents_scanned += 1;
                }
                Err(e) => {
                    tracing::warn!(document = %id, error = %e, "skipping unreadable document");
                    report.documents_skipped += 1;
                }
            }
            on_progress(n + 1, total);
        }

        report.terms = self.terms.len();
        tracing::info!(
            documents = report.documents_scanned,
            skipped = report.documents_skipped,
            terms = report.terms,
            "term index rebuilt"
        );
        Ok(report)
    }

    /// Owning document for a normalized term.
    pub fn get(&self, term: &str) -> Option<&str> {
        self.terms.get(term).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// All `(term, owner)` pairs, sorted by term.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = self
            .terms
            .iter()
            .map(|(t, o)| (t.as_str(), o.as_str()))
            .collect();
        out.sort_unstable();
        out
    }

    /// Terms currently owned by `document_id`, sorted.
    pub fn terms_owned_by(&self, document_id: &str) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .terms
            .iter()
            .filter(|(_, owner)| owner.as_str() == document_id)
            .map(|(t, _)| t.as_str())
            .collect();
        out.sort_unstable();
        out
    }
}
