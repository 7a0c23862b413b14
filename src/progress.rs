//! Scan progress on stderr.
//!
//! [`ScanProgress`] is fed straight from the term index's `(n, total)`
//! callback while the vault is read, then closed with the finished
//! [`ScanReport`] so skipped notes are visible. stdout is left to the
//! command's own output.

use autolinker_core::index::ScanReport;
use clap::ValueEnum;
use std::io::Write;

/// `--progress` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ProgressMode {
    /// Nothing.
    Off,
    /// One status line, redrawn in place.
    Human,
    /// One JSON object per line.
    Json,
}

impl ProgressMode {
    /// The explicit flag, or human output when stderr is a terminal.
    pub fn resolve(flag: Option<ProgressMode>) -> Self {
        flag.unwrap_or_else(|| {
            if atty::is(atty::Stream::Stderr) {
                ProgressMode::Human
            } else {
                ProgressMode::Off
            }
        })
    }
}

/// Progress sink for one vault scan.
pub struct ScanProgress {
    mode: ProgressMode,
}

impl ScanProgress {
    pub fn new(mode: ProgressMode) -> Self {
        Self { mode }
    }

    /// Document `n` of `total` has been read (or skipped).
    pub fn document_done(&self, n: usize, total: usize) {
        if let Some(line) = self.indexing_line(n, total) {
            emit(&line);
        }
    }

    /// The scan is over.
    pub fn finish(&self, report: &ScanReport) {
        if let Some(line) = self.finish_line(report) {
            emit(&line);
        }
    }

    fn indexing_line(&self, n: usize, total: usize) -> Option<String> {
        match self.mode {
            ProgressMode::Off => None,
            ProgressMode::Human => Some(format!("\rindexing {}/{} notes", n, total)),
            ProgressMode::Json => Some(format!(
                "{}\n",
                serde_json::json!({ "event": "indexing", "n": n, "total": total })
            )),
        }
    }

    fn finish_line(&self, report: &ScanReport) -> Option<String> {
        match self.mode {
            ProgressMode::Off => None,
            ProgressMode::Human if report.documents_skipped > 0 => Some(format!(
                "\rindexed {} notes, {} unreadable\n",
                report.documents_scanned, report.documents_skipped
            )),
            ProgressMode::Human => Some(format!("\rindexed {} notes\n", report.documents_scanned)),
            ProgressMode::Json => Some(format!(
                "{}\n",
                serde_json::json!({
                    "event": "done",
                    "scanned": report.documents_scanned,
                    "skipped": report.documents_skipped,
                    "terms": report.terms,
                })
            )),
        }
    }
}

fn emit(line: &str) {
    let mut err = std::io::stderr().lock();
    let _ = err.write_all(line.as_bytes());
    let _ = err.flush();
}
