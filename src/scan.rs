//! Vault scanning: `autolink scan` and `autolink terms`.
//!
//! Also hosts the helpers every other command uses to open the vault,
//! restore the persisted settings, and build a fully indexed
//! [`AutoLinker`].

use anyhow::Result;
use autolinker_core::host::{Notifier, SettingsStore};
use autolinker_core::index::ScanReport;
use autolinker_core::linker::AutoLinker;
use autolinker_core::settings::Settings;
use serde::Serialize;

use crate::config::Config;
use crate::notify::ConsoleNotifier;
use crate::progress::{ProgressMode, ScanProgress};
use crate::settings_store::JsonSettingsStore;
use crate::vault::FilesystemVault;

/// The native collaborators behind one CLI invocation.
pub struct Host {
    pub vault: FilesystemVault,
    pub store: JsonSettingsStore,
}

impl Host {
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self {
            vault: FilesystemVault::open(&config.vault)?,
            store: JsonSettingsStore::new(config.settings_path()),
        })
    }

    /// Persisted settings merged over the defaults.
    pub async fn settings(&self) -> Result<Settings> {
        Ok(Settings::overlay(&self.store.load().await?))
    }

    /// A linker with the persisted settings and a freshly rebuilt index.
    pub async fn indexed_linker(
        &self,
        notifier: &dyn Notifier,
        progress: ProgressMode,
    ) -> Result<(AutoLinker, ScanReport)> {
        let mut linker = AutoLinker::new(self.settings().await?);
        let progress = ScanProgress::new(progress);
        let report = linker
            .scan_vault_with(&self.vault, notifier, |n, total| {
                progress.document_done(n, total)
            })
            .await?;
        progress.finish(&report);
        Ok((linker, report))
    }
}

#[derive(Serialize)]
struct TermRow<'a> {
    term: &'a str,
    owner: &'a str,
}

pub async fn run_scan(config: &Config, json: bool, progress: ProgressMode) -> Result<()> {
    let host = Host::open(config)?;
    let notifier = ConsoleNotifier::quiet();
    let (_, report) = host.indexed_linker(&notifier, progress).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("scan {}", host.vault.root().display());
    println!("  documents scanned: {}", report.documents_scanned);
    println!("  documents skipped: {}", report.documents_skipped);
    println!("  terms indexed: {}", report.terms);
    println!("ok");
    Ok(())
}

pub async fn run_terms(
    config: &Config,
    owner: Option<String>,
    json: bool,
    progress: ProgressMode,
) -> Result<()> {
    let host = Host::open(config)?;
    let notifier = ConsoleNotifier::quiet();
    let (linker, _) = host.indexed_linker(&notifier, progress).await?;

    let index = linker.index();
    let rows: Vec<TermRow> = match owner.as_deref() {
        Some(want) => index
            .terms_owned_by(want)
            .into_iter()
            .map(|term| TermRow { term, owner: want })
            .collect(),
        None => index
            .entries()
            .into_iter()
            .map(|(term, owner)| TermRow { term, owner })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{:<32} OWNER", "TERM");
    for row in &rows {
        println!("{:<32} {}", row.term, row.owner);
    }
    Ok(())
}
