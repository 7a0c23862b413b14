//! # Autolinker CLI (`autolink`)
//!
//! Indexes a Markdown vault and turns words owned by other notes into
//! `[[wiki links]]`.
//!
//! ## Usage
//!
//! ```bash
//! autolink --config ./autolink.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `autolink scan` | Rebuild the term index and report counts |
//! | `autolink terms` | List indexed terms and their owning documents |
//! | `autolink link <document>` | Link every line of one document |
//! | `autolink session` | Replay editor events read from stdin |
//! | `autolink settings show` | Print the persisted settings |
//! | `autolink settings set <key> <value>` | Change one setting |
//! | `autolink settings toggle` | Flip auto-linking on or off |
//! | `autolink completions <shell>` | Print shell completions |

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use autolinker::progress::ProgressMode;
use autolinker::{config, link, logging, scan, session, settings_cmd};

/// Autolinker CLI: automatic wiki links for a Markdown vault.
///
/// All commands except `completions` read a TOML configuration file
/// naming the vault root.
#[derive(Parser)]
#[command(
    name = "autolink",
    about = "Automatic wiki-link insertion for Markdown vaults",
    version,
    long_about = "Autolinker indexes every word of every note in a vault and rewrites \
    words owned by other notes as [[wiki links]], keeping a history so the most recent \
    link can be undone."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./autolink.toml`.
    #[arg(long, global = true, default_value = "./autolink.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the term index from every document in the vault.
    Scan {
        /// Print the scan report as JSON.
        #[arg(long)]
        json: bool,

        /// Progress output on stderr. Defaults to `human` when stderr is a
        /// terminal.
        #[arg(long, value_enum)]
        progress: Option<ProgressMode>,
    },

    /// List indexed terms and the document that owns each one.
    Terms {
        /// Only show terms owned by this document.
        #[arg(long)]
        owner: Option<String>,

        /// Print the terms as JSON.
        #[arg(long)]
        json: bool,

        #[arg(long, value_enum)]
        progress: Option<ProgressMode>,
    },

    /// Link every line of a document against the rest of the vault.
    Link {
        /// Document id, relative to the vault root (e.g. `notes/today.md`).
        document: String,

        /// Print the linked text instead of writing it back.
        #[arg(long)]
        dry_run: bool,

        #[arg(long, value_enum)]
        progress: Option<ProgressMode>,
    },

    /// Read editor events as JSON lines from stdin.
    ///
    /// Each line is one command, e.g. `{"cmd":"open","document":"a.md"}`
    /// or `{"cmd":"edit","line":0,"text":"I love banana bread"}`.
    Session,

    /// Inspect or change the linker settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish).
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current settings.
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Change one setting.
    ///
    /// Keys: `min-word-length`, `ignored-words` (comma-separated),
    /// `case-sensitive`, `scan-on-startup`, `auto-link`.
    Set { key: String, value: String },

    /// Flip auto-linking on or off.
    Toggle,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "autolink", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Scan { json, progress } => {
            scan::run_scan(&cfg, json, ProgressMode::resolve(progress)).await?;
        }
        Commands::Terms {
            owner,
            json,
            progress,
        } => {
            scan::run_terms(&cfg, owner, json, ProgressMode::resolve(progress)).await?;
        }
        Commands::Link {
            document,
            dry_run,
            progress,
        } => {
            link::run_link(&cfg, &document, dry_run, ProgressMode::resolve(progress)).await?;
        }
        Commands::Session => {
            session::run_session(&cfg).await?;
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show { json } => settings_cmd::run_settings_show(&cfg, json).await?,
            SettingsAction::Set { key, value } => {
                settings_cmd::run_settings_set(&cfg, &key, &value).await?
            }
            SettingsAction::Toggle => settings_cmd::run_settings_toggle(&cfg).await?,
        },
        Commands::Completions { .. } => unreachable!("handled before config load"),
    }

    Ok(())
}
