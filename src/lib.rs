//! # Autolinker
//!
//! Automatic wiki-link insertion for a vault of Markdown notes.
//!
//! Every document in the vault contributes its words to a term index. When
//! a line is edited or text is pasted into an open note, words that some
//! *other* document owns are rewritten in place as `[[word]]` links. Each
//! link is recorded so the most recent one can be undone.
//!
//! The engine itself lives in [`autolinker_core`] and never touches the
//! filesystem; this crate is the native host around it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌──────────────┐
//! │    Vault    │──▶│  Term index  │──▶│   Matcher    │
//! │ (walkdir)   │   │ term → owner │   │ line → links │
//! └─────────────┘   └──────────────┘   └──────┬───────┘
//!                                             │
//!                      ┌──────────────────────┤
//!                      ▼                      ▼
//!                 ┌──────────┐          ┌──────────┐
//!                 │ Rewrite  │─────────▶│ History  │
//!                 │ [[word]] │          │  (undo)  │
//!                 └──────────┘          └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! autolink scan                      # index the vault
//! autolink terms --owner apple.md    # terms a document owns
//! autolink link notes/today.md       # link a whole document
//! autolink session < events.jsonl    # replay editor events
//! autolink settings set min-word-length 5
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`vault`] | Filesystem vault (document listing, reads, writes) |
//! | [`settings_store`] | JSON persistence for linker settings |
//! | [`scan`] | `scan` and `terms` commands, host wiring |
//! | [`link`] | One-shot linking of a whole document |
//! | [`session`] | JSON-lines editor event loop |
//! | [`settings_cmd`] | `settings show`, `set`, `toggle` |
//! | [`notify`] | Console notifications |
//! | [`progress`] | Scan progress on stderr |
//! | [`logging`] | Tracing subscriber setup |

pub mod config;
pub mod link;
pub mod logging;
pub mod notify;
pub mod progress;
pub mod scan;
pub mod session;
pub mod settings_cmd;
pub mod settings_store;
pub mod vault;
