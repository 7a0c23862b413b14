//! `autolink link <document>`: link a whole document in one pass.
//!
//! Opens the document as a buffer and replays the line-edit path with the
//! cursor on each line in turn, exactly as if the user had touched every
//! line in the editor.

use anyhow::{bail, Result};
use autolinker_core::host::memory::MemoryBuffer;
use autolinker_core::host::{DocumentSource, TextBuffer};
use autolinker_core::ingest::EditorEvent;
use autolinker_core::linker::AutoLinker;
use autolinker_core::models::Position;

use crate::config::Config;
use crate::notify::ConsoleNotifier;
use crate::progress::ProgressMode;
use crate::scan::Host;

/// Run the line-edit path over every line of `buffer`. Returns links created.
pub fn link_buffer(
    linker: &mut AutoLinker,
    buffer: &mut MemoryBuffer,
    notifier: &ConsoleNotifier,
) -> usize {
    let mut linked = 0;
    for line in 0..buffer.line_count() {
        buffer.set_cursor(Position::new(line, 0));
        let active: &mut dyn TextBuffer = &mut *buffer;
        linked += linker.handle_event(&EditorEvent::Changed, Some(active), notifier);
    }
    linked
}

pub async fn run_link(
    config: &Config,
    document: &str,
    dry_run: bool,
    progress: ProgressMode,
) -> Result<()> {
    let host = Host::open(config)?;
    if !host.vault.scan_ids()?.iter().any(|id| id == document) {
        bail!("Unknown document: '{}'", document);
    }

    let notifier = if dry_run {
        ConsoleNotifier::quiet()
    } else {
        ConsoleNotifier::new()
    };
    let (mut linker, _) = host.indexed_linker(&notifier, progress).await?;
    if !linker.settings().auto_link_enabled {
        println!("auto-linking is disabled; nothing to do");
        return Ok(());
    }

    let text = host.vault.read_document(document).await?;
    let mut buffer = MemoryBuffer::new(document, &text);
    let linked = link_buffer(&mut linker, &mut buffer, &notifier);

    if dry_run {
        print!("{}", buffer.text());
        if !buffer.text().ends_with('\n') {
            println!();
        }
        return Ok(());
    }

    if buffer.is_dirty() {
        host.vault.write_document(document, &buffer.text()).await?;
    }
    println!("link {}", document);
    println!("  links created: {}", linked);
    println!("ok");
    Ok(())
}
