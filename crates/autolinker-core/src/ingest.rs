//! Change ingestion.
//!
//! Turns editor events into match-and-rewrite passes. Two events are
//! understood:
//!
//! - [`EditorEvent::Changed`]: the buffer changed. The whole cursor line is
//!   rescanned on every event; there is no debouncing or diffing.
//! - [`EditorEvent::Pasted`]: text was inserted at a known position. Each
//!   pasted line is scanned at `at.line + i`, the first one shifted by
//!   `at.ch`. Rewrites never add line breaks, so these positions hold for
//!   the whole paste.
//!
//! Both are no-ops while auto-linking is disabled.

use serde::Deserialize;

use crate::history::History;
use crate::host::{Notifier, TextBuffer};
use crate::index::TermIndex;
use crate::matcher::{find_matches, find_matches_at};
use crate::models::Position;
use crate::rewrite::apply_matches;
use crate::settings::Settings;

/// An event delivered by the host editor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum EditorEvent {
    Changed,
    Pasted { text: String, at: Position },
}

/// Shared state an ingestion pass reads and writes.
pub struct IngestContext<'a> {
    pub index: &'a TermIndex,
    pub settings: &'a Settings,
    pub history: &'a mut History,
    pub notifier: &'a dyn Notifier,
}

/// Rescan the cursor line and link every match. Returns links created.
pub fn on_line_changed(ctx: &mut IngestContext<'_>, buffer: &mut dyn TextBuffer) -> usize {
    if !ctx.settings.auto_link_enabled {
        return 0;
    }
    let cursor = buffer.cursor();
    let Some(line) = buffer.line(cursor.line) else {
        return 0;
    };
    let document_id = buffer.document_id().to_string();

    let matches = find_matches(&line, cursor.line, &document_id, ctx.index, ctx.settings);
    apply_matches(&matches, &document_id, buffer, ctx.history, ctx.notifier)
}

/// Link every match inside pasted text. Returns links created.
pub fn on_paste(
    ctx: &mut IngestContext<'_>,
    buffer: &mut dyn TextBuffer,
    text: &str,
    at: Position,
) -> usize {
    if !ctx.settings.auto_link_enabled {
        return 0;
    }
    let document_id = buffer.document_id().to_string();

    let mut linked = 0;
    for (i, pasted_line) in text.split('\n').enumerate() {
        let origin = if i == 0 {
            at
        } else {
            Position::new(at.line + i, 0)
        };
        let pasted_line = pasted_line.strip_suffix('\r').unwrap_or(pasted_line);
        let matches = find_matches_at(pasted_line, origin, &document_id, ctx.index, ctx.settings);
        linked += apply_matches(&matches, &document_id, buffer, ctx.history, ctx.notifier);
    }
    linked
}

/// Dispatch one event.
pub fn dispatch(ctx: &mut IngestContext<'_>, event: &EditorEvent, buffer: &mut dyn TextBuffer) -> usize {
    match event {
        EditorEvent::Changed => on_line_changed(ctx, buffer),
        EditorEvent::Pasted { text, at } => on_paste(ctx, buffer, text, *at),
    }
}
