//! Positional rewriting and undo.
//!
//! Applying a [`Match`] wraps the raw word in reference markers and pushes
//! a [`HistoryEntry`]. Undo pops the newest entry and swaps the reference
//! back for the bare word.
//!
//! Matches on one line are applied right to left, so the positions computed
//! against the unmodified line stay valid and every recorded position is
//! exact. Undoing in LIFO order then reverts leftmost first, which leaves
//! the remaining entries' positions untouched.

use crate::history::History;
use crate::host::{Notifier, TextBuffer};
use crate::models::{render_link, HistoryEntry, Match, MARKER_LEN};

/// What an undo request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// History was empty.
    Empty,
    /// No editor is active; history untouched.
    NoActiveBuffer,
    /// The newest entry belongs to another document. It stays on the stack.
    WrongDocument(HistoryEntry),
    /// The span no longer holds the reference. The entry was discarded.
    Stale(HistoryEntry),
    /// The reference was replaced by the bare word.
    Reverted(HistoryEntry),
}

/// Wrap one match in reference markers and record it.
pub fn apply_match(
    m: &Match,
    document_id: &str,
    buffer: &mut dyn TextBuffer,
    history: &mut History,
    notifier: &dyn Notifier,
) {
    buffer.replace_range(&render_link(&m.raw_word), m.start, m.end);
    history.push(HistoryEntry {
        text: m.raw_word.clone(),
        position: m.start,
        file: document_id.to_string(),
    });
    tracing::debug!(word = %m.raw_word, owner = %m.owner, line = m.start.line, ch = m.start.ch, "linked");
    notifier.notify(&format!("Linked \"{}\" to {}", m.raw_word, m.owner));
}

/// Apply a batch of matches from a single line, rightmost first.
///
/// Returns the number applied.
pub fn apply_matches(
    matches: &[Match],
    document_id: &str,
    buffer: &mut dyn TextBuffer,
    history: &mut History,
    notifier: &dyn Notifier,
) -> usize {
    let mut ordered: Vec<&Match> = matches.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));
    for m in &ordered {
        apply_match(m, document_id, buffer, history, notifier);
    }
    ordered.len()
}

/// Revert the most recent rewrite.
pub fn undo(
    history: &mut History,
    buffer: Option<&mut dyn TextBuffer>,
    notifier: &dyn Notifier,
) -> UndoOutcome {
    if history.is_empty() {
        return UndoOutcome::Empty;
    }
    let Some(buffer) = buffer else {
        return UndoOutcome::NoActiveBuffer;
    };
    let Some(entry) = history.pop() else {
        return UndoOutcome::Empty;
    };

    if buffer.document_id() != entry.file {
        notifier.notify(&format!(
            "Last link is in {}; open it to undo",
            entry.file
        ));
        history.push(entry.clone());
        return UndoOutcome::WrongDocument(entry);
    }

    let start = entry.position;
    let end = start.offset(entry.text.chars().count() + MARKER_LEN);
    let expected = render_link(&entry.text);
    let current = buffer.line(start.line).map(|line| {
        line.chars()
            .skip(start.ch)
            .take(end.ch - start.ch)
            .collect::<String>()
    });
    if current.as_deref() != Some(expected.as_str()) {
        tracing::warn!(word = %entry.text, line = start.line, ch = start.ch, "link moved; undo skipped");
        notifier.notify(&format!(
            "Could not undo link \"{}\": the text has changed",
            entry.text
        ));
        return UndoOutcome::Stale(entry);
    }

    buffer.replace_range(&entry.text, start, end);
    notifier.notify(&format!("Removed link \"{}\"", entry.text));
    UndoOutcome::Reverted(entry)
}
