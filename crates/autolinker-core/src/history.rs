//! Rewrite history.
//!
//! An append/pop-only stack of [`HistoryEntry`] records. Entries live until
//! they are undone; the stack is unbounded and never persisted.

use crate::models::HistoryEntry;

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Remove and return the most recent entry.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn entry(text: &str, ch: usize) -> HistoryEntry {
        HistoryEntry {
            text: text.to_string(),
            position: Position::new(0, ch),
            file: "a.md".to_string(),
        }
    }

    #[test]
    fn test_lifo() {
        let mut h = History::new();
        h.push(entry("first", 0));
        h.push(entry("second", 10));
        assert_eq!(h.len(), 2);
        assert_eq!(h.entries().last().unwrap().text, "second");
        assert_eq!(h.pop().unwrap().text, "second");
        assert_eq!(h.pop().unwrap().text, "first");
        assert!(h.pop().is_none());
        assert!(h.is_empty());
    }
}
