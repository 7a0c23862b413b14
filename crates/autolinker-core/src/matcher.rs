//! Match engine.
//!
//! Finds the words of a single line that should become references. A word
//! qualifies when:
//!
//! 1. its cleaned form is at least `min_word_length` characters and not
//!    ignored,
//! 2. its normalized term is in the [`TermIndex`],
//! 3. the owning document is not the document being edited, and
//! 4. it does not already contain a reference marker.
//!
//! Matches come back left to right, positioned against the line as given.
//!
//! Markers are checked per word only. The inner words of a multi-word
//! reference such as `[[my banana tree]]` carry no marker themselves and
//! still match.

use crate::index::TermIndex;
use crate::models::{is_linked, Match, Position};
use crate::normalize::{clean_word, normalize, qualifies, words};
use crate::settings::Settings;

/// Find every rewritable word in `line`, which is line `line_number` of
/// the buffer editing `current_document`.
pub fn find_matches(
    line: &str,
    line_number: usize,
    current_document: &str,
    index: &TermIndex,
    settings: &Settings,
) -> Vec<Match> {
    find_matches_at(line, Position::new(line_number, 0), current_document, index, settings)
}

/// [`find_matches`] for text that begins at `origin` rather than column 0.
pub fn find_matches_at(
    text: &str,
    origin: Position,
    current_document: &str,
    index: &TermIndex,
    settings: &Settings,
) -> Vec<Match> {
    let mut matches = Vec::new();

    for (offset, raw) in words(text) {
        let clean = clean_word(raw);
        if !qualifies(clean, settings) {
            continue;
        }

        let term = normalize(raw, settings.case_sensitive);
        let Some(owner) = index.get(&term) else {
            continue;
        };
        if owner == current_document {
            continue;
        }
        if is_linked(raw) {
            tracing::debug!(word = raw, "already referenced");
            continue;
        }

        let start = origin.offset(offset);
        matches.push(Match {
            term,
            raw_word: raw.to_string(),
            owner: owner.to_string(),
            start,
            end: start.offset(raw.chars().count()),
        });
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_index() -> TermIndex {
        let mut index = TermIndex::new();
        index.update("The Banana Tree", "apple.md", &Settings::default());
        index
    }

    #[test]
    fn test_banana_bread() {
        let matches = find_matches(
            "I love banana bread",
            4,
            "other.md",
            &fruit_index(),
            &Settings::default(),
        );
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.term, "banana");
        assert_eq!(m.raw_word, "banana");
        assert_eq!(m.owner, "apple.md");
        assert_eq!(m.start, Position::new(4, 7));
        assert_eq!(m.end, Position::new(4, 13));
    }

    #[test]
    fn test_never_self_links() {
        let matches = find_matches(
            "banana tree",
            0,
            "apple.md",
            &fruit_index(),
            &Settings::default(),
        );
        assert!(matches.is_empty());
    }

    #[test]
    fn test_skips_existing_references() {
        let matches = find_matches(
            "[[banana]] and [[banana tree]] tree]]",
            0,
            "other.md",
            &fruit_index(),
            &Settings::default(),
        );
        assert!(matches.is_empty());
    }

    #[test]
    fn test_inner_word_of_multi_word_reference_still_matches() {
        let matches = find_matches(
            "see [[my banana tree]]",
            0,
            "other.md",
            &fruit_index(),
            &Settings::default(),
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].raw_word, "banana");
        assert_eq!(matches[0].start, Position::new(0, 9));
        assert_eq!(matches[0].end, Position::new(0, 15));
    }

    #[test]
    fn test_min_length_suppresses_match() {
        let mut index = TermIndex::new();
        index.update("apple", "fruit.md", &Settings::default());
        let mut settings = Settings::default();
        settings.min_word_length = 6;
        let matches = find_matches("an apple a day", 0, "other.md", &index, &settings);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_ignored_word_not_matched_even_if_indexed() {
        let mut index = TermIndex::new();
        index.update("during", "time.md", &Settings::default());
        let mut settings = Settings::default();
        settings.ignored_words.insert("during".to_string());
        let matches = find_matches("During lunch", 0, "other.md", &index, &settings);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_punctuation_kept_in_raw_word() {
        let matches = find_matches(
            "Bananas? No, Banana!",
            0,
            "other.md",
            &fruit_index(),
            &Settings::default(),
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].raw_word, "Banana!");
        assert_eq!(matches[0].term, "banana");
        assert_eq!(matches[0].start.ch, 13);
        assert_eq!(matches[0].end.ch, 20);
    }

    #[test]
    fn test_repeated_words_get_distinct_spans() {
        let matches = find_matches(
            "tree by the tree",
            2,
            "other.md",
            &fruit_index(),
            &Settings::default(),
        );
        let starts: Vec<usize> = matches.iter().map(|m| m.start.ch).collect();
        assert_eq!(starts, vec![0, 12]);
    }

    #[test]
    fn test_case_sensitive_lookup() {
        let mut settings = Settings::default();
        settings.case_sensitive = true;
        let mut index = TermIndex::new();
        index.update("Rust", "lang.md", &settings);
        assert!(find_matches("rust belt", 0, "x.md", &index, &settings).is_empty());
        assert_eq!(find_matches("Rust belt", 0, "x.md", &index, &settings).len(), 1);
    }

    #[test]
    fn test_origin_offset() {
        let matches = find_matches_at(
            "fresh banana",
            Position::new(3, 10),
            "other.md",
            &fruit_index(),
            &Settings::default(),
        );
        assert_eq!(matches[0].start, Position::new(3, 16));
    }
}
