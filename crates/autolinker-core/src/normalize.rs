//! Tokenizer and term normalizer.
//!
//! A raw word is any run of non-whitespace characters. Normalizing it
//! strips punctuation from both ends (never from the middle) and, unless
//! the linker is case-sensitive, lower-cases the result.
//!
//! # Example
//!
//! ```rust
//! use autolinker_core::normalize::{normalize, words};
//!
//! assert_eq!(normalize("(Banana!)", false), "banana");
//! assert_eq!(normalize("don't", true), "don't");
//!
//! let w: Vec<_> = words("I  love bread").collect();
//! assert_eq!(w, vec![(0, "I"), (3, "love"), (8, "bread")]);
//! ```

use crate::settings::Settings;

/// Characters stripped from the ends of a raw word.
const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '\'', '"', '(', ')', '[', ']', '{', '}', '<', '>', '*', '_',
    '~', '`',
];

fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Strip leading and trailing punctuation, preserving case.
pub fn clean_word(raw: &str) -> &str {
    raw.trim_matches(is_punctuation)
}

/// Normalize a raw word into an index term.
///
/// Pure and idempotent: `normalize(&normalize(w, cs), cs) == normalize(w, cs)`.
/// A word made only of punctuation normalizes to the empty string.
pub fn normalize(raw: &str, case_sensitive: bool) -> String {
    let clean = clean_word(raw);
    if case_sensitive {
        clean.to_string()
    } else {
        clean.to_lowercase()
    }
}

/// Returns true if the cleaned word passes the length and ignore filters.
pub fn qualifies(clean: &str, settings: &Settings) -> bool {
    clean.chars().count() >= settings.min_word_length && !settings.is_ignored(clean)
}

/// Split a line into whitespace-separated words with their character offsets.
///
/// Offsets are tracked while scanning, so repeated words on one line each
/// get their own offset.
pub fn words(line: &str) -> Words<'_> {
    Words {
        line,
        byte_pos: 0,
        char_pos: 0,
    }
}

/// Iterator returned by [`words`].
pub struct Words<'a> {
    line: &'a str,
    byte_pos: usize,
    char_pos: usize,
}

impl<'a> Iterator for Words<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.line[self.byte_pos..];

        let mut skipped_bytes = 0;
        let mut skipped_chars = 0;
        for c in rest.chars() {
            if !c.is_whitespace() {
                break;
            }
            skipped_bytes += c.len_utf8();
            skipped_chars += 1;
        }
        if skipped_bytes == rest.len() {
            self.byte_pos = self.line.len();
            return None;
        }

        let start_byte = self.byte_pos + skipped_bytes;
        let start_char = self.char_pos + skipped_chars;
        let word_rest = &self.line[start_byte..];
        let word_len = word_rest
            .find(char::is_whitespace)
            .unwrap_or(word_rest.len());
        let word = &word_rest[..word_len];

        self.byte_pos = start_byte + word_len;
        self.char_pos = start_char + word.chars().count();
        Some((start_char, word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_both_ends_only() {
        assert_eq!(normalize("\"Hello,\"", false), "hello");
        assert_eq!(normalize("e.g.", false), "e.g");
        assert_eq!(normalize("rock'n'roll", false), "rock'n'roll");
        assert_eq!(normalize("((nested))", false), "nested");
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(normalize("Banana", false), "banana");
        assert_eq!(normalize("Banana", true), "Banana");
        assert_eq!(clean_word("Banana!"), "Banana");
    }

    #[test]
    fn test_punctuation_only_is_empty() {
        assert_eq!(normalize("...", false), "");
        assert_eq!(normalize("?!", true), "");
        assert!(!qualifies(clean_word("!!!"), &Settings::default()));
    }

    #[test]
    fn test_idempotent() {
        for w in ["Banana,", "(Tree)", "[[link]]", "...", "ÉCOLE!", "a.b.c.", "x"] {
            for cs in [true, false] {
                let once = normalize(w, cs);
                assert_eq!(normalize(&once, cs), once, "not idempotent for {:?}", w);
            }
        }
    }

    #[test]
    fn test_qualifies() {
        let s = Settings::default();
        assert!(qualifies("banana", &s));
        assert!(!qualifies("ox", &s));
        assert!(!qualifies("The", &s));
        assert!(qualifies("été", &s));
    }

    #[test]
    fn test_words_offsets() {
        let w: Vec<_> = words("  the cat\tsat ").collect();
        assert_eq!(w, vec![(2, "the"), (6, "cat"), (10, "sat")]);
    }

    #[test]
    fn test_words_repeated() {
        let w: Vec<_> = words("tree and tree").collect();
        assert_eq!(w, vec![(0, "tree"), (5, "and"), (9, "tree")]);
    }

    #[test]
    fn test_words_multibyte_offsets_in_chars() {
        let w: Vec<_> = words("café crème brûlée").collect();
        assert_eq!(w, vec![(0, "café"), (5, "crème"), (11, "brûlée")]);
    }

    #[test]
    fn test_words_empty() {
        assert_eq!(words("").count(), 0);
        assert_eq!(words("   \t ").count(), 0);
    }
}
