//! User-facing linker settings.
//!
//! Persisted settings are untrusted: [`Settings::overlay`] merges whatever
//! was loaded onto the defaults one field at a time, keeping the default
//! for any field that is missing, mistyped, or out of range.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Fallback used for missing or malformed `minWordLength` values.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;

const DEFAULT_IGNORED_WORDS: [&str; 4] = ["the", "and", "but", "for"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Words shorter than this (in characters, after punctuation stripping)
    /// are never indexed or linked.
    pub min_word_length: usize,
    /// Words never indexed or linked. Compared case-insensitively.
    pub ignored_words: BTreeSet<String>,
    pub case_sensitive: bool,
    /// Rebuild the term index when the linker is loaded.
    pub scan_on_startup: bool,
    /// Master switch for both ingestion paths.
    pub auto_link_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            ignored_words: DEFAULT_IGNORED_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
            case_sensitive: false,
            scan_on_startup: true,
            auto_link_enabled: true,
        }
    }
}

impl Settings {
    /// Merge loaded data onto the defaults, field by field.
    pub fn overlay(data: &Value) -> Self {
        let mut settings = Self::default();
        let Some(obj) = data.as_object() else {
            return settings;
        };

        if let Some(v) = obj.get("minWordLength") {
            settings.min_word_length = match v {
                Value::Number(n) => n
                    .as_u64()
                    .filter(|n| *n >= 1)
                    .map(|n| n as usize)
                    .unwrap_or(DEFAULT_MIN_WORD_LENGTH),
                Value::String(s) => parse_min_word_length(s),
                _ => DEFAULT_MIN_WORD_LENGTH,
            };
        }

        match obj.get("ignoredWords") {
            Some(Value::Array(items)) => {
                settings.ignored_words = items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|w| w.trim().to_lowercase())
                    .filter(|w| !w.is_empty())
                    .collect();
            }
            Some(Value::String(s)) => settings.ignored_words = parse_ignored_words(s),
            _ => {}
        }

        if let Some(b) = obj.get("caseSensitive").and_then(Value::as_bool) {
            settings.case_sensitive = b;
        }
        if let Some(b) = obj.get("scanOnStartup").and_then(Value::as_bool) {
            settings.scan_on_startup = b;
        }
        if let Some(b) = obj.get("autoLinkEnabled").and_then(Value::as_bool) {
            settings.auto_link_enabled = b;
        }

        settings
    }

    /// Case-insensitive ignore-list check against a cleaned word.
    pub fn is_ignored(&self, clean_word: &str) -> bool {
        self.ignored_words.contains(&clean_word.to_lowercase())
    }

    /// Ignore list as the comma-separated form shown in settings forms.
    pub fn ignored_words_display(&self) -> String {
        self.ignored_words
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse a minimum word length typed by the user.
///
/// Non-numeric input and values below 1 fall back to
/// [`DEFAULT_MIN_WORD_LENGTH`].
pub fn parse_min_word_length(input: &str) -> usize {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
        .unwrap_or(DEFAULT_MIN_WORD_LENGTH)
}

/// Parse a comma-separated ignore list (`"the, and,But"`).
pub fn parse_ignored_words(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.min_word_length, 3);
        assert_eq!(s.ignored_words_display(), "and, but, for, the");
        assert!(!s.case_sensitive);
        assert!(s.scan_on_startup);
        assert!(s.auto_link_enabled);
    }

    #[test]
    fn test_overlay_partial() {
        let s = Settings::overlay(&json!({ "minWordLength": 5, "caseSensitive": true }));
        assert_eq!(s.min_word_length, 5);
        assert!(s.case_sensitive);
        assert!(s.auto_link_enabled);
        assert!(s.ignored_words.contains("the"));
    }

    #[test]
    fn test_overlay_rejects_bad_fields() {
        let s = Settings::overlay(&json!({
            "minWordLength": "lots",
            "caseSensitive": "yes",
            "autoLinkEnabled": 0,
            "ignoredWords": 42,
        }));
        assert_eq!(s, Settings::default());

        let s = Settings::overlay(&json!({ "minWordLength": 0 }));
        assert_eq!(s.min_word_length, DEFAULT_MIN_WORD_LENGTH);

        let s = Settings::overlay(&json!({ "minWordLength": -4 }));
        assert_eq!(s.min_word_length, DEFAULT_MIN_WORD_LENGTH);
    }

    #[test]
    fn test_overlay_non_object() {
        assert_eq!(Settings::overlay(&Value::Null), Settings::default());
        assert_eq!(Settings::overlay(&json!([1, 2, 3])), Settings::default());
    }

    #[test]
    fn test_overlay_ignored_words_forms() {
        let s = Settings::overlay(&json!({ "ignoredWords": ["The", " with ", "", 7] }));
        assert_eq!(s.ignored_words_display(), "the, with");

        let s = Settings::overlay(&json!({ "ignoredWords": "from, INTO" }));
        assert_eq!(s.ignored_words_display(), "from, into");
    }

    #[test]
    fn test_overlay_numeric_string() {
        let s = Settings::overlay(&json!({ "minWordLength": " 4 " }));
        assert_eq!(s.min_word_length, 4);
    }

    #[test]
    fn test_roundtrip_through_json() {
        let mut s = Settings::default();
        s.min_word_length = 6;
        s.auto_link_enabled = false;
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["minWordLength"], 6);
        assert_eq!(Settings::overlay(&v), s);
    }

    #[test]
    fn test_parse_min_word_length() {
        assert_eq!(parse_min_word_length("7"), 7);
        assert_eq!(parse_min_word_length("abc"), 3);
        assert_eq!(parse_min_word_length(""), 3);
        assert_eq!(parse_min_word_length("0"), 3);
    }

    #[test]
    fn test_is_ignored_case_insensitive() {
        let s = Settings::default();
        assert!(s.is_ignored("The"));
        assert!(s.is_ignored("AND"));
        assert!(!s.is_ignored("banana"));
    }
}
