//! `autolink settings`: inspect and change the persisted linker settings.
//!
//! Values typed at the command line go through the same forgiving parsers
//! the settings UI uses: a minimum length that is not a positive number
//! falls back to the default, and the ignore list is split on commas.

use anyhow::{bail, Result};
use autolinker_core::linker::AutoLinker;
use autolinker_core::settings::{parse_ignored_words, parse_min_word_length, Settings};

use crate::config::Config;
use crate::notify::ConsoleNotifier;
use crate::scan::Host;

/// Keys accepted by `autolink settings set`.
pub const SETTING_KEYS: &[&str] = &[
    "min-word-length",
    "ignored-words",
    "case-sensitive",
    "scan-on-startup",
    "auto-link",
];

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => bail!("Invalid value for {}: '{}'. Use true or false.", key, other),
    }
}

/// Apply one `key = value` change to `settings`.
pub fn apply_setting(settings: &mut Settings, key: &str, value: &str) -> Result<()> {
    match key {
        "min-word-length" => settings.min_word_length = parse_min_word_length(value),
        "ignored-words" => settings.ignored_words = parse_ignored_words(value),
        "case-sensitive" => settings.case_sensitive = parse_bool(key, value)?,
        "scan-on-startup" => settings.scan_on_startup = parse_bool(key, value)?,
        "auto-link" => settings.auto_link_enabled = parse_bool(key, value)?,
        other => bail!(
            "Unknown setting: '{}'. Known settings: {}",
            other,
            SETTING_KEYS.join(", ")
        ),
    }
    Ok(())
}

fn print_settings(host: &Host, settings: &Settings) -> Result<()> {
    println!("settings {}", host.store.path().display());
    println!("  min-word-length: {}", settings.min_word_length);
    println!("  ignored-words: {}", settings.ignored_words_display());
    println!("  case-sensitive: {}", settings.case_sensitive);
    println!("  scan-on-startup: {}", settings.scan_on_startup);
    println!("  auto-link: {}", settings.auto_link_enabled);
    Ok(())
}

pub async fn run_settings_show(config: &Config, json: bool) -> Result<()> {
    let host = Host::open(config)?;
    let settings = host.settings().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }
    print_settings(&host, &settings)
}

pub async fn run_settings_set(config: &Config, key: &str, value: &str) -> Result<()> {
    let host = Host::open(config)?;
    let current = host.settings().await?;
    let mut updated = current.clone();
    apply_setting(&mut updated, key, value)?;

    let mut linker = AutoLinker::new(current);
    linker.update_settings(updated, &host.store).await?;
    print_settings(&host, linker.settings())
}

pub async fn run_settings_toggle(config: &Config) -> Result<()> {
    let host = Host::open(config)?;
    let mut linker = AutoLinker::new(host.settings().await?);
    linker
        .toggle_auto_link(&host.store, &ConsoleNotifier::new())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_length_falls_back() {
        let mut settings = Settings::default();
        apply_setting(&mut settings, "min-word-length", "7").unwrap();
        assert_eq!(settings.min_word_length, 7);
        apply_setting(&mut settings, "min-word-length", "abc").unwrap();
        assert_eq!(settings.min_word_length, 3);
    }

    #[test]
    fn test_ignored_words_and_bools() {
        let mut settings = Settings::default();
        apply_setting(&mut settings, "ignored-words", "Foo, bar ,,").unwrap();
        assert!(settings.is_ignored("foo"));
        assert!(settings.is_ignored("BAR"));
        assert!(!settings.is_ignored("the"));

        apply_setting(&mut settings, "auto-link", "off").unwrap();
        assert!(!settings.auto_link_enabled);
        assert!(apply_setting(&mut settings, "case-sensitive", "maybe").is_err());
        assert!(apply_setting(&mut settings, "colour", "red").is_err());
    }
}
