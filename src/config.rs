//! TOML configuration for the `autolink` CLI.
//!
//! The config file tells the CLI where the vault lives, which files count
//! as documents, and where the linker settings are persisted. The linker
//! settings themselves (minimum word length, ignore list, ...) live in a
//! separate JSON file managed by [`crate::settings_store`].

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::vault::build_globset;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub vault: VaultConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VaultConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string()]
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettingsConfig {
    /// Settings file. Defaults to `<vault root>/.autolink/settings.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// A config rooted at `root` with every other field defaulted.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            vault: VaultConfig {
                root: root.into(),
                include_globs: default_include_globs(),
                exclude_globs: Vec::new(),
                follow_symlinks: false,
            },
            settings: SettingsConfig::default(),
        }
    }

    /// Resolved location of the persisted linker settings.
    pub fn settings_path(&self) -> PathBuf {
        self.settings
            .path
            .clone()
            .unwrap_or_else(|| self.vault.root.join(".autolink").join("settings.json"))
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.vault.root.as_os_str().is_empty() {
        anyhow::bail!("vault.root must not be empty");
    }

    if config.vault.include_globs.is_empty() {
        anyhow::bail!("vault.include_globs must contain at least one pattern");
    }

    build_globset(&config.vault.include_globs).with_context(|| "Invalid vault.include_globs")?;
    build_globset(&config.vault.exclude_globs).with_context(|| "Invalid vault.exclude_globs")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("autolink.toml");
        std::fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_minimal_config_defaults() {
        let (_tmp, path) = write_config("[vault]\nroot = \"/notes\"\n");
        let config = load_config(&path).unwrap();
        assert_eq!(config.vault.include_globs, vec!["**/*.md"]);
        assert!(!config.vault.follow_symlinks);
        assert_eq!(
            config.settings_path(),
            PathBuf::from("/notes/.autolink/settings.json")
        );
    }

    #[test]
    fn test_explicit_settings_path() {
        let (_tmp, path) = write_config(
            "[vault]\nroot = \"/notes\"\n\n[settings]\npath = \"/etc/autolink.json\"\n",
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.settings_path(), PathBuf::from("/etc/autolink.json"));
    }

    #[test]
    fn test_rejects_bad_glob() {
        let (_tmp, path) = write_config("[vault]\nroot = \"/notes\"\ninclude_globs = [\"a/**[\"]\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_rejects_empty_root() {
        let (_tmp, path) = write_config("[vault]\nroot = \"\"\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
