//! JSON-file persistence for linker settings.
//!
//! The file is untrusted: a missing file loads as empty data and a file
//! that cannot be parsed loads as empty data with a warning, so
//! [`Settings::overlay`](autolinker_core::settings::Settings::overlay)
//! falls back to the defaults.

use anyhow::{Context, Result};
use async_trait::async_trait;
use autolinker_core::host::SettingsStore;
use autolinker_core::settings::Settings;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn load(&self) -> Result<Value> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Value::Null),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read settings: {}", self.path.display())
                })
            }
        };

        match serde_json::from_str(&content) {
            Ok(v) => Ok(v),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "malformed settings file; using defaults");
                Ok(Value::Null)
            }
        }
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create settings directory: {}", parent.display())
                })?;
            }
        }
        let json = serde_json::to_string_pretty(settings)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write settings: {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_loads_defaults() {
        let tmp = TempDir::new().unwrap();
        let store = JsonSettingsStore::new(tmp.path().join("settings.json"));
        let data = store.load().await.unwrap();
        assert_eq!(Settings::overlay(&data), Settings::default());
    }

    #[tokio::test]
    async fn test_malformed_file_loads_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonSettingsStore::new(&path);
        let data = store.load().await.unwrap();
        assert_eq!(Settings::overlay(&data), Settings::default());
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_roundtrips() {
        let tmp = TempDir::new().unwrap();
        let store = JsonSettingsStore::new(tmp.path().join(".autolink").join("settings.json"));
        let mut settings = Settings::default();
        settings.case_sensitive = true;
        settings.min_word_length = 4;
        store.save(&settings).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"caseSensitive\": true"));
        assert_eq!(Settings::overlay(&store.load().await.unwrap()), settings);
    }
}
