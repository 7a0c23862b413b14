//! Filesystem vault: the [`DocumentSource`] the CLI indexes.
//!
//! Walks the configured root with `walkdir`, keeping files that match the
//! include globs and none of the exclude globs. Document identifiers are
//! `/`-separated paths relative to the root, listed in sorted order so
//! "last scanned wins" is deterministic across platforms.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use autolinker_core::host::DocumentSource;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::config::VaultConfig;

const DEFAULT_EXCLUDES: [&str; 4] = [
    "**/.git/**",
    "**/.obsidian/**",
    "**/.autolink/**",
    "**/node_modules/**",
];

pub struct FilesystemVault {
    root: PathBuf,
    include: GlobSet,
    exclude: GlobSet,
    follow_symlinks: bool,
}

impl FilesystemVault {
    pub fn open(config: &VaultConfig) -> Result<Self> {
        let root = &config.root;
        if !root.is_dir() {
            bail!("Vault root does not exist: {}", root.display());
        }

        let include = build_globset(&config.include_globs)?;

        let mut excludes: Vec<String> = DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect();
        excludes.extend(config.exclude_globs.clone());
        let exclude = build_globset(&excludes)?;

        Ok(Self {
            root: root.clone(),
            include,
            exclude,
            follow_symlinks: config.follow_symlinks,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the vault and return every document id, sorted.
    pub fn scan_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();

        let walker = WalkDir::new(&self.root).follow_links(self.follow_symlinks);
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable vault entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            let id = to_document_id(relative);

            if self.exclude.is_match(&id) {
                continue;
            }
            if !self.include.is_match(&id) {
                continue;
            }

            ids.push(id);
        }

        ids.sort();
        Ok(ids)
    }

    /// Absolute path for a document id. Ids may not leave the vault.
    pub fn path_of(&self, id: &str) -> Result<PathBuf> {
        let relative = Path::new(id);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if id.is_empty() || escapes {
            bail!("Invalid document id: {}", id);
        }
        Ok(self.root.join(relative))
    }

    pub async fn write_document(&self, id: &str, text: &str) -> Result<()> {
        let path = self.path_of(id)?;
        tokio::fs::write(&path, text)
            .await
            .with_context(|| format!("Failed to write document: {}", path.display()))
    }
}

#[async_trait]
impl DocumentSource for FilesystemVault {
    async fn list_documents(&self) -> Result<Vec<String>> {
        self.scan_ids()
    }

    async fn read_document(&self, id: &str) -> Result<String> {
        let path = self.path_of(id)?;
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read document: {}", path.display()))
    }
}

fn to_document_id(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::TempDir;

    fn vault_with_files() -> (TempDir, FilesystemVault) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("fruit")).unwrap();
        fs::create_dir_all(root.join(".obsidian")).unwrap();
        fs::create_dir_all(root.join("drafts")).unwrap();
        fs::write(root.join("fruit/apple.md"), "The Banana Tree").unwrap();
        fs::write(root.join("zebra.md"), "stripes").unwrap();
        fs::write(root.join("notes.txt"), "not markdown").unwrap();
        fs::write(root.join(".obsidian/workspace.md"), "ignored").unwrap();
        fs::write(root.join("drafts/wip.md"), "draft").unwrap();

        let mut config = Config::for_root(root);
        config.vault.exclude_globs = vec!["drafts/**".to_string()];
        let vault = FilesystemVault::open(&config.vault).unwrap();
        (tmp, vault)
    }

    #[tokio::test]
    async fn test_lists_sorted_filtered_ids() {
        let (_tmp, vault) = vault_with_files();
        let ids = vault.list_documents().await.unwrap();
        assert_eq!(ids, vec!["fruit/apple.md", "zebra.md"]);
    }

    #[tokio::test]
    async fn test_read_and_write_roundtrip() {
        let (_tmp, vault) = vault_with_files();
        assert_eq!(
            vault.read_document("fruit/apple.md").await.unwrap(),
            "The Banana Tree"
        );
        vault.write_document("zebra.md", "[[stripes]]").await.unwrap();
        assert_eq!(vault.read_document("zebra.md").await.unwrap(), "[[stripes]]");
    }

    #[tokio::test]
    async fn test_missing_document_errors() {
        let (_tmp, vault) = vault_with_files();
        assert!(vault.read_document("nope.md").await.is_err());
    }

    #[test]
    fn test_rejects_escaping_ids() {
        let (_tmp, vault) = vault_with_files();
        assert!(vault.path_of("../secret.md").is_err());
        assert!(vault.path_of("/etc/passwd").is_err());
        assert!(vault.path_of("").is_err());
        assert!(vault.path_of("fruit/apple.md").is_ok());
    }

    #[test]
    fn test_missing_root() {
        let config = Config::for_root("/no/such/vault/root");
        assert!(FilesystemVault::open(&config.vault).is_err());
    }
}
