//! Store file I/O: locking, atomic writes, backups, import/export.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use fs2::FileExt;

use super::{Store, MAX_BACKUPS};

impl Store {
    /// The data directory (~/.termprof/).
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".termprof")
    }

    /// The document path (~/.termprof/config.json).
    pub fn store_path() -> PathBuf {
        Self::data_dir().join("config.json")
    }

    fn backups_dir(path: &Path) -> PathBuf {
        path.parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("backups")
    }

    /// Load the document from the default location, creating it with
    /// defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::store_path())
    }

    /// Load the document from an explicit path. A missing file is replaced
    /// by a freshly written default document; a corrupt file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let store = Self::default();
            store.save_to(path)?;
            tracing::info!(path = %path.display(), "created default profile store");
            return Ok(store);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile store: {}", path.display()))?;

        let mut store: Store = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse profile store: {}", path.display()))?;
        store.sanitize();

        Ok(store)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::store_path())
    }

    /// Save the document with a pre-save backup, file locking, and an
    /// atomic write.
    ///
    /// The exclusive lock prevents concurrent writers from interleaving;
    /// the temp-file-plus-rename keeps a crash from leaving a truncated
    /// document behind.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create store directory: {}", parent.display())
            })?;
        }

        if self.settings.auto_backup && path.exists() {
            if let Err(e) = Self::create_backup(path) {
                tracing::warn!("Failed to back up profile store before save: {e:#}");
            }
        }

        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize profile store")?;

        // Separate lock file, so the rename below never swaps the lock out
        // from under a concurrent writer.
        let lock_path = path.with_extension("json.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

        lock_file
            .lock_exclusive()
            .context("Failed to acquire store lock")?;

        let temp_path = path.with_extension("json.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        temp_file
            .write_all(content.as_bytes())
            .context("Failed to write profile store")?;

        temp_file.sync_all().context("Failed to sync profile store")?;

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename profile store: {}", path.display()))?;

        // Lock is released when lock_file is dropped
        Ok(())
    }

    /// Copy the current document into the backups directory, then prune to
    /// the most recent [`MAX_BACKUPS`].
    fn create_backup(path: &Path) -> Result<()> {
        let backups = Self::backups_dir(path);
        std::fs::create_dir_all(&backups)
            .with_context(|| format!("Failed to create backup directory: {}", backups.display()))?;

        let name = format!("config_{}.json", Local::now().format("%Y-%m-%d_%H%M%S"));
        std::fs::copy(path, backups.join(&name))
            .with_context(|| format!("Failed to write backup {name}"))?;

        let mut existing: Vec<PathBuf> = std::fs::read_dir(&backups)
            .with_context(|| format!("Failed to list backups: {}", backups.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();

        if existing.len() > MAX_BACKUPS {
            existing.sort();
            for stale in &existing[..existing.len() - MAX_BACKUPS] {
                if let Err(e) = std::fs::remove_file(stale) {
                    tracing::warn!(path = %stale.display(), "Failed to prune backup: {e}");
                }
            }
        }

        Ok(())
    }

    /// Export the document to a caller-chosen path.
    pub fn export(path: &Path, destination: &Path) -> Result<()> {
        std::fs::copy(path, destination).with_context(|| {
            format!(
                "Failed to export {} to {}",
                path.display(),
                destination.display()
            )
        })?;
        Ok(())
    }

    /// Replace the document with an imported one after validating it, and
    /// return the reloaded store. The current document is backed up first.
    pub fn import(path: &Path, source: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read import file: {}", source.display()))?;

        let document: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse import file: {}", source.display()))?;
        if !document.get("profiles").is_some_and(|p| p.is_array()) {
            bail!(
                "Import file {} is not a profile store (no profiles array)",
                source.display()
            );
        }

        if path.exists() {
            Self::create_backup(path)?;
        } else if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create store directory: {}", parent.display())
            })?;
        }

        std::fs::copy(source, path).with_context(|| {
            format!(
                "Failed to import {} to {}",
                source.display(),
                path.display()
            )
        })?;

        Self::load_from(path)
    }
}
