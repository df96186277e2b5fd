//! Snapshot file
//!
//! Loads and atomically rewrites the JSON file holding every collection.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::SyncStrategy;
use crate::error::{Result, StoreError};

use super::record::Collections;

/// Handle on the snapshot file of a store
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Final snapshot location
    path: PathBuf,

    /// Staging file, renamed over `path` once fully written
    tmp_path: PathBuf,

    /// Whether to fsync before the rename
    sync_strategy: SyncStrategy,
}

impl Snapshot {
    pub fn new(path: impl Into<PathBuf>, sync_strategy: SyncStrategy) -> Self {
        let path = path.into();
        let mut tmp_name = path.clone().into_os_string();
        tmp_name.push(".tmp");

        Self {
            path,
            tmp_path: PathBuf::from(tmp_name),
            sync_strategy,
        }
    }

    /// Load all collections
    ///
    /// Returns:
    /// - `Ok(collections)` — parsed snapshot, or empty if no file exists yet
    /// - `Err(Corrupted)` — the file exists but is not a valid snapshot
    pub fn load(&self) -> Result<Collections> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No snapshot at {}, starting empty", self.path.display());
                return Ok(Collections::new());
            }
            Err(e) => return Err(e.into()),
        };

        // An empty file is what a crash between create and first write leaves behind
        if bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::warn!("Snapshot {} is empty, starting empty", self.path.display());
            return Ok(Collections::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::Corrupted(format!("{}: {}", self.path.display(), e))
        })
    }

    /// Replace the snapshot with `collections`
    ///
    /// Steps:
    /// 1. Serialize to pretty JSON
    /// 2. Write the staging file (fsync per strategy)
    /// 3. Rename it over the snapshot
    pub fn write(&self, collections: &Collections) -> Result<()> {
        let body = serde_json::to_vec_pretty(collections)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.write_staging(&body).map_err(|e| {
            StoreError::Persistence(format!(
                "failed to write '{}': {}",
                self.tmp_path.display(),
                e
            ))
        })?;

        fs::rename(&self.tmp_path, &self.path).map_err(|e| {
            StoreError::Persistence(format!(
                "failed to rename '{}' to '{}': {}",
                self.tmp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!(bytes = body.len(), "Snapshot written to {}", self.path.display());
        Ok(())
    }

    fn write_staging(&self, body: &[u8]) -> std::io::Result<()> {
        let mut file = File::create(&self.tmp_path)?;
        file.write_all(body)?;

        if self.sync_strategy == SyncStrategy::EveryWrite {
            file.sync_all()?;
        }

        Ok(())
    }

    /// Get the snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
