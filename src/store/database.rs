//! Database
//!
//! The collection store: in-memory collections mirrored to a snapshot file.
//!
//! ## Responsibilities
//! - Load the snapshot on startup
//! - Insert / select / update / delete records
//! - Persist the whole store after every mutation
//! - Roll back a mutation whose persist failed

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::config::Config;
use crate::error::Result;

use super::filter::Filter;
use super::record::{record_id, Collections, Record, ID_FIELD};
use super::snapshot::Snapshot;

/// The collection store
///
/// ## Concurrency Model
///
/// Mutations take `&mut self`, so the borrow checker serializes them. Shared
/// callers wrap the database in a single `Mutex` and hold the guard for a
/// whole select → mutate → persist cycle.
///
/// ## Durability
///
/// A mutation returns only after the full snapshot has been rewritten. If
/// the rewrite fails the in-memory change is undone, so what is in memory
/// is always what is on disk.
pub struct Database {
    /// Engine configuration
    config: Config,

    /// Snapshot file handle
    snapshot: Snapshot,

    /// Collection name → records in insertion order
    collections: Collections,
}

impl Database {
    // =========================================================================
    // Internal Path Constants
    // =========================================================================
    const SNAPSHOT_FILENAME: &'static str = "db.json";

    /// Open or create a database with the given config
    ///
    /// On startup:
    /// 1. Create data directory
    /// 2. Load the snapshot if one exists
    /// 3. Ready to serve requests
    pub fn open(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;

        let snapshot = Snapshot::new(
            config.data_dir.join(Self::SNAPSHOT_FILENAME),
            config.sync_strategy,
        );
        let collections = snapshot.load()?;

        tracing::info!(
            collections = collections.len(),
            records = collections.values().map(Vec::len).sum::<usize>(),
            "Loaded store from {}",
            snapshot.path().display()
        );

        Ok(Self {
            config,
            snapshot,
            collections,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::open(config)
    }

    /// Append a record to a collection (created if absent)
    ///
    /// Ids are not checked for uniqueness; callers generate them.
    pub fn insert(&mut self, collection: &str, record: Record) -> Result<()> {
        let created = !self.collections.contains_key(collection);
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(record);

        if let Err(e) = self.persist() {
            if created {
                self.collections.remove(collection);
            } else if let Some(records) = self.collections.get_mut(collection) {
                records.pop();
            }
            return Err(e);
        }

        tracing::debug!(collection, "Inserted record");
        Ok(())
    }

    /// Select records, in insertion order
    ///
    /// Returns clones; mutating them does not touch the store. A missing
    /// collection yields an empty vector.
    pub fn select(&self, collection: &str, filter: Option<&Filter>) -> Vec<Record> {
        let Some(records) = self.collections.get(collection) else {
            return Vec::new();
        };

        match filter {
            Some(filter) if !filter.is_empty() => records
                .iter()
                .filter(|record| filter.matches(record))
                .cloned()
                .collect(),
            _ => records.clone(),
        }
    }

    /// Replace the record with `id`
    ///
    /// The stored record keeps `id` whatever `record` says.
    /// Returns `Ok(false)` (and writes nothing) when no record has that id.
    pub fn update(&mut self, collection: &str, id: &str, mut record: Record) -> Result<bool> {
        let Some(index) = self.position(collection, id) else {
            return Ok(false);
        };

        record.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        let Some(records) = self.collections.get_mut(collection) else {
            return Ok(false);
        };
        let previous = std::mem::replace(&mut records[index], record);

        if let Err(e) = self.persist() {
            if let Some(records) = self.collections.get_mut(collection) {
                records[index] = previous;
            }
            return Err(e);
        }

        tracing::debug!(collection, id, "Updated record");
        Ok(true)
    }

    /// Remove the record with `id`
    ///
    /// Returns `Ok(false)` (and writes nothing) when no record has that id.
    pub fn delete(&mut self, collection: &str, id: &str) -> Result<bool> {
        let Some(index) = self.position(collection, id) else {
            return Ok(false);
        };

        let Some(records) = self.collections.get_mut(collection) else {
            return Ok(false);
        };
        let removed = records.remove(index);

        if let Err(e) = self.persist() {
            if let Some(records) = self.collections.get_mut(collection) {
                records.insert(index, removed);
            }
            return Err(e);
        }

        tracing::debug!(collection, id, "Deleted record");
        Ok(true)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Names of all collections, sorted
    pub fn collection_names(&self) -> Vec<&str> {
        self.collections.keys().map(String::as_str).collect()
    }

    /// Number of records in a collection
    pub fn len(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, Vec::len)
    }

    /// Whether the store holds no records at all
    pub fn is_empty(&self) -> bool {
        self.collections.values().all(Vec::is_empty)
    }

    /// Borrow every collection
    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    /// Get the snapshot file path
    pub fn snapshot_path(&self) -> &Path {
        self.snapshot.path()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn position(&self, collection: &str, id: &str) -> Option<usize> {
        self.collections
            .get(collection)?
            .iter()
            .position(|record| record_id(record) == Some(id))
    }

    fn persist(&self) -> Result<()> {
        self.snapshot.write(&self.collections).map_err(|e| {
            tracing::error!("Failed to persist store: {}", e);
            e
        })
    }
}
