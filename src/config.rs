//! Configuration for taskstore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a taskstore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all data files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── db.json          (store snapshot)
    ///     └── db.json.tmp      (only while a snapshot is being written)
    pub data_dir: PathBuf,

    /// Sync strategy: whether to fsync each snapshot before it replaces the old one
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,
}

/// Snapshot sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync the snapshot on every write (safest, slowest)
    EveryWrite,

    /// Leave flushing to the OS page cache (faster, loses the last writes on power failure)
    OsBuffered,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./taskstore_data"),
            sync_strategy: SyncStrategy::EveryWrite,
            listen_addr: "127.0.0.1:3333".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all storage)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the snapshot sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
