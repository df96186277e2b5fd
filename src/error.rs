//! Error types for taskstore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for taskstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Persistence Errors
    // -------------------------------------------------------------------------
    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Snapshot corrupted: {0}")]
    Corrupted(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Request Errors (raised by the task layer, never by the store)
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Validation(String),

    #[error("Task not found: {0}")]
    NotFound(String),

    // -------------------------------------------------------------------------
    // Import Errors
    // -------------------------------------------------------------------------
    #[error("Import error: {0}")]
    Import(String),
}
