//! # taskstore
//!
//! A small task service with:
//! - A file-persisted collection store (full snapshot on every mutation)
//! - Substring search over record fields (`id` matches exactly)
//! - A JSON HTTP API for the `tasks` collection
//! - CSV import
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    HTTP Router (axum)                        │
//! │          POST/GET/PUT/PATCH/DELETE  /tasks[/:id]             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     TaskService                              │
//! │        (validation, ids, timestamps, not-found)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  Mutex<Database>
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Collections │          │  Snapshot   │
//!   │ (in memory) │ ───────▶ │  (db.json)  │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod tasks;
pub mod http;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::Config;
pub use store::Database;
pub use tasks::TaskService;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of taskstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
