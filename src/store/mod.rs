//! Store Module
//!
//! File-persisted collection store.
//!
//! ## Responsibilities
//! - Hold named collections of records in insertion order
//! - Linear-scan selects with substring filters (`id` matches exactly)
//! - Rewrite the whole snapshot after every mutation
//! - Reload the snapshot on startup
//!
//! ## File Format
//! ```text
//! {data_dir}/db.json
//! ┌────────────────────────────────────────┐
//! │ {                                      │
//! │   "tasks": [                           │
//! │     { "id": "...", "title": "...", ... }│
//! │     ...                (insert order)  │
//! │   ],                                   │
//! │   "<collection>": [ ... ]              │
//! │ }                                      │
//! └────────────────────────────────────────┘
//! ```
//!
//! Writes go to `db.json.tmp` first and are renamed over `db.json`, so a
//! reader never observes a half-written snapshot.

mod database;
mod filter;
mod record;
mod snapshot;

pub use database::Database;
pub use filter::{Filter, MatchMode};
pub use record::{record_id, Collections, Record, ID_FIELD};
pub use snapshot::Snapshot;
