//! Tests for Snapshot
//!
//! These tests verify:
//! - Loading a missing or empty file
//! - Write → load round trip
//! - The staging file does not survive a write
//! - Corrupted files are reported, not overwritten

use std::fs;

use serde_json::{json, Value};
use taskstore::config::SyncStrategy;
use taskstore::store::{Collections, Snapshot};
use taskstore::StoreError;
use tempfile::TempDir;

fn sample() -> Collections {
    let Value::Object(record) = json!({ "id": "1", "title": "a", "completed_at": null }) else {
        unreachable!()
    };
    let mut collections = Collections::new();
    collections.insert("tasks".to_string(), vec![record]);
    collections.insert("empty".to_string(), Vec::new());
    collections
}

#[test]
fn test_load_missing_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot = Snapshot::new(temp_dir.path().join("db.json"), SyncStrategy::EveryWrite);

    assert!(snapshot.load().unwrap().is_empty());
}

#[test]
fn test_load_blank_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("db.json");
    fs::write(&path, b"  \n").unwrap();

    let snapshot = Snapshot::new(&path, SyncStrategy::EveryWrite);

    assert!(snapshot.load().unwrap().is_empty());
}

#[test]
fn test_write_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("db.json");

    for strategy in [SyncStrategy::EveryWrite, SyncStrategy::OsBuffered] {
        let snapshot = Snapshot::new(&path, strategy);
        snapshot.write(&sample()).unwrap();

        assert_eq!(snapshot.load().unwrap(), sample());
        assert!(!temp_dir.path().join("db.json.tmp").exists());
    }
}

#[test]
fn test_write_replaces_previous_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot = Snapshot::new(temp_dir.path().join("db.json"), SyncStrategy::EveryWrite);

    snapshot.write(&sample()).unwrap();
    snapshot.write(&Collections::new()).unwrap();

    assert!(snapshot.load().unwrap().is_empty());
}

#[test]
fn test_snapshot_is_readable_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("db.json");
    Snapshot::new(&path, SyncStrategy::EveryWrite)
        .write(&sample())
        .unwrap();

    let raw: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();

    assert_eq!(raw["tasks"][0]["title"], json!("a"));
    assert_eq!(raw["empty"], json!([]));
}

#[test]
fn test_load_corrupted_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("db.json");
    fs::write(&path, b"[1, 2, 3]").unwrap();

    let result = Snapshot::new(&path, SyncStrategy::EveryWrite).load();

    assert!(matches!(result, Err(StoreError::Corrupted(_))));
    assert_eq!(fs::read(&path).unwrap(), b"[1, 2, 3]");
}
