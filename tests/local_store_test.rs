//! Local store file tests
//!
//! Write-through persistence and recovery from bad files

use bfp_admin::local_store::{FileStore, STORE_FILE_NAME};
use bfp_admin_common::local_store::{LocalStore, LEAVE_STORE, TRAINING_STORE};
use serde_json::json;
use tempfile::tempdir;

/// No file yet: empty store
#[test]
fn test_open_missing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::open(dir.path());

    assert!(store.get_all(LEAVE_STORE).unwrap().is_empty());
    assert!(!dir.path().join(STORE_FILE_NAME).exists());
}

/// Inserts survive a reopen
#[test]
fn test_insert_persists() {
    let dir = tempdir().expect("Failed to create temp dir");

    let id = {
        let mut store = FileStore::open(dir.path());
        store
            .insert(LEAVE_STORE, json!({"leave_type": "Vacation Leave", "status": "Pending"}))
            .unwrap()
    };

    let store = FileStore::open(dir.path());
    let row = store.get(LEAVE_STORE, &id).unwrap().expect("row should persist");
    assert_eq!(row["leave_type"], "Vacation Leave");
    assert!(store.get_all(TRAINING_STORE).unwrap().is_empty());
}

/// Update and delete are written through
#[test]
fn test_update_and_delete_persist() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = FileStore::open(dir.path());
    let id = store.insert(TRAINING_STORE, json!({"training_title": "BFRS"})).unwrap();
    store.update(TRAINING_STORE, &id, json!({"training_title": "Rope Rescue"})).unwrap();

    let reopened = FileStore::open(dir.path());
    assert_eq!(reopened.get(TRAINING_STORE, &id).unwrap().unwrap()["training_title"], "Rope Rescue");

    assert!(store.delete(TRAINING_STORE, &id).unwrap());
    assert!(!store.delete(TRAINING_STORE, &id).unwrap());
    assert!(FileStore::open(dir.path()).get_all(TRAINING_STORE).unwrap().is_empty());
}

/// Unknown store names are refused
#[test]
fn test_unknown_store() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = FileStore::open(dir.path());
    assert!(store.insert("photos", json!({})).is_err());
}

/// A corrupt file loads as empty
#[test]
fn test_corrupt_file_loads_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join(STORE_FILE_NAME), "{ not json").unwrap();

    let store = FileStore::open(dir.path());
    assert!(store.get_all(LEAVE_STORE).unwrap().is_empty());
}

/// A file from another version loads as empty
#[test]
fn test_version_mismatch_loads_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let old = json!({"version": 0, "store": {"next_id": 1, "stores": {"leave_requests": [{"id": "1"}]}}});
    std::fs::write(dir.path().join(STORE_FILE_NAME), old.to_string()).unwrap();

    let store = FileStore::open(dir.path());
    assert!(store.get_all(LEAVE_STORE).unwrap().is_empty());
}

#[test]
fn test_clear() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = FileStore::open(dir.path());
    store.insert(LEAVE_STORE, json!({"reason": "x"})).unwrap();

    assert!(FileStore::clear(dir.path()).unwrap());
    assert!(!FileStore::clear(dir.path()).unwrap());
}
