//! Command handler tests
//!
//! Handlers run against the in-memory backend with JSON input files in a
//! temporary folder.

use bfp_admin::backend::MemoryBackend;
use bfp_admin::commands::{self, merge_form};
use bfp_admin::error::AdminError;
use bfp_admin_common::status::PersonnelStatus;
use bfp_admin_common::Personnel;
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

fn backend() -> MemoryBackend {
    let backend = MemoryBackend::new();
    backend.seed(
        "personnel",
        vec![json!({
            "id": 1,
            "badge_number": "F-001",
            "first_name": "Ana",
            "last_name": "Cruz",
            "rank": "Fire Officer 1",
            "station": "Villanueva Central",
            "email": "ana.cruz@bfp.gov.ph",
            "status": "Retired",
        })],
    );
    backend
}

fn write_json(dir: &TempDir, value: Value) -> PathBuf {
    let path = dir.path().join("record.json");
    std::fs::write(&path, value.to_string()).unwrap();
    path
}

// =============================================
// update
// =============================================

#[tokio::test]
async fn test_update_keeps_omitted_fields() {
    let backend = backend();
    let dir = TempDir::new().unwrap();
    let path = write_json(
        &dir,
        json!({"badge_number": "F-001", "first_name": "Ana", "last_name": "Cruz", "rank": "FO2"}),
    );

    commands::update::<Personnel, _>(&backend, "1", &path).await.unwrap();

    let row = &backend.rows("personnel")[0];
    assert_eq!(row["rank"], "FO2");
    assert_eq!(row["status"], "Retired");
    assert_eq!(row["email"], "ana.cruz@bfp.gov.ph");
    assert_eq!(row["station"], "Villanueva Central");
}

#[tokio::test]
async fn test_update_unknown_id() {
    let backend = backend();
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, json!({"rank": "FO2"}));

    let err = commands::update::<Personnel, _>(&backend, "99", &path).await.unwrap_err();
    assert!(matches!(err, AdminError::NotFound(_)));
}

#[test]
fn test_merge_form_overrides_only_given_fields() {
    let existing = Personnel {
        id: Some("1".into()),
        badge_number: "F-001".into(),
        email: "ana.cruz@bfp.gov.ph".into(),
        status: PersonnelStatus::OnLeave,
        ..Default::default()
    };
    let changes = json!({"email": "ana@bfp.gov.ph"}).as_object().cloned().unwrap();

    let merged = merge_form(&existing, changes).unwrap();
    assert_eq!(merged["email"], "ana@bfp.gov.ph");
    assert_eq!(merged["badge_number"], "F-001");
    assert_eq!(merged["status"], "On Leave");
}
