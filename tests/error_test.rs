//! Error display tests

use bfp_admin::error::AdminError;
use bfp_admin_common::BackendError;

/// Every variant has a message
#[test]
fn test_error_display() {
    let errors = vec![
        AdminError::Config("bad value".to_string()),
        AdminError::MissingBackendUrl,
        AdminError::NotFound("personnel 7".to_string()),
        AdminError::Spreadsheet("no sheets".to_string()),
        AdminError::Cancelled,
        AdminError::Common(bfp_admin_common::Error::Validation("rank is required".to_string())),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "empty message: {:?}", err);
    }
}

#[test]
fn test_missing_url_message() {
    let display = AdminError::MissingBackendUrl.to_string();
    assert!(display.contains("bfp-admin config --set-url"));
    assert!(display.contains("BFP_BACKEND_URL"));
}

/// Backend errors keep the service message and stay reachable
#[test]
fn test_backend_error_passthrough() {
    let body = r#"{"code":"23505","message":"duplicate key value violates unique constraint \"personnel_badge_number_key\"","details":null,"hint":null}"#;
    let err: AdminError = BackendError::from_response(409, body).into();

    let backend = err.backend().expect("should be a backend error");
    assert_eq!(backend.code, "23505");
    assert!(err.to_string().contains("personnel_badge_number_key"));
}

#[test]
fn test_non_json_error_body() {
    let err = BackendError::from_response(502, "Bad Gateway\n");
    assert_eq!(err.code, "http_502");
    assert_eq!(err.user_message(), "Bad Gateway");
}

#[test]
fn test_io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: AdminError = io.into();
    assert!(matches!(err, AdminError::Io(_)));
    assert!(err.backend().is_none());
}
