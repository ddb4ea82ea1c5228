//! Error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the Backend Service.
///
/// PostgREST answers failed requests with `{code, message, details, hint}`;
/// only `message` is guaranteed to be meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl BackendError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    /// Build from a non-2xx response body. Bodies that are not a PostgREST
    /// error object keep the raw text as the message.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<BackendError>(body) {
            Ok(err) if !err.message.is_empty() => err,
            _ => Self::new(format!("http_{}", status), body.trim()),
        }
    }

    /// Message suitable for an alert dialog.
    ///
    /// Known constraint codes get a readable prefix; the service message is
    /// always kept verbatim.
    pub fn user_message(&self) -> String {
        let prefix = match self.code.as_str() {
            "23505" => Some("Duplicate record"),
            "23503" => Some("Referenced record does not exist"),
            "42501" => Some("Permission denied"),
            _ => None,
        };
        match prefix {
            Some(p) => format!("{}: {}", p, self.message),
            None => self.message.clone(),
        }
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.code.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

impl std::error::Error for BackendError {}

/// Shared error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[cfg(feature = "excel")]
    #[error("Excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_validation() {
        let error = Error::Validation("first_name is required".to_string());
        assert_eq!(error.to_string(), "Validation error: first_name is required");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    // =============================================
    // BackendError
    // =============================================

    #[test]
    fn test_backend_error_from_postgrest_body() {
        let body = r#"{"code":"23505","message":"duplicate key value violates unique constraint \"personnel_badge_key\"","details":"Key (badge_number)=(F-001) already exists.","hint":null}"#;
        let err = BackendError::from_response(409, body);
        assert_eq!(err.code, "23505");
        assert!(err.details.as_deref().unwrap_or_default().contains("F-001"));
        assert!(err.user_message().starts_with("Duplicate record: duplicate key"));
    }

    #[test]
    fn test_backend_error_from_plain_body() {
        let err = BackendError::from_response(502, " Bad Gateway \n");
        assert_eq!(err.code, "http_502");
        assert_eq!(err.message, "Bad Gateway");
    }

    #[test]
    fn test_backend_error_unknown_code_keeps_message_verbatim() {
        let err = BackendError::new("PGRST116", "JSON object requested, multiple (or no) rows returned");
        assert_eq!(err.user_message(), "JSON object requested, multiple (or no) rows returned");
        assert_eq!(err.to_string(), "[PGRST116] JSON object requested, multiple (or no) rows returned");
    }

    #[test]
    fn test_backend_error_converts() {
        let err: Error = BackendError::new("42501", "permission denied for table awards").into();
        assert!(matches!(err, Error::Backend(_)));
        assert!(err.to_string().contains("permission denied"));
    }
}
