use bfp_admin_common::BackendError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Backend URL is not set. Run `bfp-admin config --set-url https://<project>.supabase.co` or set BFP_BACKEND_URL")]
    MissingBackendUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Cancelled")]
    Cancelled,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] bfp_admin_common::Error),
}

impl From<BackendError> for AdminError {
    fn from(err: BackendError) -> Self {
        AdminError::Common(err.into())
    }
}

impl From<calamine::Error> for AdminError {
    fn from(err: calamine::Error) -> Self {
        AdminError::Spreadsheet(err.to_string())
    }
}

impl AdminError {
    /// The Backend Service error, if this is one
    pub fn backend(&self) -> Option<&BackendError> {
        match self {
            AdminError::Common(bfp_admin_common::Error::Backend(err)) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;
