//! BFP Admin Common Library
//!
//! Record types and list-screen logic shared by the CLI and the Web (WASM)
//! front end. Nothing here performs IO.

pub mod error;
pub mod status;
pub mod kind;
pub mod types;
pub mod filter;
pub mod paginate;
pub mod summary;
pub mod list_view;
pub mod leave;
pub mod validation;
pub mod credentials;
pub mod prefs;
pub mod local_store;
pub mod query;

#[cfg(feature = "excel")]
pub mod export;

pub use error::{BackendError, Error, Result};
pub use filter::{apply_filters, FilterState};
pub use kind::RecordKind;
pub use list_view::{FetchOutcome, FormState, MutationOutcome, RecordList};
pub use local_store::{LocalStore, MemoryStore};
pub use query::Query;
pub use paginate::{paginate, PageButton, PageControls, PageState};
pub use summary::{summary_counts, SummaryCount};
pub use types::{
    Award, ClearanceRequest, Equipment, Inspection, LeaveBalance, LeaveRequest, ListRecord, Personnel,
    RecruitmentCandidate, TrainingRecord,
};
