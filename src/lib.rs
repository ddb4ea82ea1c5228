//! BFP Villanueva admin CLI library

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod local_store;
pub mod logging;
pub mod render;
pub mod session;

/// Run `$body` with `$R` bound to the record type of `$kind`.
#[macro_export]
macro_rules! with_record_type {
    ($kind:expr, $R:ident => $body:expr) => {{
        use bfp_admin_common::RecordKind;
        match $kind {
            RecordKind::Personnel => { type $R = bfp_admin_common::Personnel; $body }
            RecordKind::Leave => { type $R = bfp_admin_common::LeaveRequest; $body }
            RecordKind::Clearance => { type $R = bfp_admin_common::ClearanceRequest; $body }
            RecordKind::Award => { type $R = bfp_admin_common::Award; $body }
            RecordKind::Inspection => { type $R = bfp_admin_common::Inspection; $body }
            RecordKind::Equipment => { type $R = bfp_admin_common::Equipment; $body }
            RecordKind::Recruitment => { type $R = bfp_admin_common::RecruitmentCandidate; $body }
            RecordKind::Training => { type $R = bfp_admin_common::TrainingRecord; $body }
            RecordKind::LeaveBalance => { type $R = bfp_admin_common::LeaveBalance; $body }
        }
    }};
}
