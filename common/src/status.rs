//! Per-kind status enumerations
//!
//! Statuses are small closed sets. They decode leniently (case, spaces,
//! underscores and hyphens are ignored) and encode to their display label.
//! Unknown values decode to the first variant so a bad row never drops out
//! of a fetch.

use std::fmt;

/// Normalize a status string for comparison: lowercase, separators removed.
pub fn status_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $first:ident => $first_label:literal $(, $variant:ident => $label:literal)* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            #[default]
            $first,
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$name::$first $(, $name::$variant)*];
            pub const LABELS: &'static [&'static str] = &[$first_label $(, $label)*];

            pub fn label(&self) -> &'static str {
                match self {
                    $name::$first => $first_label,
                    $($name::$variant => $label,)*
                }
            }

            /// Strict parse: `None` for values outside the set.
            pub fn parse(value: &str) -> Option<Self> {
                let key = status_key(value);
                Self::ALL.iter().copied().find(|s| status_key(s.label()) == key)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::parse(&value).unwrap_or_default()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.label().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

status_enum!(
    /// Personnel employment status
    PersonnelStatus { Active => "Active", OnLeave => "On Leave", Retired => "Retired", Inactive => "Inactive" }
);

status_enum!(
    /// Shared by leave requests and awards
    ApprovalStatus { Pending => "Pending", Approved => "Approved", Rejected => "Rejected" }
);

status_enum!(
    ClearanceStatus { Pending => "Pending", InProgress => "In Progress", Completed => "Completed", Rejected => "Rejected" }
);

status_enum!(
    InspectionStatus { Pending => "Pending", Passed => "Passed", Failed => "Failed", NeedsAttention => "Needs Attention" }
);

status_enum!(
    EquipmentStatus { Operational => "Operational", Maintenance => "Maintenance", Damaged => "Damaged" }
);

status_enum!(
    /// Recruitment pipeline stage
    CandidateStatus { Applied => "Applied", Screening => "Screening", Interview => "Interview", Hired => "Hired", Rejected => "Rejected" }
);

status_enum!(
    TrainingStatus { Scheduled => "Scheduled", Ongoing => "Ongoing", Completed => "Completed", Cancelled => "Cancelled" }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_key_ignores_case_and_separators() {
        assert_eq!(status_key("Needs Attention"), "needsattention");
        assert_eq!(status_key("needs_attention"), "needsattention");
        assert_eq!(status_key("IN-PROGRESS"), "inprogress");
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(InspectionStatus::parse("needs_attention"), Some(InspectionStatus::NeedsAttention));
        assert_eq!(ClearanceStatus::parse("in progress"), Some(ClearanceStatus::InProgress));
        assert_eq!(ApprovalStatus::parse("APPROVED"), Some(ApprovalStatus::Approved));
        assert_eq!(ApprovalStatus::parse("archived"), None);
    }

    #[test]
    fn test_unknown_decodes_to_default() {
        let status: EquipmentStatus = serde_json::from_str("\"scrapped\"").unwrap();
        assert_eq!(status, EquipmentStatus::Operational);
    }

    #[test]
    fn test_encode_uses_label() {
        let json = serde_json::to_string(&PersonnelStatus::OnLeave).unwrap();
        assert_eq!(json, "\"On Leave\"");
        assert_eq!(TrainingStatus::Cancelled.to_string(), "Cancelled");
    }

    #[test]
    fn test_labels_match_all() {
        assert_eq!(CandidateStatus::ALL.len(), CandidateStatus::LABELS.len());
        for (status, label) in CandidateStatus::ALL.iter().zip(CandidateStatus::LABELS) {
            assert_eq!(status.label(), *label);
        }
    }
}
