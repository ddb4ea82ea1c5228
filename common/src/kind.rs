//! Record kinds and their per-screen metadata
//!
//! Each screen is the same list pattern wired to a different table. Everything
//! that differs between screens (table, page size, searchable fields, summary
//! cards, dropdown filters, table columns) is declared here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quick-filter predicate behind a summary card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPredicate {
    /// The "total" card; matches every record.
    All,
    /// Field equals the value, case-insensitively.
    Equals(&'static str, &'static str),
    /// Field contains the value, case-insensitively.
    Contains(&'static str, &'static str),
}

/// Summary card: an aggregate count and a mutually-exclusive quick filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryCard {
    pub key: &'static str,
    pub label: &'static str,
    pub predicate: CardPredicate,
}

/// Key of the default card.
pub const TOTAL_CARD: &str = "total";

const fn total(label: &'static str) -> SummaryCard {
    SummaryCard { key: TOTAL_CARD, label, predicate: CardPredicate::All }
}

const fn eq(key: &'static str, label: &'static str, field: &'static str, value: &'static str) -> SummaryCard {
    SummaryCard { key, label, predicate: CardPredicate::Equals(field, value) }
}

const fn contains(key: &'static str, label: &'static str, field: &'static str, value: &'static str) -> SummaryCard {
    SummaryCard { key, label, predicate: CardPredicate::Contains(field, value) }
}

/// Table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
}

const fn col(key: &'static str, label: &'static str) -> Column {
    Column { key, label }
}

/// Dropdown filter over one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownFilter {
    pub field: &'static str,
    pub label: &'static str,
    pub options: &'static [&'static str],
}

/// Record kinds, one per screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Personnel,
    Leave,
    Clearance,
    Award,
    Inspection,
    Equipment,
    Recruitment,
    Training,
    LeaveBalance,
}

const RANKS: &[&str] = &[
    "Fire Officer 1",
    "Fire Officer 2",
    "Fire Officer 3",
    "Senior Fire Officer 1",
    "Senior Fire Officer 2",
    "Senior Fire Officer 3",
    "Senior Fire Officer 4",
    "Fire Inspector",
    "Fire Senior Inspector",
    "Fire Chief Inspector",
];

const LEAVE_TYPES: &[&str] = &["Vacation", "Sick", "Emergency", "Special", "Maternity", "Paternity"];

const CLEARANCE_TYPES: &[&str] = &["Resignation", "Retirement", "Transfer", "Promotion", "Travel"];

const AWARD_CATEGORIES: &[&str] = &["Medal", "Commendation", "Certificate", "Plaque"];

const INSPECTION_TYPES: &[&str] = &["Business", "Occupancy", "Fire Safety", "Building Plan"];

const EQUIPMENT_CATEGORIES: &[&str] = &["Vehicle", "Hose", "Breathing Apparatus", "Extinguisher", "Radio"];

const POSITIONS: &[&str] = &["Fire Officer 1", "Administrative Aide", "Driver/Pump Operator"];

const TRAINING_CATEGORIES: &[&str] = &["Seminar", "Specialized Course", "Mandatory", "Drill"];

impl RecordKind {
    pub const ALL: [RecordKind; 9] = [
        RecordKind::Personnel,
        RecordKind::Leave,
        RecordKind::Clearance,
        RecordKind::Award,
        RecordKind::Inspection,
        RecordKind::Equipment,
        RecordKind::Recruitment,
        RecordKind::Training,
        RecordKind::LeaveBalance,
    ];

    /// Backend table name
    pub fn table(&self) -> &'static str {
        match self {
            RecordKind::Personnel => "personnel",
            RecordKind::Leave => "leave_requests",
            RecordKind::Clearance => "clearance_requests",
            RecordKind::Award => "awards",
            RecordKind::Inspection => "inspections",
            RecordKind::Equipment => "equipment",
            RecordKind::Recruitment => "recruitment_personnel",
            RecordKind::Training => "training_records",
            RecordKind::LeaveBalance => "leave_balances",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Personnel => "Personnel",
            RecordKind::Leave => "Leave Requests",
            RecordKind::Clearance => "Clearance Requests",
            RecordKind::Award => "Awards & Commendations",
            RecordKind::Inspection => "Inspections",
            RecordKind::Equipment => "Equipment Inventory",
            RecordKind::Recruitment => "Recruitment",
            RecordKind::Training => "Training Records",
            RecordKind::LeaveBalance => "Leave Credits",
        }
    }

    /// Fixed page size of the screen
    pub fn page_size(&self) -> usize {
        match self {
            RecordKind::Leave => 5,
            RecordKind::Award | RecordKind::Recruitment => 6,
            RecordKind::Equipment => 20,
            _ => 10,
        }
    }

    /// PostgREST `select` expression, with joins that resolve `personnel_id`
    /// to a display name.
    pub fn select(&self) -> &'static str {
        match self {
            RecordKind::Leave
            | RecordKind::Clearance
            | RecordKind::Award
            | RecordKind::Training
            | RecordKind::LeaveBalance => "*,personnel(first_name,last_name)",
            _ => "*",
        }
    }

    /// Default ordering: (column, descending)
    pub fn order(&self) -> (&'static str, bool) {
        match self {
            RecordKind::Personnel => ("last_name", false),
            RecordKind::Leave => ("start_date", true),
            RecordKind::Clearance => ("request_date", true),
            RecordKind::Award => ("award_date", true),
            RecordKind::Inspection => ("inspection_date", true),
            RecordKind::Equipment => ("name", false),
            RecordKind::Recruitment => ("application_date", true),
            RecordKind::Training => ("start_date", true),
            RecordKind::LeaveBalance => ("personnel_id", false),
        }
    }

    /// Fields concatenated for free-text search
    pub fn search_fields(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Personnel => &["badge_number", "name", "rank", "designation", "station", "email"],
            RecordKind::Leave => &["employee", "leave_type", "reason", "status"],
            RecordKind::Clearance => &["employee", "clearance_type", "purpose", "status"],
            RecordKind::Award => &["employee", "award_name", "category", "description"],
            RecordKind::Inspection => &["establishment_name", "owner_name", "address", "inspector", "inspection_type"],
            RecordKind::Equipment => &["name", "category", "serial_number", "location"],
            RecordKind::Recruitment => &["full_name", "email", "position", "status"],
            RecordKind::Training => &["employee", "training_title", "provider", "category"],
            RecordKind::LeaveBalance => &["employee", "personnel_id"],
        }
    }

    /// Summary cards; the first is always the total card.
    pub fn summary_cards(&self) -> &'static [SummaryCard] {
        match self {
            RecordKind::Personnel => {
                const C: &[SummaryCard] = &[
                    total("Total Personnel"),
                    eq("active", "Active", "status", "Active"),
                    eq("on_leave", "On Leave", "status", "On Leave"),
                    eq("retired", "Retired", "status", "Retired"),
                    contains("officers", "Officers", "rank", "officer"),
                ];
                C
            }
            RecordKind::Leave | RecordKind::Award => {
                const C: &[SummaryCard] = &[
                    total("Total Requests"),
                    eq("pending", "Pending", "status", "Pending"),
                    eq("approved", "Approved", "status", "Approved"),
                    eq("rejected", "Rejected", "status", "Rejected"),
                ];
                C
            }
            RecordKind::Clearance => {
                const C: &[SummaryCard] = &[
                    total("Total Requests"),
                    eq("pending", "Pending", "status", "Pending"),
                    eq("in_progress", "In Progress", "status", "In Progress"),
                    eq("completed", "Completed", "status", "Completed"),
                    eq("rejected", "Rejected", "status", "Rejected"),
                ];
                C
            }
            RecordKind::Inspection => {
                const C: &[SummaryCard] = &[
                    total("Total Inspections"),
                    eq("passed", "Passed", "status", "Passed"),
                    eq("failed", "Failed", "status", "Failed"),
                    eq("needs_attention", "Needs Attention", "status", "Needs Attention"),
                    eq("pending", "Pending", "status", "Pending"),
                ];
                C
            }
            RecordKind::Equipment => {
                const C: &[SummaryCard] = &[
                    total("Total Equipment"),
                    eq("operational", "Operational", "status", "Operational"),
                    eq("maintenance", "Maintenance", "status", "Maintenance"),
                    eq("damaged", "Damaged", "status", "Damaged"),
                ];
                C
            }
            RecordKind::Recruitment => {
                const C: &[SummaryCard] = &[
                    total("Total Applicants"),
                    eq("applied", "Applied", "status", "Applied"),
                    eq("interview", "Interview", "status", "Interview"),
                    eq("hired", "Hired", "status", "Hired"),
                    eq("rejected", "Rejected", "status", "Rejected"),
                ];
                C
            }
            RecordKind::Training => {
                const C: &[SummaryCard] = &[
                    total("Total Trainings"),
                    eq("scheduled", "Scheduled", "status", "Scheduled"),
                    eq("ongoing", "Ongoing", "status", "Ongoing"),
                    eq("completed", "Completed", "status", "Completed"),
                    contains("seminars", "Seminars", "category", "seminar"),
                ];
                C
            }
            RecordKind::LeaveBalance => {
                const C: &[SummaryCard] = &[total("Employees")];
                C
            }
        }
    }

    pub fn dropdown_filters(&self) -> &'static [DropdownFilter] {
        match self {
            RecordKind::Personnel => &[DropdownFilter { field: "rank", label: "Rank", options: RANKS }],
            RecordKind::Leave => &[DropdownFilter { field: "leave_type", label: "Leave Type", options: LEAVE_TYPES }],
            RecordKind::Clearance => &[DropdownFilter { field: "clearance_type", label: "Type", options: CLEARANCE_TYPES }],
            RecordKind::Award => &[DropdownFilter { field: "category", label: "Category", options: AWARD_CATEGORIES }],
            RecordKind::Inspection => &[DropdownFilter { field: "inspection_type", label: "Type", options: INSPECTION_TYPES }],
            RecordKind::Equipment => &[DropdownFilter { field: "category", label: "Category", options: EQUIPMENT_CATEGORIES }],
            RecordKind::Recruitment => &[DropdownFilter { field: "position", label: "Position", options: POSITIONS }],
            RecordKind::Training => &[DropdownFilter { field: "category", label: "Category", options: TRAINING_CATEGORIES }],
            RecordKind::LeaveBalance => &[],
        }
    }

    /// Table columns, in display order
    pub fn columns(&self) -> &'static [Column] {
        match self {
            RecordKind::Personnel => {
                const C: &[Column] = &[
                    col("badge_number", "Badge No."),
                    col("name", "Name"),
                    col("rank", "Rank"),
                    col("designation", "Designation"),
                    col("station", "Station"),
                    col("contact_number", "Contact"),
                    col("status", "Status"),
                ];
                C
            }
            RecordKind::Leave => {
                const C: &[Column] = &[
                    col("employee", "Employee"),
                    col("leave_type", "Type"),
                    col("start_date", "From"),
                    col("end_date", "To"),
                    col("num_days", "Days"),
                    col("status", "Status"),
                ];
                C
            }
            RecordKind::Clearance => {
                const C: &[Column] = &[
                    col("employee", "Employee"),
                    col("clearance_type", "Type"),
                    col("purpose", "Purpose"),
                    col("request_date", "Requested"),
                    col("status", "Status"),
                ];
                C
            }
            RecordKind::Award => {
                const C: &[Column] = &[
                    col("employee", "Employee"),
                    col("award_name", "Award"),
                    col("category", "Category"),
                    col("award_date", "Date"),
                    col("status", "Status"),
                ];
                C
            }
            RecordKind::Inspection => {
                const C: &[Column] = &[
                    col("establishment_name", "Establishment"),
                    col("owner_name", "Owner"),
                    col("inspection_type", "Type"),
                    col("inspector", "Inspector"),
                    col("inspection_date", "Date"),
                    col("status", "Status"),
                ];
                C
            }
            RecordKind::Equipment => {
                const C: &[Column] = &[
                    col("name", "Name"),
                    col("category", "Category"),
                    col("serial_number", "Serial No."),
                    col("location", "Location"),
                    col("last_maintenance", "Last Maintenance"),
                    col("status", "Status"),
                ];
                C
            }
            RecordKind::Recruitment => {
                const C: &[Column] = &[
                    col("full_name", "Applicant"),
                    col("position", "Position"),
                    col("email", "Email"),
                    col("application_date", "Applied"),
                    col("status", "Status"),
                ];
                C
            }
            RecordKind::Training => {
                const C: &[Column] = &[
                    col("employee", "Employee"),
                    col("training_title", "Training"),
                    col("category", "Category"),
                    col("start_date", "From"),
                    col("end_date", "To"),
                    col("hours", "Hours"),
                    col("status", "Status"),
                ];
                C
            }
            RecordKind::LeaveBalance => {
                const C: &[Column] = &[
                    col("employee", "Employee"),
                    col("vacation_balance", "Vacation"),
                    col("sick_balance", "Sick"),
                    col("emergency_balance", "Emergency"),
                    col("special_balance", "Special"),
                ];
                C
            }
        }
    }

    /// Fields that must be non-blank before submission
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Personnel => &["badge_number", "first_name", "last_name", "rank"],
            RecordKind::Leave => &["personnel_id", "leave_type", "start_date", "end_date"],
            RecordKind::Clearance => &["personnel_id", "clearance_type", "request_date"],
            RecordKind::Award => &["personnel_id", "award_name", "award_date"],
            RecordKind::Inspection => &["establishment_name", "inspection_type", "inspection_date"],
            RecordKind::Equipment => &["name", "category"],
            RecordKind::Recruitment => &["full_name", "email", "position"],
            RecordKind::Training => &["personnel_id", "training_title", "start_date"],
            RecordKind::LeaveBalance => &["personnel_id"],
        }
    }

    /// Editable fields in form order. Includes fields not shown as columns.
    pub fn form_fields(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Personnel => &[
                "badge_number", "first_name", "middle_name", "last_name", "rank", "designation",
                "station", "email", "contact_number", "date_hired", "status",
            ],
            RecordKind::Leave => &["personnel_id", "leave_type", "start_date", "end_date", "reason", "status"],
            RecordKind::Clearance => &["personnel_id", "clearance_type", "purpose", "request_date", "remarks", "status"],
            RecordKind::Award => &["personnel_id", "award_name", "category", "award_date", "description", "status"],
            RecordKind::Inspection => &[
                "establishment_name", "owner_name", "address", "inspection_type", "inspector",
                "inspection_date", "findings", "status",
            ],
            RecordKind::Equipment => &["name", "category", "serial_number", "location", "last_maintenance", "status"],
            RecordKind::Recruitment => &[
                "full_name", "email", "contact_number", "position", "application_date", "username", "password", "status",
            ],
            RecordKind::Training => &[
                "personnel_id", "training_title", "provider", "category", "start_date", "end_date", "hours", "status",
            ],
            RecordKind::LeaveBalance => &[
                "personnel_id", "vacation_balance", "sick_balance", "emergency_balance", "special_balance",
            ],
        }
    }

    /// Allowed status labels; empty for kinds without a status.
    pub fn status_values(&self) -> &'static [&'static str] {
        use crate::status::*;
        match self {
            RecordKind::Personnel => PersonnelStatus::LABELS,
            RecordKind::Leave | RecordKind::Award => ApprovalStatus::LABELS,
            RecordKind::Clearance => ClearanceStatus::LABELS,
            RecordKind::Inspection => InspectionStatus::LABELS,
            RecordKind::Equipment => EquipmentStatus::LABELS,
            RecordKind::Recruitment => CandidateStatus::LABELS,
            RecordKind::Training => TrainingStatus::LABELS,
            RecordKind::LeaveBalance => &[],
        }
    }

    /// Local store used by the offline path of the screen, if any
    pub fn local_store(&self) -> Option<&'static str> {
        match self {
            RecordKind::Leave => Some(crate::local_store::LEAVE_STORE),
            RecordKind::Training => Some(crate::local_store::TRAINING_STORE),
            _ => None,
        }
    }

    pub fn card(&self, key: &str) -> Option<&'static SummaryCard> {
        self.summary_cards().iter().find(|c| c.key.eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "personnel" | "staff" => Ok(RecordKind::Personnel),
            "leave" | "leaves" | "leave_requests" => Ok(RecordKind::Leave),
            "clearance" | "clearances" | "clearance_requests" => Ok(RecordKind::Clearance),
            "award" | "awards" => Ok(RecordKind::Award),
            "inspection" | "inspections" => Ok(RecordKind::Inspection),
            "equipment" | "inventory" => Ok(RecordKind::Equipment),
            "recruitment" | "recruitment_personnel" | "applicants" => Ok(RecordKind::Recruitment),
            "training" | "trainings" | "training_records" => Ok(RecordKind::Training),
            "leave_balance" | "leave_balances" | "leave_credits" => Ok(RecordKind::LeaveBalance),
            _ => Err(format!(
                "Unknown record kind: {}. Use personnel, leave, clearance, award, inspection, equipment, recruitment, training or leave-balance",
                s
            )),
        }
    }
}
