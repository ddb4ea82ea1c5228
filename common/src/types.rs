//! Record types
//!
//! One struct per record kind. Rows are decoded here, once, right after a
//! fetch: missing fields take their defaults, ids and dates are read
//! leniently, and joined references stay optional. Render and filter code
//! only ever sees these types.

use crate::kind::RecordKind;
use crate::status::*;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Display value for a missing joined reference
pub const UNKNOWN: &str = "Unknown";
/// Display value for a missing scalar
pub const NOT_AVAILABLE: &str = "N/A";

/// A record shown by a list screen.
pub trait ListRecord: Clone + Serialize + DeserializeOwned {
    const KIND: RecordKind;

    /// Field that must be unique within the collection, if any
    const UNIQUE_FIELD: Option<&'static str> = None;

    /// Backend-assigned identifier; `None` before creation.
    fn id(&self) -> Option<&str>;

    /// String value of a named field, `""` when absent.
    fn field(&self, key: &str) -> String;

    /// Lowercased concatenation of the kind's search fields
    fn search_text(&self) -> String {
        Self::KIND
            .search_fields()
            .iter()
            .map(|key| self.field(key))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Replace any plaintext secret with its sealed form before sending.
    fn seal_secrets(&mut self, _salt: &str) -> crate::error::Result<()> {
        Ok(())
    }

    /// Table cell text, with placeholder for blanks
    fn cell(&self, key: &str) -> String {
        let value = self.field(key);
        if value.trim().is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            value
        }
    }
}

// =============================================
// decode helpers
// =============================================

/// Ids arrive as integers or uuid strings.
fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Str(String),
    }
    Ok(Option::<RawId>::deserialize(d)?.map(|raw| match raw {
        RawId::Num(n) => n.to_string(),
        RawId::Str(s) => s,
    }))
}

fn de_ref<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(de_id(d)?.unwrap_or_default())
}

/// Dates arrive as `YYYY-MM-DD` or as full timestamps; anything else is
/// treated as missing.
fn de_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.and_then(|s| parse_date_prefix(&s)))
}

pub(crate) fn parse_date_prefix(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let head = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn fmt_date(date: &Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn fmt_num(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => format!("{:.2}", v),
        None => String::new(),
    }
}

/// Personnel reference resolved by a join
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonRef {
    pub first_name: String,
    pub last_name: String,
}

impl PersonRef {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

fn employee_name(person: &Option<PersonRef>) -> String {
    person
        .as_ref()
        .map(PersonRef::display_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

// =============================================
// Personnel
// =============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Personnel {
    #[serde(deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub badge_number: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    /// Legacy single-field name still present on older rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub rank: String,
    pub designation: String,
    pub station: String,
    pub email: String,
    pub contact_number: String,
    #[serde(deserialize_with = "de_date")]
    pub date_hired: Option<NaiveDate>,
    pub status: PersonnelStatus,
}

impl Personnel {
    /// `full_name` when set, otherwise "First M. Last".
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            return full.to_string();
        }
        let middle = self
            .middle_name
            .trim()
            .chars()
            .next()
            .map(|c| format!("{}.", c))
            .unwrap_or_default();
        [self.first_name.trim(), middle.as_str(), self.last_name.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ListRecord for Personnel {
    const KIND: RecordKind = RecordKind::Personnel;
    const UNIQUE_FIELD: Option<&'static str> = Some("badge_number");

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field(&self, key: &str) -> String {
        match key {
            "id" => self.id.clone().unwrap_or_default(),
            "badge_number" => self.badge_number.clone(),
            "name" => self.display_name(),
            "first_name" => self.first_name.clone(),
            "middle_name" => self.middle_name.clone(),
            "last_name" => self.last_name.clone(),
            "rank" => self.rank.clone(),
            "designation" => self.designation.clone(),
            "station" => self.station.clone(),
            "email" => self.email.clone(),
            "contact_number" => self.contact_number.clone(),
            "date_hired" => fmt_date(&self.date_hired),
            "status" => self.status.label().to_string(),
            _ => String::new(),
        }
    }
}

// =============================================
// Leave requests
// =============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveRequest {
    #[serde(deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "de_ref")]
    pub personnel_id: String,
    #[serde(skip_serializing)]
    pub personnel: Option<PersonRef>,
    pub leave_type: String,
    #[serde(deserialize_with = "de_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "de_date")]
    pub end_date: Option<NaiveDate>,
    pub num_days: Option<i64>,
    pub reason: String,
    pub status: ApprovalStatus,
}

impl LeaveRequest {
    /// Stored day count, or the inclusive span of the dates.
    pub fn days(&self) -> i64 {
        if let Some(n) = self.num_days {
            return n.max(0);
        }
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => crate::leave::leave_days(start, end).unwrap_or(0),
            _ => 0,
        }
    }
}

impl ListRecord for LeaveRequest {
    const KIND: RecordKind = RecordKind::Leave;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field(&self, key: &str) -> String {
        match key {
            "id" => self.id.clone().unwrap_or_default(),
            "personnel_id" => self.personnel_id.clone(),
            "employee" => employee_name(&self.personnel),
            "leave_type" => self.leave_type.clone(),
            "start_date" => fmt_date(&self.start_date),
            "end_date" => fmt_date(&self.end_date),
            "num_days" => self.days().to_string(),
            "reason" => self.reason.clone(),
            "status" => self.status.label().to_string(),
            _ => String::new(),
        }
    }
}

// =============================================
// Clearance requests
// =============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearanceRequest {
    #[serde(deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "de_ref")]
    pub personnel_id: String,
    #[serde(skip_serializing)]
    pub personnel: Option<PersonRef>,
    pub clearance_type: String,
    pub purpose: String,
    #[serde(deserialize_with = "de_date")]
    pub request_date: Option<NaiveDate>,
    pub remarks: String,
    pub status: ClearanceStatus,
}

impl ListRecord for ClearanceRequest {
    const KIND: RecordKind = RecordKind::Clearance;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field(&self, key: &str) -> String {
        match key {
            "id" => self.id.clone().unwrap_or_default(),
            "personnel_id" => self.personnel_id.clone(),
            "employee" => employee_name(&self.personnel),
            "clearance_type" => self.clearance_type.clone(),
            "purpose" => self.purpose.clone(),
            "request_date" => fmt_date(&self.request_date),
            "remarks" => self.remarks.clone(),
            "status" => self.status.label().to_string(),
            _ => String::new(),
        }
    }
}

// =============================================
// Awards
// =============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Award {
    #[serde(deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "de_ref")]
    pub personnel_id: String,
    #[serde(skip_serializing)]
    pub personnel: Option<PersonRef>,
    pub award_name: String,
    pub category: String,
    #[serde(deserialize_with = "de_date")]
    pub award_date: Option<NaiveDate>,
    pub description: String,
    pub status: ApprovalStatus,
}

impl ListRecord for Award {
    const KIND: RecordKind = RecordKind::Award;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field(&self, key: &str) -> String {
        match key {
            "id" => self.id.clone().unwrap_or_default(),
            "personnel_id" => self.personnel_id.clone(),
            "employee" => employee_name(&self.personnel),
            "award_name" => self.award_name.clone(),
            "category" => self.category.clone(),
            "award_date" => fmt_date(&self.award_date),
            "description" => self.description.clone(),
            "status" => self.status.label().to_string(),
            _ => String::new(),
        }
    }
}

// =============================================
// Inspections
// =============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inspection {
    #[serde(deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub establishment_name: String,
    pub owner_name: String,
    pub address: String,
    pub inspection_type: String,
    pub inspector: String,
    #[serde(deserialize_with = "de_date")]
    pub inspection_date: Option<NaiveDate>,
    pub findings: String,
    pub status: InspectionStatus,
}

impl ListRecord for Inspection {
    const KIND: RecordKind = RecordKind::Inspection;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field(&self, key: &str) -> String {
        match key {
            "id" => self.id.clone().unwrap_or_default(),
            "establishment_name" => self.establishment_name.clone(),
            "owner_name" => self.owner_name.clone(),
            "address" => self.address.clone(),
            "inspection_type" => self.inspection_type.clone(),
            "inspector" => self.inspector.clone(),
            "inspection_date" => fmt_date(&self.inspection_date),
            "findings" => self.findings.clone(),
            "status" => self.status.label().to_string(),
            _ => String::new(),
        }
    }
}

// =============================================
// Equipment inventory
// =============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    #[serde(deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub serial_number: String,
    pub location: String,
    #[serde(deserialize_with = "de_date")]
    pub last_maintenance: Option<NaiveDate>,
    pub status: EquipmentStatus,
}

impl ListRecord for Equipment {
    const KIND: RecordKind = RecordKind::Equipment;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field(&self, key: &str) -> String {
        match key {
            "id" => self.id.clone().unwrap_or_default(),
            "name" => self.name.clone(),
            "category" => self.category.clone(),
            "serial_number" => self.serial_number.clone(),
            "location" => self.location.clone(),
            "last_maintenance" => fmt_date(&self.last_maintenance),
            "status" => self.status.label().to_string(),
            _ => String::new(),
        }
    }
}

// =============================================
// Recruitment
// =============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecruitmentCandidate {
    #[serde(deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub contact_number: String,
    pub position: String,
    #[serde(deserialize_with = "de_date")]
    pub application_date: Option<NaiveDate>,
    pub status: CandidateStatus,
    pub username: String,
    /// Plaintext from a form; consumed by `credentials::seal` and never sent.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_salt: Option<String>,
}

impl ListRecord for RecruitmentCandidate {
    const KIND: RecordKind = RecordKind::Recruitment;

    fn seal_secrets(&mut self, salt: &str) -> crate::error::Result<()> {
        crate::credentials::seal(self, salt)
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field(&self, key: &str) -> String {
        match key {
            "id" => self.id.clone().unwrap_or_default(),
            "full_name" => self.full_name.clone(),
            "email" => self.email.clone(),
            "contact_number" => self.contact_number.clone(),
            "position" => self.position.clone(),
            "application_date" => fmt_date(&self.application_date),
            "status" => self.status.label().to_string(),
            "username" => self.username.clone(),
            "password" => self.password.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}

// =============================================
// Training records
// =============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingRecord {
    #[serde(deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "de_ref")]
    pub personnel_id: String,
    #[serde(skip_serializing)]
    pub personnel: Option<PersonRef>,
    pub training_title: String,
    pub provider: String,
    pub category: String,
    #[serde(deserialize_with = "de_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "de_date")]
    pub end_date: Option<NaiveDate>,
    pub hours: Option<f64>,
    pub status: TrainingStatus,
}

impl ListRecord for TrainingRecord {
    const KIND: RecordKind = RecordKind::Training;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field(&self, key: &str) -> String {
        match key {
            "id" => self.id.clone().unwrap_or_default(),
            "personnel_id" => self.personnel_id.clone(),
            "employee" => employee_name(&self.personnel),
            "training_title" => self.training_title.clone(),
            "provider" => self.provider.clone(),
            "category" => self.category.clone(),
            "start_date" => fmt_date(&self.start_date),
            "end_date" => fmt_date(&self.end_date),
            "hours" => fmt_num(self.hours),
            "status" => self.status.label().to_string(),
            _ => String::new(),
        }
    }
}

// =============================================
// Leave balances
// =============================================

/// Leave credits of one employee, in days
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveBalance {
    #[serde(deserialize_with = "de_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "de_ref")]
    pub personnel_id: String,
    #[serde(skip_serializing)]
    pub personnel: Option<PersonRef>,
    pub vacation_balance: f64,
    pub sick_balance: f64,
    pub emergency_balance: f64,
    pub special_balance: f64,
}

impl ListRecord for LeaveBalance {
    const KIND: RecordKind = RecordKind::LeaveBalance;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn field(&self, key: &str) -> String {
        match key {
            "id" => self.id.clone().unwrap_or_default(),
            "personnel_id" => self.personnel_id.clone(),
            "employee" => employee_name(&self.personnel),
            "vacation_balance" => fmt_num(Some(self.vacation_balance)),
            "sick_balance" => fmt_num(Some(self.sick_balance)),
            "emergency_balance" => fmt_num(Some(self.emergency_balance)),
            "special_balance" => fmt_num(Some(self.special_balance)),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personnel_display_name_prefers_full_name() {
        let p = Personnel {
            first_name: "Juan".into(),
            middle_name: "Santos".into(),
            last_name: "Dela Cruz".into(),
            full_name: Some("  Juan S. Dela Cruz Jr. ".into()),
            ..Default::default()
        };
        assert_eq!(p.display_name(), "Juan S. Dela Cruz Jr.");
    }

    #[test]
    fn test_personnel_display_name_from_parts() {
        let p = Personnel {
            first_name: "Maria".into(),
            middle_name: "Reyes".into(),
            last_name: "Santos".into(),
            full_name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(p.display_name(), "Maria R. Santos");

        let no_middle = Personnel { first_name: "Ana".into(), last_name: "Lim".into(), ..Default::default() };
        assert_eq!(no_middle.display_name(), "Ana Lim");
    }

    #[test]
    fn test_decode_numeric_id_and_timestamp_date() {
        let json = r#"{
            "id": 42,
            "personnel_id": 7,
            "leave_type": "Vacation",
            "start_date": "2025-03-03T00:00:00+00:00",
            "end_date": "2025-03-05",
            "status": "pending"
        }"#;
        let leave: LeaveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(leave.id.as_deref(), Some("42"));
        assert_eq!(leave.personnel_id, "7");
        assert_eq!(leave.start_date, NaiveDate::from_ymd_opt(2025, 3, 3));
        assert_eq!(leave.status, ApprovalStatus::Pending);
        assert_eq!(leave.days(), 3);
    }

    #[test]
    fn test_decode_defaults_missing_fields() {
        let p: Personnel = serde_json::from_str(r#"{"id": "a1b2", "first_name": "Jose"}"#).unwrap();
        assert_eq!(p.id(), Some("a1b2"));
        assert_eq!(p.rank, "");
        assert_eq!(p.status, PersonnelStatus::Active);
        assert_eq!(p.date_hired, None);
    }

    #[test]
    fn test_invalid_date_decodes_as_missing() {
        let award: Award = serde_json::from_str(r#"{"award_date": "not a date"}"#).unwrap();
        assert_eq!(award.award_date, None);
        assert_eq!(award.cell("award_date"), NOT_AVAILABLE);
    }

    #[test]
    fn test_missing_join_shows_unknown() {
        let clearance: ClearanceRequest =
            serde_json::from_str(r#"{"id": 1, "personnel_id": 99, "personnel": null}"#).unwrap();
        assert_eq!(clearance.field("employee"), UNKNOWN);

        let joined: ClearanceRequest = serde_json::from_str(
            r#"{"id": 2, "personnel": {"first_name": "Pedro", "last_name": "Garcia"}}"#,
        )
        .unwrap();
        assert_eq!(joined.field("employee"), "Pedro Garcia");
    }

    #[test]
    fn test_join_and_id_not_serialized_back() {
        let leave = LeaveRequest {
            personnel_id: "7".into(),
            personnel: Some(PersonRef { first_name: "A".into(), last_name: "B".into() }),
            ..Default::default()
        };
        let json = serde_json::to_value(&leave).unwrap();
        assert!(json.get("personnel").is_none());
        assert!(json.get("id").is_none());
        assert_eq!(json["status"], "Pending");
    }

    #[test]
    fn test_plaintext_password_never_serialized() {
        let c = RecruitmentCandidate {
            username: "jdoe".into(),
            password: Some("secret".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&c).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_search_text_is_lowercase_concatenation() {
        let i = Inspection {
            establishment_name: "Villanueva Hardware".into(),
            owner_name: "R. Tan".into(),
            address: "Poblacion".into(),
            inspector: "FO2 Cruz".into(),
            inspection_type: "Business".into(),
            ..Default::default()
        };
        assert_eq!(i.search_text(), "villanueva hardware r. tan poblacion fo2 cruz business");
    }

    #[test]
    fn test_number_formatting() {
        let b = LeaveBalance { vacation_balance: 15.0, sick_balance: 12.5, ..Default::default() };
        assert_eq!(b.field("vacation_balance"), "15");
        assert_eq!(b.field("sick_balance"), "12.50");
    }
}
