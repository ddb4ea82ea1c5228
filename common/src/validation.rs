//! Form validation
//!
//! Runs on the raw JSON object a form produces, before it is decoded into a
//! record or sent anywhere.

use crate::error::{Error, Result};
use crate::kind::RecordKind;
use crate::types::{parse_date_prefix, ListRecord};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    /// 09XXXXXXXXX or +639XXXXXXXXX
    static ref PH_MOBILE: Regex = Regex::new(r"^(09|\+639)\d{9}$").unwrap();
}

/// One inline form message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), message: message.into() }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn is_date_field(field: &str) -> bool {
    field.ends_with("_date") || field == "date_hired" || field == "last_maintenance"
}

/// Fields holding numbers rather than text
pub fn is_numeric_field(field: &str) -> bool {
    matches!(field, "hours" | "num_days") || field.ends_with("_balance")
}

/// Text of a form value; numbers are rendered, null is blank.
fn text(values: &Map<String, Value>, field: &str) -> String {
    match values.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}

fn parse_form_date(value: &str) -> Option<NaiveDate> {
    if ISO_DATE.is_match(value) {
        parse_date_prefix(value)
    } else {
        None
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

pub fn is_valid_mobile(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    PH_MOBILE.is_match(&compact)
}

/// All problems with a form, in field order.
pub fn check_form(kind: RecordKind, values: &Map<String, Value>) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for field in kind.required_fields() {
        if text(values, field).is_empty() {
            errors.push(FieldError::new(field, "is required"));
        }
    }

    for field in kind.form_fields().iter().filter(|f| is_date_field(f)) {
        let value = text(values, field);
        if !value.is_empty() && parse_form_date(&value).is_none() {
            errors.push(FieldError::new(field, "must be a date (YYYY-MM-DD)"));
        }
    }

    let start = parse_form_date(&text(values, "start_date"));
    let end = parse_form_date(&text(values, "end_date"));
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            errors.push(FieldError::new("end_date", "must not be before start date"));
        }
    }

    let email = text(values, "email");
    if !email.is_empty() && !is_valid_email(&email) {
        errors.push(FieldError::new("email", "is not a valid email address"));
    }

    let contact = text(values, "contact_number");
    if !contact.is_empty() && !is_valid_mobile(&contact) {
        errors.push(FieldError::new("contact_number", "must look like 09XXXXXXXXX or +639XXXXXXXXX"));
    }

    errors
}

/// `check_form` as a `Result`, all messages joined.
pub fn validate_form(kind: RecordKind, values: &Map<String, Value>) -> Result<()> {
    let errors = check_form(kind, values);
    if errors.is_empty() {
        return Ok(());
    }
    Err(Error::Validation(
        errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "),
    ))
}

/// The kind's unique field (personnel badge number) must not repeat among
/// the fetched records, ignoring the row being edited.
pub fn check_unique<R: ListRecord>(candidate: &R, existing: &[R]) -> Result<()> {
    let Some(field) = R::UNIQUE_FIELD else {
        return Ok(());
    };
    let value = candidate.field(field);
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    let clash = existing.iter().any(|r| {
        r.field(field).trim().eq_ignore_ascii_case(value)
            && (candidate.id().is_none() || r.id() != candidate.id())
    });
    if clash {
        return Err(Error::Validation(format!("{}: {} is already assigned", field, value)));
    }
    Ok(())
}
