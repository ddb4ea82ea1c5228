//! Spreadsheet import
//!
//! Row 1 holds field names (the layout `export` writes). Each following row
//! is validated, decoded and inserted. Invalid rows are reported and
//! skipped; a dry run stops after validation.

use crate::backend::Backend;
use crate::error::{AdminError, Result};
use bfp_admin_common::query::{decode_rows, mutation_body};
use bfp_admin_common::validation::{check_form, check_unique, is_numeric_field};
use bfp_admin_common::{ListRecord, Query};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Days, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Map, Value};
use std::path::Path;

/// One data row with its 1-based sheet line
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub line: usize,
    pub values: Map<String, Value>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportReport {
    pub inserted: usize,
    pub valid: usize,
    /// (line, reason)
    pub invalid: Vec<(usize, String)>,
    /// (line, backend message)
    pub failed: Vec<(usize, String)>,
}

/// Excel stores dates as days since 1899-12-30.
fn excel_serial_date(serial: f64) -> Option<String> {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let days = serial.floor();
    if days < 0.0 {
        return None;
    }
    base.checked_add_days(Days::new(days as u64)).map(|d| d.format("%Y-%m-%d").to_string())
}

fn float_text(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

fn cell_value(field: &str, cell: &Data) -> Option<Value> {
    let value = match cell {
        Data::Empty => return None,
        Data::String(s) if s.trim().is_empty() => return None,
        Data::String(s) if is_numeric_field(field) => match s.trim().parse::<f64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::String(s.trim().to_string()),
        },
        Data::String(s) => Value::String(s.trim().to_string()),
        Data::Float(f) if is_numeric_field(field) => Value::from(*f),
        Data::Int(i) if is_numeric_field(field) => Value::from(*i),
        Data::Float(f) => Value::String(float_text(*f)),
        Data::Int(i) => Value::String(i.to_string()),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => match excel_serial_date(dt.as_f64()) {
            Some(date) => Value::String(date),
            None => return None,
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.chars().take(10).collect()),
        Data::Error(_) => return None,
    };
    Some(value)
}

/// Rows of the first worksheet keyed by the header row.
pub fn read_sheet(path: &Path) -> Result<Vec<SheetRow>> {
    if !path.exists() {
        return Err(AdminError::NotFound(path.display().to_string()));
    }
    let mut workbook = open_workbook_auto(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AdminError::Spreadsheet("workbook has no sheets".into()))?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => return Ok(Vec::new()),
    };

    let mut out = Vec::new();
    for (i, cells) in rows.enumerate() {
        let values: Map<String, Value> = header
            .iter()
            .zip(cells)
            .filter(|(field, _)| !field.is_empty() && field.as_str() != "id")
            .filter_map(|(field, cell)| cell_value(field, cell).map(|v| (field.clone(), v)))
            .collect();
        if values.is_empty() {
            continue;
        }
        out.push(SheetRow { line: i + 2, values });
    }
    Ok(out)
}

fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

/// Validate every row, then insert the valid ones unless `dry_run`.
pub async fn import_rows<R: ListRecord, B: Backend + ?Sized>(
    backend: &B,
    rows: Vec<SheetRow>,
    dry_run: bool,
) -> Result<ImportReport> {
    let kind = R::KIND;
    let mut report = ImportReport::default();

    // uniqueness is checked against the server's rows and earlier sheet rows
    let mut known: Vec<R> = match backend.select(kind.table(), &Query::new()).await.and_then(decode_rows::<R>) {
        Ok(existing) => existing,
        Err(err) if dry_run => {
            tracing::warn!(error = %err, "could not fetch existing rows; uniqueness not checked");
            Vec::new()
        }
        Err(err) => return Err(err.into()),
    };

    let mut accepted = Vec::new();
    for row in rows {
        let errors = check_form(kind, &row.values);
        if !errors.is_empty() {
            let reason = errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
            report.invalid.push((row.line, reason));
            continue;
        }
        let record: R = match serde_json::from_value(Value::Object(row.values)) {
            Ok(r) => r,
            Err(e) => {
                report.invalid.push((row.line, e.to_string()));
                continue;
            }
        };
        if let Err(e) = check_unique(&record, &known) {
            report.invalid.push((row.line, e.to_string()));
            continue;
        }
        known.push(record.clone());
        accepted.push((row.line, record));
    }
    report.valid = accepted.len();

    if dry_run || accepted.is_empty() {
        return Ok(report);
    }

    let bar = progress_bar(accepted.len());
    for (line, record) in accepted {
        bar.set_message(format!("line {}", line));
        match backend.insert(kind.table(), mutation_body(&record)?).await {
            Ok(_) => report.inserted += 1,
            Err(err) => {
                tracing::warn!(line, error = %err, "insert failed");
                report.failed.push((line, err.user_message()));
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excel_serial_date() {
        assert_eq!(excel_serial_date(45355.0).as_deref(), Some("2024-03-04"));
        assert_eq!(excel_serial_date(45355.75).as_deref(), Some("2024-03-04"));
        assert_eq!(excel_serial_date(-3.0), None);
    }

    #[test]
    fn test_cell_value_numeric_fields() {
        assert_eq!(cell_value("hours", &Data::Float(8.0)), Some(Value::from(8.0)));
        assert_eq!(cell_value("hours", &Data::String("2.5".into())), Some(Value::from(2.5)));
        assert_eq!(
            cell_value("contact_number", &Data::Float(9171234567.0)),
            Some(Value::String("9171234567".into()))
        );
        assert_eq!(cell_value("reason", &Data::String("  ".into())), None);
        assert_eq!(cell_value("reason", &Data::Empty), None);
    }
}
