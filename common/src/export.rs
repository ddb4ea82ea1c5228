//! Excel export
//!
//! One worksheet named after the record kind. Row 1 holds field names so the
//! file can be imported back; numeric fields are written as numbers.

use crate::error::Result;
use crate::types::ListRecord;
use crate::validation::is_numeric_field;
use rust_xlsxwriter::*;

/// Exported columns: `id` followed by the kind's form fields.
pub fn export_columns<R: ListRecord>() -> Vec<&'static str> {
    std::iter::once("id")
        .chain(R::KIND.form_fields().iter().copied().filter(|f| *f != "password"))
        .collect()
}

/// Write records to an xlsx buffer.
pub fn generate_excel_buffer<R: ListRecord>(records: &[R]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0xB71C1C))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    let value_format = Format::new()
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let columns = export_columns::<R>();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(R::KIND.label())?;

    for (col, key) in columns.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *key, &header_format)?;
        worksheet.set_column_width(col, 18)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, key) in columns.iter().enumerate() {
            let col = col as u16;
            let value = record.field(key);
            match value.parse::<f64>() {
                Ok(n) if is_numeric_field(key) => {
                    worksheet.write_number_with_format(row, col, n, &value_format)?;
                }
                _ => {
                    worksheet.write_string_with_format(row, col, &value, &value_format)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecruitmentCandidate, TrainingRecord};

    #[test]
    fn test_export_columns_start_with_id_and_skip_password() {
        let cols = export_columns::<RecruitmentCandidate>();
        assert_eq!(cols[0], "id");
        assert!(cols.contains(&"username"));
        assert!(!cols.contains(&"password"));
    }

    #[test]
    fn test_buffer_is_zip() {
        let records = vec![TrainingRecord {
            id: Some("1".into()),
            training_title: "Basic Fire Suppression".into(),
            hours: Some(40.0),
            ..Default::default()
        }];
        let buf = generate_excel_buffer(&records).unwrap();
        assert!(buf.starts_with(b"PK"));
    }

    #[test]
    fn test_empty_export() {
        let buf = generate_excel_buffer::<TrainingRecord>(&[]).unwrap();
        assert!(!buf.is_empty());
    }
}
