use crate::error::Result;
use bfp_admin_common::export::generate_excel_buffer;
use bfp_admin_common::ListRecord;
use std::path::Path;

/// Write records to an xlsx file, creating parent folders.
pub fn export_excel<R: ListRecord>(records: &[R], output: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(records)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, buffer)?;
    tracing::info!(path = %output.display(), rows = records.len(), "exported");
    Ok(())
}
