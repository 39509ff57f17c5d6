//! YAML Export functionality
//!
//! Human-readable record backups and YAML output of the report pages.

use serde::Serialize;
use std::io::Write;

use super::json::RecordExport;
use crate::error::{PfError, PfResult};

fn export_err(e: impl std::fmt::Display) -> PfError {
    PfError::Export(e.to_string())
}

/// Write any serializable value as YAML
pub fn write_yaml<T, W>(value: &T, writer: W) -> PfResult<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    serde_yaml::to_writer(writer, value).map_err(export_err)
}

/// Export all records to YAML with a descriptive header
pub fn export_records_yaml<W: Write>(export: &RecordExport, writer: &mut W) -> PfResult<()> {
    writeln!(writer, "# pftracker record export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer, "#").map_err(export_err)?;
    writeln!(writer, "# Keep it secure - it contains all your financial data.")
        .map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    write_yaml(export, writer)
}

/// Import from a YAML export
pub fn import_from_yaml(yaml_str: &str) -> PfResult<RecordExport> {
    let export: RecordExport =
        serde_yaml::from_str(yaml_str).map_err(|e| PfError::Json(e.to_string()))?;
    export.validate().map_err(PfError::Validation)?;
    Ok(export)
}
