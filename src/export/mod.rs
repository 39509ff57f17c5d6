//! Export module for pftracker
//!
//! Provides data export in multiple formats:
//! - CSV: transaction lists (spreadsheet-compatible)
//! - JSON: full record export, also readable as an `--input` bundle
//! - YAML: human-readable record export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_transactions_csv;
pub use json::{
    import_from_json, read_bundle, write_json, ExportMetadata, RecordExport,
    EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_records_yaml, import_from_yaml, write_yaml};
