//! JSON Export functionality
//!
//! A full export wraps the four record collections with a schema version and
//! summary metadata. The collections sit at the top level of the document, so
//! an export file can be fed straight back in as an `--input` bundle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use super::yaml::import_from_yaml;
use crate::error::{PfError, PfResult};
use crate::models::RecordSet;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full record export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    #[serde(flatten)]
    pub records: RecordSet,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub category_count: usize,
    pub budget_count: usize,
    pub goal_count: usize,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl RecordExport {
    pub fn new(records: RecordSet, exported_at: DateTime<Utc>) -> Self {
        let dates = || records.transactions.iter().map(|t| t.date);
        let metadata = ExportMetadata {
            transaction_count: records.transactions.len(),
            category_count: records.categories.len(),
            budget_count: records.budgets.len(),
            goal_count: records.goals.len(),
            earliest_transaction: dates().min().map(|d| d.to_string()),
            latest_transaction: dates().max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            records,
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let category_ids: HashSet<_> = self.records.categories.iter().map(|c| c.id).collect();

        for txn in &self.records.transactions {
            if let Some(cat_id) = txn.category {
                if !category_ids.contains(&cat_id) {
                    return Err(format!(
                        "Transaction {} references unknown category {}",
                        txn.id, cat_id
                    ));
                }
            }
        }

        for budget in &self.records.budgets {
            if !category_ids.contains(&budget.category) {
                return Err(format!(
                    "Budget {} references unknown category {}",
                    budget.id, budget.category
                ));
            }
        }

        Ok(())
    }
}

/// Write any serializable value as JSON
pub fn write_json<T, W>(value: &T, writer: W, pretty: bool) -> PfResult<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    if pretty {
        serde_json::to_writer_pretty(writer, value)
    } else {
        serde_json::to_writer(writer, value)
    }
    .map_err(|e| PfError::Export(e.to_string()))
}

/// Import from a JSON export (for verification/restore)
pub fn import_from_json(json_str: &str) -> PfResult<RecordExport> {
    let export: RecordExport =
        serde_json::from_str(json_str).map_err(|e| PfError::Json(e.to_string()))?;
    export.validate().map_err(PfError::Validation)?;
    Ok(export)
}

/// Just enough of a document to tell a full export from a bare record set
#[derive(Deserialize)]
struct BundleProbe {
    #[serde(default)]
    schema_version: Option<String>,
}

/// Load a local record bundle: a bare record set or a full export, as JSON
/// or (for `.yaml`/`.yml` files) YAML. Full exports are validated.
pub fn read_bundle(path: &Path) -> PfResult<RecordSet> {
    let text = fs::read_to_string(path)
        .map_err(|e| PfError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    let context = |e: PfError| match e {
        PfError::Json(msg) => PfError::Json(format!("{}: {}", path.display(), msg)),
        other => other,
    };

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    let records = if is_yaml {
        let probe: BundleProbe =
            serde_yaml::from_str(&text).map_err(|e| context(PfError::Json(e.to_string())))?;
        if probe.schema_version.is_some() {
            import_from_yaml(&text).map_err(context)?.records
        } else {
            serde_yaml::from_str(&text).map_err(|e| context(PfError::Json(e.to_string())))?
        }
    } else {
        let probe: BundleProbe = serde_json::from_str(&text).map_err(|e| context(e.into()))?;
        if probe.schema_version.is_some() {
            import_from_json(&text).map_err(context)?.records
        } else {
            serde_json::from_str(&text).map_err(|e| context(e.into()))?
        }
    };

    debug!(
        path = %path.display(),
        transactions = records.transactions.len(),
        categories = records.categories.len(),
        "Loaded record bundle"
    );
    Ok(records)
}
