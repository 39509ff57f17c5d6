//! CLI command for a full record export

use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use super::{open_output, report_written, CommandContext, OutputFormat};
use crate::error::{PfError, PfResult};
use crate::export::{export_records_yaml, write_json, RecordExport};
use crate::services::AnalyticsService;

/// Export all records to a file
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format (json or yaml)
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command(ctx: &CommandContext, args: ExportArgs) -> PfResult<()> {
    if matches!(args.format, OutputFormat::Table | OutputFormat::Csv) {
        return Err(PfError::Validation(
            "Full exports are json or yaml; use `transaction export` for CSV".into(),
        ));
    }

    let records = ctx.read(|api, rc| AnalyticsService::new(api, rc).records())?;
    let export = RecordExport::new(records, ctx.now);
    let mut writer = open_output(args.output.as_deref())?;

    match args.format {
        OutputFormat::Json => {
            write_json(&export, &mut writer, true)?;
            writeln!(writer).map_err(|e| PfError::Export(e.to_string()))?;
        }
        _ => export_records_yaml(&export, &mut writer)?,
    }
    writer.flush().map_err(|e| PfError::Export(e.to_string()))?;

    if args.output.is_some() {
        eprintln!(
            "Exported {} transactions, {} categories, {} budgets, {} goals",
            export.metadata.transaction_count,
            export.metadata.category_count,
            export.metadata.budget_count,
            export.metadata.goal_count
        );
    }
    report_written(args.output.as_ref());
    Ok(())
}
