//! Report CLI commands
//!
//! Each report can be printed as text or written as JSON, YAML or (where
//! the data is tabular) CSV.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use super::{emit_text, open_output, parse_date, report_written, CommandContext, OutputFormat};
use crate::error::{PfError, PfResult};
use crate::export::{write_json, write_yaml};
use crate::reports::rank_top_categories;
use crate::services::AnalyticsService;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Health score, month comparison, trend and category breakdown
    Analytics {
        #[command(flatten)]
        args: ReportArgs,
    },

    /// Totals, balance and recent transactions
    Overview {
        #[command(flatten)]
        args: ReportArgs,
    },

    /// Expense list with a daily chart
    Expenses {
        #[command(flatten)]
        args: ReportArgs,
    },

    /// Income by source with a daily chart
    Income {
        #[command(flatten)]
        args: ReportArgs,
    },

    /// Progress toward each savings goal
    Goals {
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Where and how to write a report
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Options shared by the dated reports
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Report as of this date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl ReportArgs {
    fn reference_date(&self, ctx: &CommandContext) -> PfResult<NaiveDate> {
        match self.as_of.as_deref() {
            Some(date) => parse_date(date),
            None => Ok(ctx.today),
        }
    }
}

/// Write a report in the requested format
///
/// `text` renders the table form; `csv` is `None` for reports without a
/// tabular form.
fn emit<T, F, C>(value: &T, args: &OutputArgs, text: F, csv: Option<C>) -> PfResult<()>
where
    T: Serialize,
    F: FnOnce() -> String,
    C: FnOnce(Box<dyn Write>) -> PfResult<()>,
{
    let output = args.output.as_deref();

    match args.format {
        OutputFormat::Table => emit_text(&text(), args.output.as_ref())?,
        OutputFormat::Json => {
            let mut writer = open_output(output)?;
            write_json(value, &mut writer, true)?;
            writeln!(writer).map_err(|e| PfError::Export(e.to_string()))?;
        }
        OutputFormat::Yaml => write_yaml(value, open_output(output)?)?,
        OutputFormat::Csv => match csv {
            Some(export) => export(open_output(output)?)?,
            None => {
                return Err(PfError::Validation(
                    "CSV is not available for this report; use table, json or yaml".into(),
                ))
            }
        },
    }

    report_written(args.output.as_ref());
    Ok(())
}

/// Handle a report command
pub fn handle_report_command(ctx: &CommandContext, cmd: ReportCommands) -> PfResult<()> {
    let settings = &ctx.settings;
    let currency = ctx.currency();

    match cmd {
        ReportCommands::Analytics { args } => {
            let date = args.reference_date(ctx)?;
            let snapshot = ctx.read(|api, rc| AnalyticsService::new(api, rc).snapshot(date))?;

            let text = || {
                let mut text = snapshot.format_terminal(currency);
                let top = rank_top_categories(&snapshot.top_categories, settings.top_categories);
                if !top.is_empty() {
                    text.push_str("\nTop Categories\n");
                    for (rank, category) in top.iter().enumerate() {
                        text.push_str(&format!(
                            "{:>2}. {} {:<28} {:>14}\n",
                            rank + 1,
                            category.icon,
                            category.name,
                            category.amount.format_with_symbol(currency)
                        ));
                    }
                }
                text
            };
            emit(
                &snapshot,
                &args.output,
                text,
                Some(|w: Box<dyn Write>| snapshot.export_csv(w)),
            )?;
        }

        ReportCommands::Overview { args } => {
            let date = args.reference_date(ctx)?;
            let report = ctx.read(|api, rc| {
                AnalyticsService::new(api, rc)
                    .until(date)
                    .overview(settings.recent_transactions)
            })?;
            emit(
                &report,
                &args.output,
                || report.format_terminal(currency),
                None::<fn(Box<dyn Write>) -> PfResult<()>>,
            )?;
        }

        ReportCommands::Expenses { args } => {
            let date = args.reference_date(ctx)?;
            let report = ctx.read(|api, rc| {
                AnalyticsService::new(api, rc)
                    .until(date)
                    .expenses(settings.expense_chart_days)
            })?;
            emit(
                &report,
                &args.output,
                || report.format_terminal(currency),
                Some(|w: Box<dyn Write>| report.export_csv(w)),
            )?;
        }

        ReportCommands::Income { args } => {
            let date = args.reference_date(ctx)?;
            let report = ctx.read(|api, rc| {
                AnalyticsService::new(api, rc)
                    .until(date)
                    .income(settings.income_chart_days)
            })?;
            emit(
                &report,
                &args.output,
                || report.format_terminal(currency),
                Some(|w: Box<dyn Write>| report.export_csv(w)),
            )?;
        }

        ReportCommands::Goals { output } => {
            let report = ctx.read(|api, rc| AnalyticsService::new(api, rc).goals())?;
            emit(
                &report,
                &output,
                || report.format_terminal(currency),
                None::<fn(Box<dyn Write>) -> PfResult<()>>,
            )?;
        }
    }

    Ok(())
}
