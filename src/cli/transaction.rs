//! Transaction CLI commands

use clap::Subcommand;
use std::io::Write;
use std::path::PathBuf;

use super::category::KindArg;
use super::{
    emit_text, open_output, parse_amount, parse_date, report_written, CommandContext,
    OutputFormat,
};
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::{PfError, PfResult};
use crate::export::{export_transactions_csv, write_json, write_yaml};
use crate::models::{CategoryKind, PaymentMode, TransactionId, TransactionUpdate};
use crate::services::{RecordInput, TransactionFilter, TransactionService};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Record income
    #[command(name = "add-income")]
    AddIncome {
        /// Income source (category name; created if new)
        source: String,
        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Record an expense
    #[command(name = "add-expense")]
    AddExpense {
        /// Expense category (created if new)
        category: String,
        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Change the amount, date or description of a transaction
    Edit {
        /// Transaction ID (e.g. txn-12 or 12)
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID (e.g. txn-12 or 12)
        id: String,
    },

    /// Export transactions
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: OutputFormat,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Filters shared by list and export
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only income or only expenses
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,
    /// Earliest date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Latest date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
    /// Maximum number of transactions
    #[arg(short, long)]
    limit: Option<usize>,
}

impl FilterArgs {
    fn to_filter(&self) -> PfResult<TransactionFilter> {
        Ok(TransactionFilter {
            kind: self.kind.map(CategoryKind::from),
            start_date: self.from.as_deref().map(parse_date).transpose()?,
            end_date: self.to.as_deref().map(parse_date).transpose()?,
            limit: self.limit,
        })
    }
}

/// Fields for a new income or expense
#[derive(clap::Args, Debug, Clone)]
pub struct EntryArgs {
    /// Amount (e.g. "42.50")
    amount: String,
    /// What it was for
    #[arg(short = 'm', long)]
    description: String,
    /// Date (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    date: Option<String>,
    /// cash, card or upi
    #[arg(short = 'p', long, default_value = "cash")]
    mode: String,
    /// Icon for the category if it has to be created
    #[arg(short, long)]
    icon: Option<String>,
}

impl EntryArgs {
    fn into_input(
        self,
        kind: CategoryKind,
        source: String,
        ctx: &CommandContext,
    ) -> PfResult<RecordInput> {
        let payment_mode = PaymentMode::parse(&self.mode).ok_or_else(|| {
            PfError::Validation(format!(
                "Unknown payment mode '{}'; use cash, card or upi",
                self.mode
            ))
        })?;

        Ok(RecordInput {
            kind,
            source,
            icon: self.icon,
            amount: parse_amount(&self.amount)?,
            date: match self.date.as_deref() {
                Some(date) => parse_date(date)?,
                None => ctx.today,
            },
            payment_mode,
            description: self.description,
        })
    }
}

fn parse_id(input: &str) -> PfResult<TransactionId> {
    TransactionId::parse(input)
        .map_err(|_| PfError::Validation(format!("Invalid transaction ID '{}'", input)))
}

/// Handle a transaction command
pub fn handle_transaction_command(ctx: &CommandContext, cmd: TransactionCommands) -> PfResult<()> {
    match cmd {
        TransactionCommands::List { filter } => {
            let filter = filter.to_filter()?;
            let (transactions, categories) = ctx.read(|api, rc| {
                let transactions = TransactionService::new(api, rc).list(&filter)?;
                Ok((transactions, api.list_categories(rc)?))
            })?;
            print!(
                "{}",
                format_transaction_table(
                    &transactions,
                    &categories,
                    ctx.currency(),
                    &ctx.settings.date_format
                )
            );
        }

        TransactionCommands::AddIncome { source, entry } => {
            record(ctx, entry.into_input(CategoryKind::Income, source, ctx)?)?;
        }

        TransactionCommands::AddExpense { category, entry } => {
            record(ctx, entry.into_input(CategoryKind::Expense, category, ctx)?)?;
        }

        TransactionCommands::Edit {
            id,
            amount,
            date,
            description,
        } => {
            let id = parse_id(&id)?;
            let update = TransactionUpdate {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                description,
            };
            if update.is_empty() {
                println!("No changes specified. Use --amount, --date, or --description.");
                return Ok(());
            }

            let updated =
                ctx.write(|api, rc| TransactionService::new(api, rc).update(id, update.clone()))?;
            println!("Updated transaction: {}", updated.id);
        }

        TransactionCommands::Delete { id } => {
            let id = parse_id(&id)?;
            ctx.write(|api, rc| TransactionService::new(api, rc).delete(id))?;
            println!("Deleted transaction: {}", id);
        }

        TransactionCommands::Export {
            filter,
            format,
            output,
        } => {
            let filter = filter.to_filter()?;
            let (transactions, categories) = ctx.read(|api, rc| {
                let transactions = TransactionService::new(api, rc).list(&filter)?;
                Ok((transactions, api.list_categories(rc)?))
            })?;

            match format {
                OutputFormat::Table => {
                    let table = format_transaction_table(
                        &transactions,
                        &categories,
                        ctx.currency(),
                        &ctx.settings.date_format,
                    );
                    emit_text(&table, output.as_ref())?;
                }
                OutputFormat::Csv => {
                    let writer = open_output(output.as_deref())?;
                    export_transactions_csv(&transactions, &categories, writer)?;
                }
                OutputFormat::Json => {
                    let mut writer = open_output(output.as_deref())?;
                    write_json(&transactions, &mut writer, true)?;
                    writeln!(writer).map_err(|e| PfError::Export(e.to_string()))?;
                }
                OutputFormat::Yaml => {
                    write_yaml(&transactions, open_output(output.as_deref())?)?;
                }
            }
            report_written(output.as_ref());
        }
    }

    Ok(())
}

fn record(ctx: &CommandContext, input: RecordInput) -> PfResult<()> {
    let kind = input.kind;
    let txn = ctx.write(|api, rc| TransactionService::new(api, rc).record(input.clone()))?;
    let categories = ctx.read(|api, rc| api.list_categories(rc))?;

    let label = if kind == CategoryKind::Income {
        "income"
    } else {
        "expense"
    };
    println!("Recorded {}:", label);
    print!("{}", format_transaction_details(&txn, &categories, ctx.currency()));
    Ok(())
}
