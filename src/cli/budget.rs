//! Budget CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_month, CommandContext};
use crate::display::format_budget_status_table;
use crate::error::{PfError, PfResult};
use crate::models::{BudgetId, Month};
use crate::services::{BudgetService, CategoryService};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show a month's budgets with what has been spent
    List {
        /// Month (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Set a monthly limit for an expense category
    Set {
        /// Category name or ID
        category: String,
        /// Limit (e.g. "300" or "300.00")
        amount: String,
        /// Month (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID (e.g. bud-3 or 3)
        id: String,
    },
}

fn month_or_current(ctx: &CommandContext, month: Option<&str>) -> PfResult<Month> {
    match month {
        Some(month) => parse_month(month),
        None => Ok(Month::containing(ctx.today)),
    }
}

/// Handle a budget command
pub fn handle_budget_command(ctx: &CommandContext, cmd: BudgetCommands) -> PfResult<()> {
    match cmd {
        BudgetCommands::List { month } => {
            let month = month_or_current(ctx, month.as_deref())?;
            let statuses = ctx.read(|api, rc| BudgetService::new(api, rc).status(month))?;

            println!("Budgets for {}", month);
            print!("{}", format_budget_status_table(&statuses, ctx.currency()));
        }

        BudgetCommands::Set {
            category,
            amount,
            month,
        } => {
            let month = month_or_current(ctx, month.as_deref())?;
            let amount = parse_amount(&amount)?;

            let (budget, name) = ctx.write(|api, rc| {
                let target = CategoryService::new(api, rc).get(&category)?;
                let budget = BudgetService::new(api, rc).set(target.id, month, amount)?;
                Ok((budget, target.name))
            })?;

            println!("Set budget: {}", budget.id);
            println!("  Category: {}", name);
            println!("  Month: {}", month);
            println!(
                "  Limit: {}",
                budget.amount.format_with_symbol(ctx.currency())
            );
        }

        BudgetCommands::Delete { id } => {
            let id = BudgetId::parse(&id)
                .map_err(|_| PfError::Validation(format!("Invalid budget ID '{}'", id)))?;
            ctx.write(|api, rc| BudgetService::new(api, rc).delete(id))?;
            println!("Deleted budget: {}", id);
        }
    }

    Ok(())
}
