//! Goal CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date, CommandContext};
use crate::display::format_goal_table;
use crate::error::{PfError, PfResult};
use crate::models::{GoalId, Money};
use crate::services::GoalService;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// List goals with their progress
    List {
        /// Hide paused goals
        #[arg(short, long)]
        active: bool,
    },

    /// Create a savings goal
    Add {
        /// Goal title
        title: String,
        /// Target amount
        target: String,
        /// Amount already saved
        #[arg(short, long)]
        current: Option<String>,
        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,
    },

    /// Add money to a goal
    Contribute {
        /// Goal ID (e.g. goal-2 or 2)
        id: String,
        /// Amount to add
        amount: String,
    },

    /// Pause or resume a goal
    Toggle {
        /// Goal ID (e.g. goal-2 or 2)
        id: String,
    },
}

fn parse_id(input: &str) -> PfResult<GoalId> {
    GoalId::parse(input).map_err(|_| PfError::Validation(format!("Invalid goal ID '{}'", input)))
}

/// Handle a goal command
pub fn handle_goal_command(ctx: &CommandContext, cmd: GoalCommands) -> PfResult<()> {
    let currency = ctx.currency();

    match cmd {
        GoalCommands::List { active } => {
            let goals = ctx.read(|api, rc| GoalService::new(api, rc).list(active))?;
            print!("{}", format_goal_table(&goals, currency));
        }

        GoalCommands::Add {
            title,
            target,
            current,
            due,
        } => {
            let target = parse_amount(&target)?;
            let current = match current.as_deref() {
                Some(current) => parse_amount(current)?,
                None => Money::zero(),
            };
            let due = due.as_deref().map(parse_date).transpose()?;

            let goal = ctx.write(|api, rc| {
                GoalService::new(api, rc).create(&title, target, current, due)
            })?;
            println!("Created goal: {}", goal.title);
            println!("  ID: {}", goal.id);
            println!(
                "  Target: {} ({:.1}% saved)",
                goal.target_amount.format_with_symbol(currency),
                goal.progress_percent()
            );
        }

        GoalCommands::Contribute { id, amount } => {
            let id = parse_id(&id)?;
            let amount = parse_amount(&amount)?;
            let goal = ctx.write(|api, rc| GoalService::new(api, rc).contribute(id, amount))?;

            println!(
                "Added {} to {}: {} of {} ({:.1}%, {})",
                amount.format_with_symbol(currency),
                goal.title,
                goal.current_amount.format_with_symbol(currency),
                goal.target_amount.format_with_symbol(currency),
                goal.progress_percent(),
                goal.tier()
            );
        }

        GoalCommands::Toggle { id } => {
            let id = parse_id(&id)?;
            let goal = ctx.write(|api, rc| GoalService::new(api, rc).toggle_active(id))?;
            let state = if goal.is_active { "resumed" } else { "paused" };
            println!("Goal {} {}", goal.title, state);
        }
    }

    Ok(())
}
