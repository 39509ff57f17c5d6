use anyhow::Result;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use pftracker::api::MemoryApi;
use pftracker::cli::{
    handle_budget_command, handle_category_command, handle_config_command, handle_export_command,
    handle_goal_command, handle_login, handle_logout, handle_register, handle_report_command,
    handle_transaction_command, handle_whoami, CommandContext,
};
use pftracker::config::{PfPaths, Settings};
use pftracker::export::read_bundle;
use pftracker::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "pftracker",
    version,
    about = "Personal finance tracker: income, expenses, budgets, goals and analytics",
    long_about = "pftracker talks to a personal-finance tracking API. It records income \
                  and expenses, manages budgets and savings goals, and computes the \
                  dashboard analytics: month comparison, six-month trend, spending by \
                  category and a financial health score."
)]
struct Cli {
    /// Base URL of the finance API (overrides config and PFTRACKER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Read records from a local JSON or YAML bundle instead of the API
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and save the session
    Login {
        #[arg(short, long)]
        username: Option<String>,
        /// Password (prompted for if not set)
        #[arg(long, env = "PFTRACKER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the saved session
    Logout,

    /// Create an account
    Register {
        username: String,
        email: String,
        /// Password (prompted for if not set)
        #[arg(long, env = "PFTRACKER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Show the logged-in user
    Whoami,

    /// Category management commands
    #[command(subcommand)]
    Category(pftracker::cli::CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(pftracker::cli::TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(pftracker::cli::BudgetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(pftracker::cli::GoalCommands),

    /// Analytics and report pages
    #[command(subcommand)]
    Report(pftracker::cli::ReportCommands),

    /// Export all records as JSON or YAML
    Export(pftracker::cli::ExportArgs),

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<pftracker::cli::ConfigCommands>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        println!("pftracker - personal finance tracker");
        println!();
        println!("Run 'pftracker --help' for usage information.");
        println!("Run 'pftracker login' to connect to your account.");
        return Ok(());
    };

    let paths = PfPaths::new()?;
    let settings = Settings::load_or_default(&paths)?.with_api_override(cli.api_url.as_deref());

    // The only place the clock is read
    let today = Local::now().date_naive();
    let now = Utc::now();
    debug!(%today, "Starting");

    let ctx = match &cli.input {
        Some(path) => {
            let records = read_bundle(path)?;
            CommandContext::local(paths, settings, today, now, MemoryApi::new(records))
        }
        None => CommandContext::remote(paths, settings, today, now)?,
    };

    match command {
        Commands::Login { username, password } => handle_login(&ctx, username, password)?,
        Commands::Logout => handle_logout(&ctx)?,
        Commands::Register {
            username,
            email,
            password,
        } => handle_register(&ctx, username, email, password)?,
        Commands::Whoami => handle_whoami(&ctx)?,
        Commands::Category(cmd) => handle_category_command(&ctx, cmd)?,
        Commands::Transaction(cmd) => handle_transaction_command(&ctx, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&ctx, cmd)?,
        Commands::Goal(cmd) => handle_goal_command(&ctx, cmd)?,
        Commands::Report(cmd) => handle_report_command(&ctx, cmd)?,
        Commands::Export(args) => handle_export_command(&ctx, args)?,
        Commands::Config { cmd } => handle_config_command(&ctx, cmd)?,
    }

    Ok(())
}
