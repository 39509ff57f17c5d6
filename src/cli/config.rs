//! Config CLI commands

use clap::Subcommand;

use super::CommandContext;
use crate::config::Settings;
use crate::error::PfResult;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,

    /// Change a setting in config.json
    Set {
        /// Setting name (e.g. currency_symbol, api_base_url)
        key: String,
        value: String,
    },
}

/// Handle a config command; no subcommand means `show`
pub fn handle_config_command(ctx: &CommandContext, cmd: Option<ConfigCommands>) -> PfResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            let settings = &ctx.settings;
            let session = if ctx.paths.session_file().exists() {
                "saved"
            } else {
                "none"
            };

            println!("pftracker Configuration");
            println!("=======================");
            println!("Config directory: {}", ctx.paths.base_dir().display());
            println!("Settings file:    {}", ctx.paths.settings_file().display());
            println!("Session file:     {} ({})", ctx.paths.session_file().display(), session);
            println!();
            println!("Settings:");
            println!("  api_base_url:         {}", settings.api_base_url);
            println!("  currency_symbol:      {}", settings.currency_symbol);
            println!("  date_format:          {}", settings.date_format);
            println!("  request_timeout_secs: {}", settings.request_timeout_secs);
            println!("  top_categories:       {}", settings.top_categories);
            println!("  recent_transactions:  {}", settings.recent_transactions);
            println!("  expense_chart_days:   {}", settings.expense_chart_days);
            println!("  income_chart_days:    {}", settings.income_chart_days);
        }

        ConfigCommands::Set { key, value } => {
            // Start from the file, not from flag/env overrides
            let mut settings = Settings::load_or_default(&ctx.paths)?;
            settings.set(&key, &value)?;
            settings.save(&ctx.paths)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}
