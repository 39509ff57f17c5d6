//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer. Commands talk to the finance
//! API through a [`CommandContext`], which is either the HTTP API with the
//! saved session or a local record bundle loaded with `--input`.

pub mod auth;
pub mod budget;
pub mod category;
pub mod config;
pub mod export;
pub mod goal;
pub mod report;
pub mod transaction;

pub use auth::{handle_login, handle_logout, handle_register, handle_whoami};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use export::{handle_export_command, ExportArgs};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::api::{FinanceApi, HttpApi, MemoryApi, RequestContext};
use crate::config::{PfPaths, Settings};
use crate::error::{PfError, PfResult};
use crate::models::{Money, Month};
use crate::services::AuthService;
use crate::storage::SessionStore;

/// Output format for reports and exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// CSV (where the data is tabular)
    Csv,
}

/// Where records come from
enum Backend {
    Remote { api: HttpApi, store: SessionStore },
    Local(MemoryApi),
}

/// Everything a command handler needs
pub struct CommandContext {
    pub paths: PfPaths,
    pub settings: Settings,
    /// Today's date, read once at startup
    pub today: NaiveDate,
    /// The current instant, read once at startup
    pub now: DateTime<Utc>,
    backend: Backend,
}

impl CommandContext {
    /// Talk to the API at `settings.api_base_url` with the saved session
    pub fn remote(
        paths: PfPaths,
        settings: Settings,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> PfResult<Self> {
        let api = HttpApi::new(settings.request_timeout())?;
        let store = SessionStore::new(paths.session_file());
        debug!(base_url = %settings.api_base_url, "Using remote API");
        Ok(Self {
            paths,
            settings,
            today,
            now,
            backend: Backend::Remote { api, store },
        })
    }

    /// Serve commands from a record bundle held in memory
    pub fn local(
        paths: PfPaths,
        settings: Settings,
        today: NaiveDate,
        now: DateTime<Utc>,
        api: MemoryApi,
    ) -> Self {
        Self {
            paths,
            settings,
            today,
            now,
            backend: Backend::Local(api),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self.backend, Backend::Local(_))
    }

    /// Run a read against the records
    ///
    /// Against the API this uses the saved session and refreshes an expired
    /// access token once.
    pub fn read<T>(
        &self,
        call: impl Fn(&dyn FinanceApi, &RequestContext) -> PfResult<T>,
    ) -> PfResult<T> {
        match &self.backend {
            Backend::Local(api) => {
                let ctx = RequestContext::anonymous(self.settings.api_base_url.as_str());
                let finance: &dyn FinanceApi = api;
                call(finance, &ctx)
            }
            Backend::Remote { api, store } => {
                let finance: &dyn FinanceApi = api;
                AuthService::new(api, api, store, &self.settings.api_base_url)
                    .with_session(|ctx| call(finance, ctx))
            }
        }
    }

    /// Run a change against the API; bundles loaded with `--input` are read-only
    pub fn write<T>(
        &self,
        call: impl Fn(&dyn FinanceApi, &RequestContext) -> PfResult<T>,
    ) -> PfResult<T> {
        if self.is_local() {
            return Err(PfError::Validation(
                "--input bundles are read-only; drop --input to change records".into(),
            ));
        }
        self.read(call)
    }

    /// Authentication service; only available against the API
    pub fn auth(&self) -> PfResult<AuthService<'_>> {
        match &self.backend {
            Backend::Remote { api, store } => Ok(AuthService::new(
                api,
                api,
                store,
                &self.settings.api_base_url,
            )),
            Backend::Local(_) => Err(PfError::Validation(
                "account commands need the API; drop --input".into(),
            )),
        }
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }
}

/// Open `path` for writing, or stdout when no path is given
pub fn open_output(path: Option<&Path>) -> PfResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                PfError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Write text to `path` or stdout
pub fn emit_text(text: &str, output: Option<&PathBuf>) -> PfResult<()> {
    let mut writer = open_output(output.map(PathBuf::as_path))?;
    writer
        .write_all(text.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| PfError::Export(e.to_string()))
}

/// Tell the user where a file was written
pub fn report_written(output: Option<&PathBuf>) {
    if let Some(path) = output {
        println!("Written to {}", path.display());
    }
}

/// Parse an amount given on the command line
pub fn parse_amount(input: &str) -> PfResult<Money> {
    Money::parse(input)
        .map_err(|e| PfError::Validation(format!("Invalid amount '{}': {}", input, e)))
}

/// Parse a YYYY-MM-DD date given on the command line
pub fn parse_date(input: &str) -> PfResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        PfError::Validation(format!("Invalid date '{}'; expected YYYY-MM-DD", input))
    })
}

/// Parse a YYYY-MM month given on the command line
pub fn parse_month(input: &str) -> PfResult<Month> {
    Month::parse(input)
        .map_err(|e| PfError::Validation(format!("Invalid month '{}': {}", input, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryKind, NewCategory, RecordSet};
    use tempfile::TempDir;

    fn local(temp_dir: &TempDir) -> CommandContext {
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        CommandContext::local(
            PfPaths::with_base_dir(temp_dir.path().to_path_buf()),
            Settings::default(),
            today,
            Utc::now(),
            MemoryApi::new(RecordSet::default()),
        )
    }

    #[test]
    fn test_local_reads_but_refuses_writes() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = local(&temp_dir);

        let categories = ctx.read(|api, rc| api.list_categories(rc)).unwrap();
        assert!(categories.is_empty());

        let err = ctx
            .write(|api, rc| {
                api.create_category(rc, &NewCategory::new("Food", CategoryKind::Expense, None))
            })
            .unwrap_err();
        assert!(err.is_validation());
        assert!(ctx.auth().is_err());
    }

    #[test]
    fn test_remote_without_session_is_unauthorized() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PfPaths::with_base_dir(temp_dir.path().to_path_buf());
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let ctx = CommandContext::remote(paths, Settings::default(), today, Utc::now()).unwrap();

        let err = ctx.read(|api, rc| api.list_goals(rc)).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_amount("12.50").unwrap(), Money::from_units(12, 50));
        assert!(parse_amount("twelve").unwrap_err().is_validation());
        assert_eq!(
            parse_date("2025-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert!(parse_date("03/01/2025").is_err());
        assert_eq!(parse_month("2025-03").unwrap(), Month::new(2025, 3).unwrap());
    }

    #[test]
    fn test_output_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        emit_text("hello\n", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
