//! User settings for pftracker
//!
//! Where the API lives, how amounts and dates are shown, and how many rows
//! the report pages keep. Every field has a default, so a partial
//! `config.json` is fine.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::paths::PfPaths;
use crate::api::DEFAULT_API_BASE_URL;
use crate::error::{PfError, PfResult};
use crate::storage::{read_json, write_json_atomic};

/// Environment variable that overrides the API base URL
pub const API_URL_ENV: &str = "PFTRACKER_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the finance API, ending in `/api/`
    pub api_base_url: String,

    /// Currency symbol used when printing amounts
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    pub date_format: String,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// Categories listed under "top categories"
    pub top_categories: usize,

    /// Transactions shown on the overview
    pub recent_transactions: usize,

    /// Days covered by the expense chart
    pub expense_chart_days: usize,

    /// Days covered by the income chart
    pub income_chart_days: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            currency_symbol: "$".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            request_timeout_secs: 10,
            top_categories: 5,
            recent_transactions: 5,
            expense_chart_days: 15,
            income_chart_days: 10,
        }
    }
}

impl Settings {
    /// Load settings from disk, falling back to defaults if the file doesn't exist
    pub fn load_or_default(paths: &PfPaths) -> PfResult<Self> {
        let settings: Settings = read_json(paths.settings_file()).map_err(|e| match e {
            PfError::Json(msg) => PfError::Config(msg),
            other => other,
        })?;
        debug!(path = %paths.settings_file().display(), "Loaded settings");
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PfPaths) -> PfResult<()> {
        self.validate()?;
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Apply the `--api-url` flag or `PFTRACKER_API_URL`, flag first
    pub fn with_api_override(mut self, flag: Option<&str>) -> Self {
        let from_env = std::env::var(API_URL_ENV).ok();
        if let Some(url) = flag.map(str::to_string).or(from_env) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
        self
    }

    /// Change one setting by its file key, parsing `value` for its type
    pub fn set(&mut self, key: &str, value: &str) -> PfResult<()> {
        fn count(key: &str, value: &str) -> PfResult<usize> {
            value.trim().parse().map_err(|_| {
                PfError::Validation(format!("{} must be a whole number, got '{}'", key, value))
            })
        }

        match key {
            "api_base_url" => self.api_base_url = value.trim().to_string(),
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "date_format" => self.date_format = value.to_string(),
            "request_timeout_secs" => self.request_timeout_secs = count(key, value)? as u64,
            "top_categories" => self.top_categories = count(key, value)?,
            "recent_transactions" => self.recent_transactions = count(key, value)?,
            "expense_chart_days" => self.expense_chart_days = count(key, value)?,
            "income_chart_days" => self.income_chart_days = count(key, value)?,
            other => {
                return Err(PfError::Validation(format!("Unknown setting '{}'", other)));
            }
        }
        self.validate()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> PfResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(PfError::Config("api_base_url must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(PfError::Config(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.top_categories, 5);
        assert_eq!(settings.expense_chart_days, 15);
        assert_eq!(settings.income_chart_days, 10);
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PfPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            currency_symbol: "₹".into(),
            top_categories: 3,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_default(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PfPaths::with_base_dir(temp_dir.path().to_path_buf());
        assert_eq!(Settings::load_or_default(&paths).unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PfPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "€"}"#).unwrap();

        let loaded = Settings::load_or_default(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.recent_transactions, 5);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PfPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{not json").unwrap();

        let err = Settings::load_or_default(&paths).unwrap_err();
        assert!(matches!(err, PfError::Config(_)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let settings = Settings {
            request_timeout_secs: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_set_by_key() {
        let mut settings = Settings::default();
        settings.set("currency_symbol", "₹").unwrap();
        settings.set("top_categories", "3").unwrap();
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.top_categories, 3);

        assert!(settings.set("top_categories", "many").unwrap_err().is_validation());
        assert!(settings.set("theme", "dark").unwrap_err().is_validation());
        assert!(settings.set("request_timeout_secs", "0").is_err());
    }

    #[test]
    fn test_flag_overrides_base_url() {
        let settings = Settings::default().with_api_override(Some("http://example.test/api/"));
        assert_eq!(settings.api_base_url, "http://example.test/api/");
    }
}
