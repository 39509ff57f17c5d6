//! Per-call request context
//!
//! The base URL and bearer token travel with every call instead of living in
//! global state.

use super::secret::SecretString;
use crate::error::{PfError, PfResult};

/// API base URL used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// Endpoints relative to the API base URL
pub mod endpoints {
    pub const CATEGORIES: &str = "categories/";
    pub const TRANSACTIONS: &str = "transactions/";
    pub const BUDGETS: &str = "budgets/";
    pub const GOALS: &str = "goals/";
    pub const TOKEN: &str = "token/";
    pub const TOKEN_REFRESH: &str = "token/refresh/";
    pub const REGISTER: &str = "register/";
    pub const PROFILE: &str = "profile/";
}

/// Where to send a request and with which credentials
#[derive(Debug, Clone)]
pub struct RequestContext {
    base_url: String,
    access_token: Option<SecretString>,
}

impl RequestContext {
    /// Context without credentials, for login and registration
    pub fn anonymous(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base(base_url.into()),
            access_token: None,
        }
    }

    /// Context carrying a bearer token
    pub fn authenticated(base_url: impl Into<String>, access_token: SecretString) -> Self {
        Self {
            base_url: normalize_base(base_url.into()),
            access_token: Some(access_token),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Absolute URL for an endpoint path such as `"goals/"`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Absolute URL for one record of a collection, e.g. `goals/3/`
    pub fn record_url(&self, collection: &str, id: i64) -> String {
        format!("{}{}/", self.url(collection), id)
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self) -> PfResult<String> {
        match &self.access_token {
            Some(token) if !token.is_empty() => Ok(format!("Bearer {}", token.expose())),
            _ => Err(PfError::Unauthorized(
                "no saved session; run `pftracker login` first".into(),
            )),
        }
    }
}

fn normalize_base(mut base: String) -> String {
    let trimmed = base.trim_end().len();
    base.truncate(trimmed);
    if !base.ends_with('/') {
        base.push('/');
    }
    base
}
