//! HTTP implementation of the finance API
//!
//! A hyper client driven by a private current-thread tokio runtime. The rest
//! of the crate stays synchronous; `fetch_records` is the one place where
//! requests run concurrently.

use hyper::body::Bytes;
use hyper::client::HttpConnector;
use hyper::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use hyper::{Body, Client, Method, Request, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info, warn};

use super::context::{endpoints, RequestContext};
use super::secret::SecretString;
use super::{AuthApi, FinanceApi};
use crate::error::{PfError, PfResult};
use crate::models::{
    Budget, BudgetId, Category, Goal, GoalId, GoalUpdate, NewBudget, NewCategory, NewGoal,
    NewTransaction, RecordSet, Registration, TokenPair, Transaction, TransactionId,
    TransactionUpdate, UserProfile,
};

/// Finance API over HTTP
pub struct HttpApi {
    runtime: Runtime,
    client: Client<HttpConnector>,
    timeout: Duration,
}

impl HttpApi {
    /// Create a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> PfResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| PfError::Transport(format!("failed to start runtime: {}", e)))?;

        Ok(Self {
            runtime,
            client: Client::new(),
            timeout,
        })
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        authorization: Option<String>,
        body: Option<Vec<u8>>,
    ) -> PfResult<Bytes> {
        if !url.starts_with("http://") {
            return Err(PfError::Config(format!(
                "unsupported API URL {} (only http:// is supported)",
                url
            )));
        }

        let mut builder = Request::builder()
            .method(method.clone())
            .uri(url)
            .header(ACCEPT, "application/json");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }

        let request = match body {
            Some(bytes) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(bytes)),
            None => builder.body(Body::empty()),
        }
        .map_err(|e| PfError::Transport(e.to_string()))?;

        debug!(%method, url, "Sending request");

        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| timed_out(url))??;
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body());
        let bytes = tokio::time::timeout(self.timeout, body)
            .await
            .map_err(|_| timed_out(url))??;

        debug!(%method, url, status = status.as_u16(), bytes = bytes.len(), "Received response");

        if status.is_success() {
            Ok(bytes)
        } else {
            Err(status_error(status, url, &bytes))
        }
    }

    async fn get_json<T>(&self, ctx: &RequestContext, path: &str) -> PfResult<T>
    where
        T: DeserializeOwned,
    {
        let url = ctx.url(path);
        let bytes = self
            .send(Method::GET, &url, Some(ctx.authorization()?), None)
            .await?;
        decode(&bytes)
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        url: &str,
        authorization: Option<String>,
        body: &B,
    ) -> PfResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)?;
        let bytes = self.send(method, url, authorization, Some(payload)).await?;
        decode(&bytes)
    }
}

fn timed_out(url: &str) -> PfError {
    PfError::Transport(format!("request to {} timed out", url))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> PfResult<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        warn!(error = %e, "Malformed response body");
        PfError::from(e)
    })
}

/// Map a non-success status to an error
fn status_error(status: StatusCode, url: &str, body: &[u8]) -> PfError {
    let message = error_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PfError::Unauthorized(message),
        StatusCode::NOT_FOUND => PfError::NotFound {
            entity_type: "Record",
            identifier: url.to_string(),
        },
        _ => PfError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Extract a readable message from an error body
///
/// Understands `{"detail": "..."}` as well as field errors such as
/// `{"amount": ["A valid number is required."]}`.
fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            return if text.is_empty() {
                None
            } else {
                Some(text.chars().take(200).collect())
            };
        }
    };

    let object = value.as_object()?;
    if let Some(detail) = object.get("detail").and_then(|d| d.as_str()) {
        return Some(detail.to_string());
    }

    let fields: Vec<String> = object
        .iter()
        .map(|(field, errors)| {
            let text = match errors {
                serde_json::Value::Array(items) => items
                    .iter()
                    .map(|i| i.as_str().map(str::to_string).unwrap_or_else(|| i.to_string()))
                    .collect::<Vec<_>>()
                    .join(" "),
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("{}: {}", field, text)
        })
        .collect();

    if fields.is_empty() {
        None
    } else {
        Some(fields.join("; "))
    }
}

impl FinanceApi for HttpApi {
    fn list_categories(&self, ctx: &RequestContext) -> PfResult<Vec<Category>> {
        self.runtime
            .block_on(self.get_json(ctx, endpoints::CATEGORIES))
    }

    fn list_transactions(&self, ctx: &RequestContext) -> PfResult<Vec<Transaction>> {
        self.runtime
            .block_on(self.get_json(ctx, endpoints::TRANSACTIONS))
    }

    fn list_budgets(&self, ctx: &RequestContext) -> PfResult<Vec<Budget>> {
        self.runtime.block_on(self.get_json(ctx, endpoints::BUDGETS))
    }

    fn list_goals(&self, ctx: &RequestContext) -> PfResult<Vec<Goal>> {
        self.runtime.block_on(self.get_json(ctx, endpoints::GOALS))
    }

    fn create_category(
        &self,
        ctx: &RequestContext,
        category: &NewCategory,
    ) -> PfResult<Category> {
        let url = ctx.url(endpoints::CATEGORIES);
        self.runtime.block_on(self.send_json(
            Method::POST,
            &url,
            Some(ctx.authorization()?),
            category,
        ))
    }

    fn create_transaction(
        &self,
        ctx: &RequestContext,
        transaction: &NewTransaction,
    ) -> PfResult<Transaction> {
        let url = ctx.url(endpoints::TRANSACTIONS);
        self.runtime.block_on(self.send_json(
            Method::POST,
            &url,
            Some(ctx.authorization()?),
            transaction,
        ))
    }

    fn update_transaction(
        &self,
        ctx: &RequestContext,
        id: TransactionId,
        update: &TransactionUpdate,
    ) -> PfResult<Transaction> {
        let url = ctx.record_url(endpoints::TRANSACTIONS, id.get());
        self.runtime.block_on(self.send_json(
            Method::PATCH,
            &url,
            Some(ctx.authorization()?),
            update,
        ))
    }

    fn delete_transaction(&self, ctx: &RequestContext, id: TransactionId) -> PfResult<()> {
        let url = ctx.record_url(endpoints::TRANSACTIONS, id.get());
        let auth = ctx.authorization()?;
        self.runtime
            .block_on(self.send(Method::DELETE, &url, Some(auth), None))
            .map(|_| ())
    }

    fn create_budget(&self, ctx: &RequestContext, budget: &NewBudget) -> PfResult<Budget> {
        let url = ctx.url(endpoints::BUDGETS);
        self.runtime.block_on(self.send_json(
            Method::POST,
            &url,
            Some(ctx.authorization()?),
            budget,
        ))
    }

    fn delete_budget(&self, ctx: &RequestContext, id: BudgetId) -> PfResult<()> {
        let url = ctx.record_url(endpoints::BUDGETS, id.get());
        let auth = ctx.authorization()?;
        self.runtime
            .block_on(self.send(Method::DELETE, &url, Some(auth), None))
            .map(|_| ())
    }

    fn create_goal(&self, ctx: &RequestContext, goal: &NewGoal) -> PfResult<Goal> {
        let url = ctx.url(endpoints::GOALS);
        self.runtime.block_on(self.send_json(
            Method::POST,
            &url,
            Some(ctx.authorization()?),
            goal,
        ))
    }

    fn update_goal(
        &self,
        ctx: &RequestContext,
        id: GoalId,
        update: &GoalUpdate,
    ) -> PfResult<Goal> {
        let url = ctx.record_url(endpoints::GOALS, id.get());
        self.runtime.block_on(self.send_json(
            Method::PATCH,
            &url,
            Some(ctx.authorization()?),
            update,
        ))
    }

    fn profile(&self, ctx: &RequestContext) -> PfResult<UserProfile> {
        self.runtime.block_on(self.get_json(ctx, endpoints::PROFILE))
    }

    fn fetch_records(&self, ctx: &RequestContext) -> PfResult<RecordSet> {
        self.runtime.block_on(async {
            let (transactions, categories, budgets, goals) = tokio::try_join!(
                self.get_json::<Vec<Transaction>>(ctx, endpoints::TRANSACTIONS),
                self.get_json::<Vec<Category>>(ctx, endpoints::CATEGORIES),
                self.get_json::<Vec<Budget>>(ctx, endpoints::BUDGETS),
                self.get_json::<Vec<Goal>>(ctx, endpoints::GOALS),
            )?;

            info!(
                transactions = transactions.len(),
                categories = categories.len(),
                budgets = budgets.len(),
                goals = goals.len(),
                "Fetched records"
            );

            Ok::<_, PfError>(RecordSet {
                transactions,
                categories,
                budgets,
                goals,
            })
        })
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

impl AuthApi for HttpApi {
    fn obtain_token(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &SecretString,
    ) -> PfResult<TokenPair> {
        let url = ctx.url(endpoints::TOKEN);
        let credentials = Credentials {
            username,
            password: password.expose(),
        };
        self.runtime
            .block_on(self.send_json(Method::POST, &url, None, &credentials))
            .map_err(|e| match e {
                PfError::Unauthorized(_) => {
                    PfError::Unauthorized("invalid username or password".into())
                }
                other => other,
            })
    }

    fn refresh_token(&self, ctx: &RequestContext, refresh: &SecretString) -> PfResult<TokenPair> {
        let url = ctx.url(endpoints::TOKEN_REFRESH);
        let body = RefreshRequest {
            refresh: refresh.expose(),
        };
        self.runtime
            .block_on(self.send_json(Method::POST, &url, None, &body))
    }

    fn register(&self, ctx: &RequestContext, registration: &Registration) -> PfResult<()> {
        let url = ctx.url(endpoints::REGISTER);
        self.runtime
            .block_on(self.send_json::<_, serde_json::Value>(
                Method::POST,
                &url,
                None,
                registration,
            ))
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_detail() {
        let body = br#"{"detail": "Given token not valid for any token type"}"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("Given token not valid for any token type")
        );
    }

    #[test]
    fn test_error_message_field_errors() {
        let body = br#"{"amount": ["A valid number is required."]}"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("amount: A valid number is required.")
        );
    }

    #[test]
    fn test_error_message_plain_text() {
        assert_eq!(error_message(b"Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(error_message(b""), None);
    }

    #[test]
    fn test_status_mapping() {
        let url = "http://localhost/api/goals/1/";
        assert!(status_error(StatusCode::UNAUTHORIZED, url, b"").is_unauthorized());
        assert!(status_error(StatusCode::FORBIDDEN, url, b"").is_unauthorized());
        assert!(status_error(StatusCode::NOT_FOUND, url, b"").is_not_found());

        match status_error(StatusCode::BAD_REQUEST, url, br#"{"detail": "nope"}"#) {
            PfError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "nope");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        let api = HttpApi::new(Duration::from_secs(2)).unwrap();
        let ctx = RequestContext::authenticated("http://127.0.0.1:9/api/", "tok".into());
        let err = api.list_goals(&ctx).unwrap_err();
        assert!(matches!(err, PfError::Transport(_)), "{:?}", err);
    }

    #[test]
    fn test_missing_session_fails_before_sending() {
        let api = HttpApi::new(Duration::from_secs(2)).unwrap();
        let ctx = RequestContext::anonymous("http://127.0.0.1:9/api/");
        assert!(api.fetch_records(&ctx).unwrap_err().is_unauthorized());
    }

    #[test]
    fn test_https_is_rejected() {
        let api = HttpApi::new(Duration::from_secs(2)).unwrap();
        let ctx = RequestContext::authenticated("https://example.com/api/", "tok".into());
        assert!(matches!(api.list_goals(&ctx), Err(PfError::Config(_))));
    }
}
