//! Authentication service
//!
//! Logging in stores the token pair and the user's profile as a
//! [`Session`]; later commands build their [`RequestContext`] from it. An
//! expired access token is refreshed once before a call is given up on.

use tracing::{debug, info};

use crate::api::{AuthApi, FinanceApi, RequestContext, SecretString};
use crate::error::{PfError, PfResult};
use crate::models::{Registration, UserProfile};
use crate::storage::{Session, SessionStore};

/// Service for login state
pub struct AuthService<'a> {
    auth: &'a dyn AuthApi,
    api: &'a dyn FinanceApi,
    store: &'a SessionStore,
    base_url: &'a str,
}

impl<'a> AuthService<'a> {
    pub fn new(
        auth: &'a dyn AuthApi,
        api: &'a dyn FinanceApi,
        store: &'a SessionStore,
        base_url: &'a str,
    ) -> Self {
        Self {
            auth,
            api,
            store,
            base_url,
        }
    }

    fn anonymous(&self) -> RequestContext {
        RequestContext::anonymous(self.base_url)
    }

    /// Exchange credentials for tokens and save the session
    pub fn login(&self, username: &str, password: &SecretString) -> PfResult<Session> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(PfError::Validation(
                "Username and password are required".into(),
            ));
        }

        let tokens = self.auth.obtain_token(&self.anonymous(), username, password)?;
        let access = SecretString::new(tokens.access);
        let ctx = RequestContext::authenticated(self.base_url, access.clone());
        let user = self.api.profile(&ctx)?;

        let session = Session {
            access,
            refresh: SecretString::new(tokens.refresh),
            user,
        };
        self.store.save(&session)?;
        info!(user = %session.user.username, "Logged in");
        Ok(session)
    }

    /// Forget the saved session; returns whether there was one
    pub fn logout(&self) -> PfResult<bool> {
        let removed = self.store.clear()?;
        if removed {
            info!("Logged out");
        }
        Ok(removed)
    }

    /// Create an account, then log in with the same credentials
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: SecretString,
    ) -> PfResult<Session> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() {
            return Err(PfError::Validation("Username cannot be empty".into()));
        }
        if !email.contains('@') {
            return Err(PfError::Validation(format!(
                "'{}' is not an email address",
                email
            )));
        }
        if password.is_empty() {
            return Err(PfError::Validation("Password cannot be empty".into()));
        }

        let registration = Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: password.clone(),
        };
        self.auth.register(&self.anonymous(), &registration)?;
        info!(user = %username, "Registered account");

        self.login(username, &password)
    }

    /// The logged-in user's profile, as the server currently has it
    pub fn whoami(&self) -> PfResult<UserProfile> {
        self.with_session(|ctx| self.api.profile(ctx))
    }

    /// Run `call` with the saved session, refreshing the access token once
    /// if the server rejects it
    pub fn with_session<T>(&self, call: impl Fn(&RequestContext) -> PfResult<T>) -> PfResult<T> {
        let session = self.store.require()?;

        match call(&session.context(self.base_url)) {
            Err(PfError::Unauthorized(reason)) if !session.refresh.is_empty() => {
                debug!(%reason, "Access token rejected, refreshing");
                let refreshed = self.refresh(session)?;
                call(&refreshed.context(self.base_url))
            }
            other => other,
        }
    }

    fn refresh(&self, session: Session) -> PfResult<Session> {
        let tokens = self
            .auth
            .refresh_token(&self.anonymous(), &session.refresh)
            .map_err(|e| match e {
                PfError::Unauthorized(_) => PfError::Unauthorized(
                    "session expired; run `pftracker login` again".into(),
                ),
                other => other,
            })?;

        let refresh = if tokens.refresh.is_empty() {
            session.refresh
        } else {
            SecretString::new(tokens.refresh)
        };
        let renewed = Session {
            access: SecretString::new(tokens.access),
            refresh,
            user: session.user,
        };
        self.store.save(&renewed)?;
        Ok(renewed)
    }
}
