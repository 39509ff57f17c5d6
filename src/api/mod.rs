//! Finance API collaborator
//!
//! The server owns persistence, authentication and validation. This module
//! defines the calls the client makes ([`FinanceApi`], [`AuthApi`]), an HTTP
//! implementation, and an in-memory one that serves a local record bundle.
//!
//! Every call takes an explicit [`RequestContext`]; nothing here keeps a
//! global session.

pub mod context;
pub mod http;
pub mod memory;
pub mod secret;

pub use context::{endpoints, RequestContext, DEFAULT_API_BASE_URL};
pub use http::HttpApi;
pub use memory::MemoryApi;
pub use secret::SecretString;

use crate::error::PfResult;
use crate::models::{
    Budget, BudgetId, Category, CategoryId, Goal, GoalId, GoalUpdate, NewBudget, NewCategory,
    NewGoal, NewTransaction, RecordSet, Registration, TokenPair, Transaction, TransactionId,
    TransactionUpdate, UserProfile,
};

/// Record operations against the finance API
pub trait FinanceApi {
    fn list_categories(&self, ctx: &RequestContext) -> PfResult<Vec<Category>>;

    fn list_transactions(&self, ctx: &RequestContext) -> PfResult<Vec<Transaction>>;

    fn list_budgets(&self, ctx: &RequestContext) -> PfResult<Vec<Budget>>;

    fn list_goals(&self, ctx: &RequestContext) -> PfResult<Vec<Goal>>;

    fn create_category(&self, ctx: &RequestContext, category: &NewCategory)
        -> PfResult<Category>;

    fn create_transaction(
        &self,
        ctx: &RequestContext,
        transaction: &NewTransaction,
    ) -> PfResult<Transaction>;

    /// Partial update; only the fields set in `update` change
    fn update_transaction(
        &self,
        ctx: &RequestContext,
        id: TransactionId,
        update: &TransactionUpdate,
    ) -> PfResult<Transaction>;

    fn delete_transaction(&self, ctx: &RequestContext, id: TransactionId) -> PfResult<()>;

    fn create_budget(&self, ctx: &RequestContext, budget: &NewBudget) -> PfResult<Budget>;

    fn delete_budget(&self, ctx: &RequestContext, id: BudgetId) -> PfResult<()>;

    fn create_goal(&self, ctx: &RequestContext, goal: &NewGoal) -> PfResult<Goal>;

    /// Partial update; only the fields set in `update` change
    fn update_goal(&self, ctx: &RequestContext, id: GoalId, update: &GoalUpdate)
        -> PfResult<Goal>;

    fn profile(&self, ctx: &RequestContext) -> PfResult<UserProfile>;

    /// Fetch all four collections
    ///
    /// Fails as a whole if any collection fails, so an empty result always
    /// means "no records" and never "fetch failed".
    fn fetch_records(&self, ctx: &RequestContext) -> PfResult<RecordSet> {
        Ok(RecordSet {
            transactions: self.list_transactions(ctx)?,
            categories: self.list_categories(ctx)?,
            budgets: self.list_budgets(ctx)?,
            goals: self.list_goals(ctx)?,
        })
    }

    /// Find one category by id
    fn category(&self, ctx: &RequestContext, id: CategoryId) -> PfResult<Category> {
        self.list_categories(ctx)?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| crate::error::PfError::category_not_found(id.to_string()))
    }
}

/// Credential operations; these need no bearer token
pub trait AuthApi {
    fn obtain_token(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &SecretString,
    ) -> PfResult<TokenPair>;

    fn refresh_token(&self, ctx: &RequestContext, refresh: &SecretString) -> PfResult<TokenPair>;

    fn register(&self, ctx: &RequestContext, registration: &Registration) -> PfResult<()>;
}
