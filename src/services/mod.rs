//! Service layer for pftracker
//!
//! The service layer provides business logic on top of the finance API,
//! handling validation and cross-entity operations. Every service borrows
//! an API implementation and the request context for the call.

pub mod analytics;
pub mod auth;
pub mod budget;
pub mod category;
pub mod goal;
pub mod transaction;

pub use analytics::AnalyticsService;
pub use auth::AuthService;
pub use budget::{BudgetService, BudgetStatus};
pub use category::CategoryService;
pub use goal::GoalService;
pub use transaction::{RecordInput, TransactionFilter, TransactionService};
