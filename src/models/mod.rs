//! Core data models for pftracker
//!
//! These mirror the records the finance API exchanges: transactions,
//! categories, monthly budgets and savings goals, plus the money and month
//! value types the analytics are computed with.

pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod month;
pub mod profile;
pub mod records;
pub mod transaction;

pub use budget::{Budget, NewBudget};
pub use category::{Category, CategoryKind, NewCategory, DEFAULT_CATEGORY_ICON};
pub use goal::{Goal, GoalUpdate, NewGoal, ProgressTier};
pub use ids::{BudgetId, CategoryId, GoalId, TransactionId, UserId};
pub use money::Money;
pub use month::Month;
pub use profile::{Registration, TokenPair, UserProfile};
pub use records::RecordSet;
pub use transaction::{NewTransaction, PaymentMode, Transaction, TransactionUpdate};
