//! Reports module for pftracker
//!
//! Pure derivations over the fetched records: the analytics snapshot and
//! health score, the dashboard overview, the expense and income pages, and
//! goal progress.

pub mod analytics;
pub mod goals;
pub mod health;
pub mod ledger;
pub mod overview;
pub mod spending;

pub use analytics::{
    compute_analytics, AnalyticsSnapshot, CategoryAmount, MonthComparison, MonthSummary,
    MonthlyTotals,
};
pub use goals::{GoalProgressRow, GoalsReport};
pub use health::{HealthInputs, Metrics};
pub use ledger::{Entry, Ledger, Totals};
pub use overview::{OverviewReport, RecentTransaction};
pub use spending::{
    daily_totals, income_sources, rank_top_categories, DailyTotal, ExpenseReport, IncomeReport,
    IncomeSource,
};
