//! Display formatting for terminal output
//!
//! Tables for the record lists and the text bars and gauge used by the
//! report pages.

pub mod budget;
pub mod category;
pub mod goal;
pub mod report;
pub mod transaction;

pub use budget::format_budget_status_table;
pub use category::format_category_table;
pub use goal::format_goal_table;
pub use transaction::{category_label, format_transaction_details, format_transaction_table};
