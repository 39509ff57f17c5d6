//! The four raw collections analytics are computed from

use serde::{Deserialize, Serialize};

use super::{Budget, Category, Goal, Transaction};

/// Everything the API holds for one user, fetched together
///
/// Also the shape of a local JSON bundle passed with `--input`. Missing
/// collections decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSet {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
}

impl RecordSet {
    /// True when all four collections are empty
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.categories.is_empty()
            && self.budgets.is_empty()
            && self.goals.is_empty()
    }
}
