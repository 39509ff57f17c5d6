//! Dashboard overview
//!
//! All-time totals, their shares of total volume, and the latest
//! transactions.

use serde::Serialize;

use super::ledger::Ledger;
use crate::models::{Category, CategoryId, Money, Transaction};

/// A recent transaction with its category resolved for display
#[derive(Debug, Clone, Serialize)]
pub struct RecentTransaction {
    pub transaction: Transaction,
    /// `None` when the category is missing or unknown
    pub category: Option<Category>,
}

/// All-time dashboard figures
#[derive(Debug, Clone, Serialize)]
pub struct OverviewReport {
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,
    /// Balance as a percentage of income + expenses
    pub balance_share: f64,
    pub income_share: f64,
    pub expense_share: f64,
    /// Newest first
    pub recent: Vec<RecentTransaction>,
}

impl OverviewReport {
    /// Build the overview, keeping at most `recent_limit` recent transactions
    pub fn generate(
        transactions: &[Transaction],
        categories: &[Category],
        recent_limit: usize,
    ) -> Self {
        let totals = Ledger::new(transactions, categories).totals();
        let volume = totals.income + totals.expense;

        let share = |part: Money| {
            if volume.is_positive() {
                part.cents() as f64 / volume.cents() as f64 * 100.0
            } else {
                0.0
            }
        };

        let mut recent: Vec<&Transaction> = transactions.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        let recent = recent
            .into_iter()
            .take(recent_limit)
            .map(|txn| RecentTransaction {
                transaction: txn.clone(),
                category: txn
                    .category
                    .and_then(|id| find_category(categories, id))
                    .cloned(),
            })
            .collect();

        Self {
            total_income: totals.income,
            total_expenses: totals.expense,
            balance: totals.net(),
            balance_share: share(totals.net()),
            income_share: share(totals.income),
            expense_share: share(totals.expense),
            recent,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency);
        let mut output = String::new();

        output.push_str("Overview\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>14} {:>7.1}%\n",
            "Total Balance",
            money(self.balance),
            self.balance_share
        ));
        output.push_str(&format!(
            "{:<16} {:>14} {:>7.1}%\n",
            "Total Income",
            money(self.total_income),
            self.income_share
        ));
        output.push_str(&format!(
            "{:<16} {:>14} {:>7.1}%\n",
            "Total Expenses",
            money(self.total_expenses),
            self.expense_share
        ));

        output.push_str("\nRecent Transactions\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.recent.is_empty() {
            output.push_str("No transactions yet.\n");
        }
        for item in &self.recent {
            let label = item
                .category
                .as_ref()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "Uncategorized".to_string());
            output.push_str(&format!(
                "{}  {:<24} {:>14}  {}\n",
                item.transaction.date,
                label,
                money(item.transaction.amount),
                item.transaction.description_or_empty()
            ));
        }

        output
    }
}

// Last match wins, as in the ledger's id map.
fn find_category(categories: &[Category], id: CategoryId) -> Option<&Category> {
    categories.iter().rev().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryKind, TransactionId};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn txn(id: i64, category: Option<i64>, units: i64, day: u32) -> Transaction {
        Transaction::new(
            TransactionId::new(id),
            date(day),
            Money::from_units(units, 0),
            category.map(CategoryId::new),
        )
    }

    fn categories() -> Vec<Category> {
        vec![
            Category::new(CategoryId::new(1), "Salary", CategoryKind::Income),
            Category::new(CategoryId::new(2), "Food", CategoryKind::Expense),
        ]
    }

    #[test]
    fn test_totals_and_shares() {
        let txns = vec![
            txn(1, Some(1), 750, 1),
            txn(2, Some(2), 250, 2),
            txn(3, Some(9), 10_000, 3),
        ];
        let report = OverviewReport::generate(&txns, &categories(), 5);

        assert_eq!(report.total_income, Money::from_units(750, 0));
        assert_eq!(report.total_expenses, Money::from_units(250, 0));
        assert_eq!(report.balance, Money::from_units(500, 0));
        assert_eq!(report.balance_share, 50.0);
        assert_eq!(report.income_share, 75.0);
        assert_eq!(report.expense_share, 25.0);
    }

    #[test]
    fn test_shares_are_zero_without_volume() {
        let report = OverviewReport::generate(&[], &categories(), 5);
        assert_eq!(report.balance_share, 0.0);
        assert_eq!(report.income_share, 0.0);
        assert!(report.recent.is_empty());
    }

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let txns: Vec<Transaction> = (1..=8).map(|d| txn(d as i64, None, 1, d)).collect();
        let report = OverviewReport::generate(&txns, &categories(), 5);

        let days: Vec<NaiveDate> = report.recent.iter().map(|r| r.transaction.date).collect();
        assert_eq!(days, [date(8), date(7), date(6), date(5), date(4)]);
        assert!(report.recent[0].category.is_none());
    }

    #[test]
    fn test_recent_resolves_category() {
        let txns = vec![txn(1, Some(2), 12, 4)];
        let report = OverviewReport::generate(&txns, &categories(), 5);
        assert_eq!(
            report.recent[0].category.as_ref().map(|c| c.name.as_str()),
            Some("Food")
        );
        assert!(report.format_terminal("$").contains("Food"));
    }
}
