//! Analytics snapshot
//!
//! Derives the dashboard analytics from the raw record collections: the
//! current vs. previous month comparison, an expense breakdown by category
//! name, a six-month income/expense trend and the financial health score.
//!
//! The computation is pure. The reference date is always passed in; nothing
//! here reads the clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;

use super::health::{HealthInputs, Metrics};
use super::ledger::{Ledger, Totals};
use crate::display::report::{format_bar, format_score_gauge};
use crate::error::{PfError, PfResult};
use crate::models::{Budget, Category, Goal, Money, Month, RecordSet, Transaction};

/// Number of months in the trend, reference month included
pub const TREND_MONTHS: u32 = 6;

/// Bucket name for expenses whose category has an empty name
pub const FALLBACK_CATEGORY_NAME: &str = "Other";

/// Icon for breakdown buckets whose category has an empty icon
pub const FALLBACK_EXPENSE_ICON: &str = "💸";

/// Income, expense and their difference for one window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub income: Money,
    pub expense: Money,
    pub savings: Money,
}

impl From<Totals> for MonthSummary {
    fn from(totals: Totals) -> Self {
        Self {
            income: totals.income,
            expense: totals.expense,
            savings: totals.net(),
        }
    }
}

/// Month-to-date figures next to the whole previous month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthComparison {
    pub current_month: MonthSummary,
    pub last_month: MonthSummary,
}

/// Percent change of each figure against the previous month
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthChanges {
    pub income: f64,
    pub expense: f64,
    pub savings: f64,
}

impl MonthComparison {
    pub fn changes(&self) -> MonthChanges {
        let current = &self.current_month;
        let last = &self.last_month;
        MonthChanges {
            income: percent_change(current.income, last.income),
            expense: percent_change(current.expense, last.expense),
            savings: percent_change(current.savings, last.savings),
        }
    }
}

/// Relative change in percent; 0 when the previous value is not positive
pub fn percent_change(current: Money, previous: Money) -> f64 {
    if !previous.is_positive() {
        return 0.0;
    }
    (current - previous).cents() as f64 / previous.cents() as f64 * 100.0
}

/// Expense total for one category name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub name: String,
    pub icon: String,
    pub amount: Money,
}

/// Income and expense for one calendar month of the trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    /// Short month name ("Jan"); repeats across years
    pub month_label: String,
    /// The month itself, "YYYY-MM"
    pub period: Month,
    pub income: Money,
    pub expense: Money,
}

/// Everything the analytics view shows, computed in one pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub month_comparison: MonthComparison,
    /// Expense totals by category name, in first-seen order
    pub category_data: Vec<CategoryAmount>,
    /// Six months, oldest first, ending with the reference month
    pub monthly_data: Vec<MonthlyTotals>,
    pub health_score: u8,
    pub metrics: Metrics,
    /// Same contents and order as `category_data`; ranking is up to the consumer
    pub top_categories: Vec<CategoryAmount>,
}

/// Compute the analytics snapshot as of `reference_date`
///
/// Transactions whose category does not resolve to an income or expense
/// category are ignored everywhere. When all four collections are empty the
/// result is the all-zero snapshot (score 0, every metric "0.0").
pub fn compute_analytics(
    transactions: &[Transaction],
    categories: &[Category],
    budgets: &[Budget],
    goals: &[Goal],
    reference_date: NaiveDate,
) -> AnalyticsSnapshot {
    let reference_month = Month::containing(reference_date);

    if transactions.is_empty() && categories.is_empty() && budgets.is_empty() && goals.is_empty()
    {
        return AnalyticsSnapshot::empty(reference_month);
    }

    let ledger = Ledger::new(transactions, categories);

    let current = ledger.totals_between(reference_month.start_date(), reference_date);
    let last = ledger.totals_in(reference_month.prev());
    let month_comparison = MonthComparison {
        current_month: current.into(),
        last_month: last.into(),
    };

    let category_data = category_breakdown(&ledger);
    let monthly_data = monthly_trend(&ledger, reference_month);

    let health = HealthInputs::compute(current, budgets, goals, &ledger);

    AnalyticsSnapshot {
        month_comparison,
        top_categories: category_data.clone(),
        category_data,
        monthly_data,
        health_score: health.score(),
        metrics: health.metrics(),
    }
}

/// Sum expenses per category name, keeping the first icon seen for a name
///
/// Distinct categories that share a name land in the same bucket.
fn category_breakdown(ledger: &Ledger<'_>) -> Vec<CategoryAmount> {
    let mut buckets: Vec<CategoryAmount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in ledger.expenses() {
        let name = non_empty_or(&entry.category.name, FALLBACK_CATEGORY_NAME);

        match index.get(name) {
            Some(&i) => buckets[i].amount += entry.amount(),
            None => {
                index.insert(name.to_string(), buckets.len());
                buckets.push(CategoryAmount {
                    name: name.to_string(),
                    icon: non_empty_or(&entry.category.icon, FALLBACK_EXPENSE_ICON).to_string(),
                    amount: entry.amount(),
                });
            }
        }
    }

    buckets
}

fn monthly_trend(ledger: &Ledger<'_>, reference_month: Month) -> Vec<MonthlyTotals> {
    reference_month
        .trailing(TREND_MONTHS)
        .into_iter()
        .map(|month| {
            let totals = ledger.totals_in(month);
            MonthlyTotals {
                month_label: month.short_label(),
                period: month,
                income: totals.income,
                expense: totals.expense,
            }
        })
        .collect()
}

pub(crate) fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

impl AnalyticsSnapshot {
    /// Compute the snapshot for a fetched or loaded record set
    pub fn generate(records: &RecordSet, reference_date: NaiveDate) -> Self {
        compute_analytics(
            &records.transactions,
            &records.categories,
            &records.budgets,
            &records.goals,
            reference_date,
        )
    }

    /// The all-zero snapshot, with the trend months still labelled
    pub fn empty(reference_month: Month) -> Self {
        let monthly_data = reference_month
            .trailing(TREND_MONTHS)
            .into_iter()
            .map(|month| MonthlyTotals {
                month_label: month.short_label(),
                period: month,
                income: Money::zero(),
                expense: Money::zero(),
            })
            .collect();

        Self {
            month_comparison: MonthComparison::default(),
            category_data: Vec::new(),
            monthly_data,
            health_score: 0,
            metrics: Metrics::default(),
            top_categories: Vec::new(),
        }
    }

    /// The month the snapshot was computed for
    pub fn reference_month(&self) -> Option<Month> {
        self.monthly_data.last().map(|m| m.period)
    }

    /// Format the snapshot for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();
        let money = |m: Money| m.format_with_symbol(currency);

        let title = match self.reference_month() {
            Some(month) => format!("Analytics for {}", month),
            None => "Analytics".to_string(),
        };
        output.push_str(&title);
        output.push('\n');
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output.push_str(&format!(
            "Health Score: {}\n",
            format_score_gauge(self.health_score)
        ));
        output.push_str(&format!(
            "  Savings rate {}%  |  Budget adherence {}%  |  Goal progress {}%\n\n",
            self.metrics.savings_rate, self.metrics.budget_adherence, self.metrics.goal_progress
        ));

        let current = &self.month_comparison.current_month;
        let last = &self.month_comparison.last_month;
        let changes = self.month_comparison.changes();
        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>9}\n",
            "", "This Month", "Last Month", "Change"
        ));
        for (label, now, before, change) in [
            ("Income", current.income, last.income, changes.income),
            ("Expense", current.expense, last.expense, changes.expense),
            ("Savings", current.savings, last.savings, changes.savings),
        ] {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>8.1}%\n",
                label,
                money(now),
                money(before),
                change
            ));
        }

        output.push_str("\nSix-Month Trend\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        let peak = self
            .monthly_data
            .iter()
            .map(|m| m.income.max(m.expense))
            .max()
            .unwrap_or_default();
        for row in &self.monthly_data {
            output.push_str(&format!(
                "{:<4} {:<8} {:>14} {:>14}  {}\n",
                row.month_label,
                row.period,
                money(row.income),
                money(row.expense),
                format_bar(row.expense.to_f64(), peak.to_f64(), 20)
            ));
        }

        output.push_str("\nExpenses by Category\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.category_data.is_empty() {
            output.push_str("No expenses recorded.\n");
        }
        for category in &self.category_data {
            output.push_str(&format!(
                "{} {:<30} {:>14}\n",
                category.icon,
                category.name,
                money(category.amount)
            ));
        }

        output
    }

    /// Export the trend and category rows to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> PfResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| PfError::Export(e.to_string());

        csv_writer
            .write_record(["Section", "Label", "Period", "Income", "Expense", "Amount"])
            .map_err(export_err)?;

        for row in &self.monthly_data {
            let period = row.period.to_string();
            let income = row.income.to_decimal_string();
            let expense = row.expense.to_decimal_string();
            csv_writer
                .write_record([
                    "trend",
                    row.month_label.as_str(),
                    period.as_str(),
                    income.as_str(),
                    expense.as_str(),
                    "",
                ])
                .map_err(export_err)?;
        }

        for category in &self.category_data {
            let amount = category.amount.to_decimal_string();
            csv_writer
                .write_record(["category", category.name.as_str(), "", "", "", amount.as_str()])
                .map_err(export_err)?;
        }

        csv_writer
            .flush()
            .map_err(|e| PfError::Export(e.to_string()))?;
        Ok(())
    }
}
