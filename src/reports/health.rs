//! Financial health scoring
//!
//! Three percentages feed one 0-100 score:
//!
//! - savings rate for the current month (weight 0.4)
//! - share of budgets kept (weight 0.3)
//! - mean goal progress (weight 0.3)
//!
//! Every function here is total: empty inputs and zero denominators fall
//! back to fixed values instead of producing NaN or infinity.

use serde::{Deserialize, Serialize};

use super::ledger::{Ledger, Totals};
use crate::models::{Budget, Goal};

const SAVINGS_WEIGHT: f64 = 0.4;
const BUDGET_WEIGHT: f64 = 0.3;
const GOAL_WEIGHT: f64 = 0.3;

/// Percentage of income kept this month; 0 when there was no income
///
/// Negative when spending exceeded income.
pub fn savings_rate(month: Totals) -> f64 {
    if !month.income.is_positive() {
        return 0.0;
    }
    month.net().cents() as f64 / month.income.cents() as f64 * 100.0
}

/// Percentage of budgets not overspent; 100 when there are no budgets
///
/// A budget is overspent when the expense on its category within its
/// calendar month is strictly greater than its amount.
pub fn budget_adherence(budgets: &[Budget], ledger: &Ledger<'_>) -> f64 {
    if budgets.is_empty() {
        return 100.0;
    }

    let over = budgets
        .iter()
        .filter(|b| ledger.spent_on(b.category, b.month) > b.amount)
        .count();

    (100.0 - over as f64 / budgets.len() as f64 * 100.0).max(0.0)
}

/// Mean progress over all goals, inactive ones included; 0 with no goals
pub fn goal_progress(goals: &[Goal]) -> f64 {
    if goals.is_empty() {
        return 0.0;
    }

    let total: f64 = goals.iter().map(Goal::progress_percent).sum();
    total / goals.len() as f64
}

/// Weighted composite, rounded and clamped to [0, 100]
pub fn health_score(savings_rate: f64, budget_adherence: f64, goal_progress: f64) -> u8 {
    let raw = savings_rate * SAVINGS_WEIGHT
        + budget_adherence * BUDGET_WEIGHT
        + goal_progress * GOAL_WEIGHT;

    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

/// Format a percentage with exactly one decimal place
///
/// Exact ties (x.25, x.75) round away from zero; every other value rounds
/// to the nearest tenth of its exact binary value. Values that round to zero
/// from below print as "0.0", never "-0.0".
pub fn format_metric(value: f64) -> String {
    // `{:.1}` would send exact ties to the even digit
    let quarters = value * 4.0;
    let value = if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        (value * 10.0).round() / 10.0
    } else {
        value
    };
    let formatted = format!("{:.1}", value);
    if formatted == "-0.0" {
        "0.0".to_string()
    } else {
        formatted
    }
}

/// The three health inputs, unformatted
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HealthInputs {
    pub savings_rate: f64,
    pub budget_adherence: f64,
    pub goal_progress: f64,
}

impl HealthInputs {
    pub fn compute(
        current_month: Totals,
        budgets: &[Budget],
        goals: &[Goal],
        ledger: &Ledger<'_>,
    ) -> Self {
        Self {
            savings_rate: savings_rate(current_month),
            budget_adherence: budget_adherence(budgets, ledger),
            goal_progress: goal_progress(goals),
        }
    }

    pub fn score(&self) -> u8 {
        health_score(self.savings_rate, self.budget_adherence, self.goal_progress)
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            savings_rate: format_metric(self.savings_rate),
            budget_adherence: format_metric(self.budget_adherence),
            goal_progress: format_metric(self.goal_progress),
        }
    }
}

/// Display-ready health metrics, one decimal place each
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub savings_rate: String,
    pub budget_adherence: String,
    pub goal_progress: String,
}

impl Default for Metrics {
    fn default() -> Self {
        HealthInputs::default().metrics()
    }
}

/// Verbal band for a health score
pub fn score_label(score: u8) -> &'static str {
    match score {
        80..=u8::MAX => "Excellent",
        60..=79 => "Good",
        40..=59 => "Fair",
        _ => "Needs attention",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BudgetId, Category, CategoryId, CategoryKind, GoalId, Money, Month, Transaction,
        TransactionId,
    };
    use chrono::NaiveDate;

    fn totals(income: i64, expense: i64) -> Totals {
        Totals {
            income: Money::from_units(income, 0),
            expense: Money::from_units(expense, 0),
        }
    }

    fn goal(target: i64, current: i64) -> Goal {
        Goal::new(
            GoalId::new(1),
            "Goal",
            Money::from_units(target, 0),
            Money::from_units(current, 0),
        )
    }

    #[test]
    fn test_savings_rate() {
        assert_eq!(savings_rate(totals(1000, 400)), 60.0);
        assert_eq!(savings_rate(totals(1000, 1500)), -50.0);
        assert_eq!(savings_rate(totals(0, 400)), 0.0);
    }

    #[test]
    fn test_budget_adherence() {
        let categories = vec![Category::new(CategoryId::new(7), "Food", CategoryKind::Expense)];
        let jan = Month::new(2025, 1).unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let food = Some(CategoryId::new(7));
        let transactions = vec![
            Transaction::new(TransactionId::new(1), day, Money::from_units(350, 0), food),
            Transaction::new(TransactionId::new(2), day, Money::from_units(250, 0), food),
        ];
        let ledger = Ledger::new(&transactions, &categories);

        assert_eq!(budget_adherence(&[], &ledger), 100.0);

        let budget = |id, amount| {
            Budget::new(BudgetId::new(id), CategoryId::new(7), jan, Money::from_units(amount, 0))
        };

        let over = budget(1, 500);
        assert_eq!(budget_adherence(&[over.clone()], &ledger), 0.0);

        let exact = budget(2, 600);
        assert_eq!(budget_adherence(&[exact.clone()], &ledger), 100.0);
        assert_eq!(budget_adherence(&[over, exact], &ledger), 50.0);

        let other_month = Budget::new(
            BudgetId::new(3),
            CategoryId::new(7),
            Month::new(2024, 1).unwrap(),
            Money::from_units(1, 0),
        );
        assert_eq!(budget_adherence(&[other_month], &ledger), 100.0);
    }

    #[test]
    fn test_goal_progress() {
        assert_eq!(goal_progress(&[]), 0.0);
        assert_eq!(goal_progress(&[goal(1000, 500)]), 50.0);
        assert_eq!(goal_progress(&[goal(100, 300), goal(100, 0)]), 50.0);
        assert_eq!(goal_progress(&[goal(0, 300), goal(100, 100)]), 50.0);
    }

    #[test]
    fn test_health_score_weights_and_clamp() {
        assert_eq!(health_score(60.0, 100.0, 0.0), 54);
        assert_eq!(health_score(100.0, 100.0, 100.0), 100);
        assert_eq!(health_score(-500.0, 0.0, 0.0), 0);
        assert_eq!(health_score(f64::NAN, 0.0, 0.0), 0);
    }

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(60.0), "60.0");
        assert_eq!(format_metric(33.333), "33.3");
        assert_eq!(format_metric(-0.04), "0.0");
        assert_eq!(format_metric(-12.5), "-12.5");
    }

    #[test]
    fn test_format_metric_ties_round_up() {
        assert_eq!(format_metric(0.25), "0.3");
        assert_eq!(format_metric(12.25), "12.3");
        assert_eq!(format_metric(12.75), "12.8");
        assert_eq!(format_metric(-0.25), "-0.3");
        // 0.35 is stored just below the tie
        assert_eq!(format_metric(0.35), "0.3");
    }

    #[test]
    fn test_goal_progress_tie_metric() {
        let goal = Goal::new(
            GoalId::new(1),
            "Bike",
            Money::from_units(400, 0),
            Money::from_units(1, 0),
        );
        let progress = goal_progress(std::slice::from_ref(&goal));
        assert_eq!(progress, 0.25);
        assert_eq!(format_metric(progress), "0.3");
    }

    #[test]
    fn test_score_label() {
        assert_eq!(score_label(100), "Excellent");
        assert_eq!(score_label(54), "Fair");
        assert_eq!(score_label(0), "Needs attention");
    }
}
