//! Budget display formatting

use tabled::Tabled;

use super::report::{format_bar, format_percentage, render_table};
use crate::services::BudgetStatus;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Usage")]
    usage: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Left")]
    left: String,
    #[tabled(rename = "Used")]
    used: String,
}

/// Format one month of budgets with the spending against each
pub fn format_budget_status_table(statuses: &[BudgetStatus], currency: &str) -> String {
    if statuses.is_empty() {
        return "No budgets set for this month.\n".to_string();
    }

    let rows: Vec<BudgetRow> = statuses
        .iter()
        .map(|s| BudgetRow {
            id: s.budget.id.to_string(),
            category: if s.is_over {
                format!("{} (over)", s.category_name)
            } else {
                s.category_name.clone()
            },
            usage: format_bar(s.used_percent(), 100.0, 12),
            budget: s.budget.amount.format_with_symbol(currency),
            spent: s.spent.format_with_symbol(currency),
            left: s.remaining.format_with_symbol(currency),
            used: format_percentage(s.used_percent()),
        })
        .collect();

    let over = statuses.iter().filter(|s| s.is_over).count();
    format!(
        "{}\n{} of {} budget(s) overspent\n",
        render_table(rows, 3),
        over,
        statuses.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, BudgetId, CategoryId, Money, Month};

    fn status(spent: i64) -> BudgetStatus {
        let budget = Budget::new(
            BudgetId::new(1),
            CategoryId::new(2),
            Month::new(2025, 3).unwrap(),
            Money::from_units(200, 0),
        );
        let spent = Money::from_units(spent, 0);
        BudgetStatus {
            remaining: (budget.amount - spent).max(Money::zero()),
            is_over: spent > budget.amount,
            budget,
            category_name: "Food".into(),
            spent,
        }
    }

    #[test]
    fn test_status_table() {
        let table = format_budget_status_table(&[status(50)], "$");
        assert!(table.contains("$200.00"));
        assert!(table.contains("$150.00"));
        assert!(table.contains("25.0%"));
        assert!(table.contains("0 of 1 budget(s) overspent"));
    }

    #[test]
    fn test_overspent_marked() {
        let table = format_budget_status_table(&[status(260)], "$");
        assert!(table.contains("Food (over)"));
        assert!(table.contains("1 of 1 budget(s) overspent"));
    }
}
