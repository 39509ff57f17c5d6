//! Budget model
//!
//! A budget is a spending ceiling for one expense category in one calendar
//! month. The API stores the month as its first day.

use serde::{Deserialize, Serialize};

use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::month::Month;

/// A monthly category budget as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub category: CategoryId,

    /// Budgeted month (the API sends the first day, e.g. "2025-01-01")
    pub month: Month,

    pub amount: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

impl Budget {
    pub fn new(id: BudgetId, category: CategoryId, month: Month, amount: Money) -> Self {
        Self {
            id,
            category,
            month,
            amount,
            category_name: None,
        }
    }
}

/// Payload for creating a budget
#[derive(Debug, Clone, Serialize)]
pub struct NewBudget {
    pub category: CategoryId,
    /// First day of the month, as the API expects a date
    pub month: chrono::NaiveDate,
    pub amount: Money,
}

impl NewBudget {
    pub fn new(category: CategoryId, month: Month, amount: Money) -> Self {
        Self {
            category,
            month: month.start_date(),
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "id": 4, "user": 1, "category": 3, "category_name": "Food",
            "month": "2025-01-01", "amount": "500.00", "created_at": "2025-01-02T10:00:00Z"
        }"#;
        let budget: Budget = serde_json::from_str(json).unwrap();
        assert_eq!(budget.month, Month::new(2025, 1).unwrap());
        assert_eq!(budget.amount.cents(), 50_000);
    }

    #[test]
    fn test_new_budget_sends_first_of_month() {
        let payload = NewBudget::new(
            CategoryId::new(3),
            Month::new(2025, 2).unwrap(),
            Money::from_units(250, 0),
        );
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["month"], "2025-02-01");
        assert_eq!(json["category"], 3);
    }
}
