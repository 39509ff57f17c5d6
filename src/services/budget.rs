//! Budget service
//!
//! Monthly spending limits per expense category, and how much of each limit
//! the month's expenses have used.

use serde::Serialize;
use tracing::info;

use crate::api::{FinanceApi, RequestContext};
use crate::error::{PfError, PfResult};
use crate::models::{Budget, BudgetId, Category, CategoryId, Money, Month, NewBudget};
use crate::reports::Ledger;

/// Service for budget management
pub struct BudgetService<'a> {
    api: &'a dyn FinanceApi,
    ctx: &'a RequestContext,
}

/// A budget with what has been spent against it
#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub category_name: String,
    pub spent: Money,
    pub remaining: Money,
    pub is_over: bool,
}

impl BudgetStatus {
    /// Share of the budget used, in percent; 0 for a non-positive budget
    pub fn used_percent(&self) -> f64 {
        if !self.budget.amount.is_positive() {
            return 0.0;
        }
        self.spent.to_f64() / self.budget.amount.to_f64() * 100.0
    }
}

impl<'a> BudgetService<'a> {
    pub fn new(api: &'a dyn FinanceApi, ctx: &'a RequestContext) -> Self {
        Self { api, ctx }
    }

    /// Budgets, optionally only those for one month
    pub fn list(&self, month: Option<Month>) -> PfResult<Vec<Budget>> {
        let mut budgets = self.api.list_budgets(self.ctx)?;
        if let Some(month) = month {
            budgets.retain(|b| b.month == month);
        }
        budgets.sort_by(|a, b| b.month.cmp(&a.month).then_with(|| a.id.cmp(&b.id)));
        Ok(budgets)
    }

    /// Set a limit for an expense category in a month
    pub fn set(&self, category: CategoryId, month: Month, amount: Money) -> PfResult<Budget> {
        if !amount.is_positive() {
            return Err(PfError::Validation(
                "Budget amount must be greater than zero".into(),
            ));
        }

        let target = self.api.category(self.ctx, category)?;
        if !target.is_expense() {
            return Err(PfError::Validation(format!(
                "Budgets can only be set on expense categories; '{}' is not one",
                target.name
            )));
        }

        let budget = self
            .api
            .create_budget(self.ctx, &NewBudget::new(category, month, amount))?;
        info!(id = %budget.id, category = %target.name, month = %month, "Set budget");
        Ok(budget)
    }

    pub fn delete(&self, id: BudgetId) -> PfResult<()> {
        self.api.delete_budget(self.ctx, id)?;
        info!(id = %id, "Deleted budget");
        Ok(())
    }

    /// Budgets for `month` with the month's spending against each
    pub fn status(&self, month: Month) -> PfResult<Vec<BudgetStatus>> {
        let records = self.api.fetch_records(self.ctx)?;
        let ledger = Ledger::new(&records.transactions, &records.categories);

        Ok(records
            .budgets
            .iter()
            .filter(|b| b.month == month)
            .map(|budget| {
                let spent = ledger.spent_on(budget.category, month);
                let category_name = budget
                    .category_name
                    .clone()
                    .or_else(|| {
                        Category::find_by_id(&records.categories, budget.category)
                            .map(|c| c.name.clone())
                    })
                    .unwrap_or_else(|| budget.category.to_string());

                BudgetStatus {
                    budget: budget.clone(),
                    category_name,
                    spent,
                    remaining: (budget.amount - spent).max(Money::zero()),
                    is_over: spent > budget.amount,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MemoryApi, DEFAULT_API_BASE_URL};
    use crate::models::{CategoryKind, RecordSet, Transaction, TransactionId};
    use chrono::NaiveDate;

    fn ctx() -> RequestContext {
        RequestContext::anonymous(DEFAULT_API_BASE_URL)
    }

    fn api() -> MemoryApi {
        let food = Category::new(CategoryId::new(1), "Food", CategoryKind::Expense);
        let salary = Category::new(CategoryId::new(2), "Salary", CategoryKind::Income);
        let lunch = Transaction::new(
            TransactionId::new(1),
            NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            Money::from_units(350, 0),
            Some(food.id),
        );
        MemoryApi::new(RecordSet {
            transactions: vec![lunch],
            categories: vec![food, salary],
            ..RecordSet::default()
        })
    }

    fn march() -> Month {
        Month::new(2025, 3).unwrap()
    }

    #[test]
    fn test_set_requires_expense_category() {
        let api = api();
        let ctx = ctx();
        let service = BudgetService::new(&api, &ctx);

        let err = service
            .set(CategoryId::new(2), march(), Money::from_units(100, 0))
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .set(CategoryId::new(9), march(), Money::from_units(100, 0))
            .unwrap_err();
        assert!(err.is_not_found());

        let err = service
            .set(CategoryId::new(1), march(), Money::zero())
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_status_reports_overspend() {
        let api = api();
        let ctx = ctx();
        let service = BudgetService::new(&api, &ctx);
        service
            .set(CategoryId::new(1), march(), Money::from_units(300, 0))
            .unwrap();

        let status = service.status(march()).unwrap();
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].category_name, "Food");
        assert_eq!(status[0].spent, Money::from_units(350, 0));
        assert_eq!(status[0].remaining, Money::zero());
        assert!(status[0].is_over);
        assert!(status[0].used_percent() > 100.0);

        assert!(service.status(march().next()).unwrap().is_empty());
    }

    #[test]
    fn test_list_and_delete() {
        let api = api();
        let ctx = ctx();
        let service = BudgetService::new(&api, &ctx);
        let budget = service
            .set(CategoryId::new(1), march(), Money::from_units(300, 0))
            .unwrap();
        service
            .set(CategoryId::new(1), march().next(), Money::from_units(250, 0))
            .unwrap();

        assert_eq!(service.list(None).unwrap().len(), 2);
        assert_eq!(service.list(Some(march())).unwrap().len(), 1);

        service.delete(budget.id).unwrap();
        assert!(service.list(Some(march())).unwrap().is_empty());
    }
}
