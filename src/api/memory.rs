//! In-memory finance API
//!
//! Serves a [`RecordSet`] held in memory, e.g. a bundle loaded with
//! `--input`. Writes behave like the server's: new records get the next free
//! id and a budget for an already-budgeted category and month is rejected.

use std::sync::{Mutex, MutexGuard};

use super::context::RequestContext;
use super::FinanceApi;
use crate::error::{PfError, PfResult};
use crate::models::{
    Budget, BudgetId, Category, CategoryId, Goal, GoalId, GoalUpdate, Month, NewBudget,
    NewCategory, NewGoal, NewTransaction, RecordSet, Transaction, TransactionId,
    TransactionUpdate, UserProfile,
};

/// Finance API backed by an in-memory record set
#[derive(Debug, Default)]
pub struct MemoryApi {
    records: Mutex<RecordSet>,
    profile: Option<UserProfile>,
}

impl MemoryApi {
    pub fn new(records: RecordSet) -> Self {
        Self {
            records: Mutex::new(records),
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Copy of the current records
    pub fn snapshot(&self) -> PfResult<RecordSet> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> PfResult<MutexGuard<'_, RecordSet>> {
        self.records
            .lock()
            .map_err(|_| PfError::Storage("record set lock poisoned".into()))
    }
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

impl FinanceApi for MemoryApi {
    fn list_categories(&self, _ctx: &RequestContext) -> PfResult<Vec<Category>> {
        Ok(self.lock()?.categories.clone())
    }

    fn list_transactions(&self, _ctx: &RequestContext) -> PfResult<Vec<Transaction>> {
        Ok(self.lock()?.transactions.clone())
    }

    fn list_budgets(&self, _ctx: &RequestContext) -> PfResult<Vec<Budget>> {
        Ok(self.lock()?.budgets.clone())
    }

    fn list_goals(&self, _ctx: &RequestContext) -> PfResult<Vec<Goal>> {
        Ok(self.lock()?.goals.clone())
    }

    fn create_category(
        &self,
        _ctx: &RequestContext,
        category: &NewCategory,
    ) -> PfResult<Category> {
        let mut records = self.lock()?;
        let id = CategoryId::new(next_id(records.categories.iter().map(|c| c.id.get())));
        let created = Category::new(id, category.name.clone(), category.kind)
            .with_icon(category.icon.clone());
        records.categories.push(created.clone());
        Ok(created)
    }

    fn create_transaction(
        &self,
        _ctx: &RequestContext,
        transaction: &NewTransaction,
    ) -> PfResult<Transaction> {
        let mut records = self.lock()?;
        let category_name = records
            .categories
            .iter()
            .find(|c| c.id == transaction.category)
            .map(|c| c.name.clone())
            .ok_or_else(|| PfError::Api {
                status: 400,
                message: format!("category: Invalid pk \"{}\"", transaction.category.get()),
            })?;

        let id = TransactionId::new(next_id(records.transactions.iter().map(|t| t.id.get())));
        let mut created = Transaction::new(
            id,
            transaction.date,
            transaction.amount,
            Some(transaction.category),
        )
        .with_description(transaction.description.clone());
        created.payment_mode = transaction.payment_mode;
        created.category_name = Some(category_name);

        records.transactions.push(created.clone());
        Ok(created)
    }

    fn update_transaction(
        &self,
        _ctx: &RequestContext,
        id: TransactionId,
        update: &TransactionUpdate,
    ) -> PfResult<Transaction> {
        let mut records = self.lock()?;
        let txn = records
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| PfError::transaction_not_found(id.to_string()))?;

        if let Some(amount) = update.amount {
            txn.amount = amount;
        }
        if let Some(date) = update.date {
            txn.date = date;
        }
        if let Some(description) = &update.description {
            txn.description = Some(description.clone());
        }
        Ok(txn.clone())
    }

    fn delete_transaction(&self, _ctx: &RequestContext, id: TransactionId) -> PfResult<()> {
        let mut records = self.lock()?;
        let before = records.transactions.len();
        records.transactions.retain(|t| t.id != id);
        if records.transactions.len() == before {
            return Err(PfError::transaction_not_found(id.to_string()));
        }
        Ok(())
    }

    fn create_budget(&self, _ctx: &RequestContext, budget: &NewBudget) -> PfResult<Budget> {
        let mut records = self.lock()?;
        let month = Month::containing(budget.month);

        if records
            .budgets
            .iter()
            .any(|b| b.category == budget.category && b.month == month)
        {
            return Err(PfError::Api {
                status: 400,
                message: "The fields user, category, month must make a unique set.".into(),
            });
        }

        let category_name = records
            .categories
            .iter()
            .find(|c| c.id == budget.category)
            .map(|c| c.name.clone())
            .ok_or_else(|| PfError::category_not_found(budget.category.to_string()))?;

        let id = BudgetId::new(next_id(records.budgets.iter().map(|b| b.id.get())));
        let mut created = Budget::new(id, budget.category, month, budget.amount);
        created.category_name = Some(category_name);
        records.budgets.push(created.clone());
        Ok(created)
    }

    fn delete_budget(&self, _ctx: &RequestContext, id: BudgetId) -> PfResult<()> {
        let mut records = self.lock()?;
        let before = records.budgets.len();
        records.budgets.retain(|b| b.id != id);
        if records.budgets.len() == before {
            return Err(PfError::NotFound {
                entity_type: "Budget",
                identifier: id.to_string(),
            });
        }
        Ok(())
    }

    fn create_goal(&self, _ctx: &RequestContext, goal: &NewGoal) -> PfResult<Goal> {
        let mut records = self.lock()?;
        let id = GoalId::new(next_id(records.goals.iter().map(|g| g.id.get())));
        let mut created = Goal::new(
            id,
            goal.title.clone(),
            goal.target_amount,
            goal.current_amount,
        );
        created.target_date = goal.target_date;
        created.is_active = goal.is_active;
        records.goals.push(created.clone());
        Ok(created)
    }

    fn update_goal(
        &self,
        _ctx: &RequestContext,
        id: GoalId,
        update: &GoalUpdate,
    ) -> PfResult<Goal> {
        let mut records = self.lock()?;
        let goal = records
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| PfError::goal_not_found(id.to_string()))?;

        if let Some(current) = update.current_amount {
            goal.current_amount = current;
        }
        if let Some(active) = update.is_active {
            goal.is_active = active;
        }
        Ok(goal.clone())
    }

    fn profile(&self, _ctx: &RequestContext) -> PfResult<UserProfile> {
        self.profile.clone().ok_or_else(|| PfError::NotFound {
            entity_type: "Profile",
            identifier: "local".into(),
        })
    }

    fn fetch_records(&self, _ctx: &RequestContext) -> PfResult<RecordSet> {
        self.snapshot()
    }
}
