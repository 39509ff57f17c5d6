//! Transaction service
//!
//! Recording income and expenses, editing and deleting them, and listing
//! them newest first.

use chrono::NaiveDate;
use tracing::info;

use super::category::CategoryService;
use crate::api::{FinanceApi, RequestContext};
use crate::error::{PfError, PfResult};
use crate::models::{
    Category, CategoryKind, Money, NewTransaction, PaymentMode, Transaction, TransactionId,
    TransactionUpdate,
};

/// Service for transaction management
pub struct TransactionService<'a> {
    api: &'a dyn FinanceApi,
    ctx: &'a RequestContext,
}

/// Input for recording an income or expense
#[derive(Debug, Clone)]
pub struct RecordInput {
    pub kind: CategoryKind,
    /// Category name; created on first use
    pub source: String,
    /// Icon for the category if it has to be created
    pub icon: Option<String>,
    pub amount: Money,
    pub date: NaiveDate,
    pub payment_mode: PaymentMode,
    pub description: String,
}

/// Filter options for listing transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<CategoryKind>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn of_kind(kind: CategoryKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(api: &'a dyn FinanceApi, ctx: &'a RequestContext) -> Self {
        Self { api, ctx }
    }

    /// Transactions matching `filter`, newest first
    pub fn list(&self, filter: &TransactionFilter) -> PfResult<Vec<Transaction>> {
        let mut transactions = self.api.list_transactions(self.ctx)?;

        if let Some(kind) = filter.kind {
            let categories = self.api.list_categories(self.ctx)?;
            transactions.retain(|t| {
                t.category
                    .and_then(|id| Category::find_by_id(&categories, id))
                    .map(|c| c.kind == Some(kind))
                    .unwrap_or(false)
            });
        }
        if let Some(start) = filter.start_date {
            transactions.retain(|t| t.date >= start);
        }
        if let Some(end) = filter.end_date {
            transactions.retain(|t| t.date <= end);
        }

        sort_newest_first(&mut transactions);

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    /// Record an income or expense, creating its category if needed
    pub fn record(&self, input: RecordInput) -> PfResult<Transaction> {
        if input.kind == CategoryKind::Other {
            return Err(PfError::Validation(
                "Transaction kind must be income or expense".into(),
            ));
        }
        if input.source.trim().is_empty() {
            return Err(PfError::Validation("Category name cannot be empty".into()));
        }
        if input.description.trim().is_empty() {
            return Err(PfError::Validation("Description cannot be empty".into()));
        }
        validate_amount(input.amount)?;

        let category = CategoryService::new(self.api, self.ctx).find_or_create(
            &input.source,
            input.kind,
            input.icon,
        )?;

        let payload = NewTransaction {
            category: category.id,
            amount: input.amount,
            payment_mode: input.payment_mode,
            description: input.description.trim().to_string(),
            date: input.date,
        };
        let txn = self.api.create_transaction(self.ctx, &payload)?;

        info!(
            id = %txn.id,
            kind = %input.kind,
            category = %category.name,
            amount = %txn.amount,
            "Recorded transaction"
        );
        Ok(txn)
    }

    /// Change the amount, date or description of a transaction
    pub fn update(&self, id: TransactionId, update: TransactionUpdate) -> PfResult<Transaction> {
        if update.is_empty() {
            return Err(PfError::Validation("Nothing to update".into()));
        }
        if let Some(amount) = update.amount {
            validate_amount(amount)?;
        }
        if let Some(description) = &update.description {
            if description.trim().is_empty() {
                return Err(PfError::Validation("Description cannot be empty".into()));
            }
        }

        let txn = self.api.update_transaction(self.ctx, id, &update)?;
        info!(id = %txn.id, "Updated transaction");
        Ok(txn)
    }

    pub fn delete(&self, id: TransactionId) -> PfResult<()> {
        self.api.delete_transaction(self.ctx, id)?;
        info!(id = %id, "Deleted transaction");
        Ok(())
    }
}

fn validate_amount(amount: Money) -> PfResult<()> {
    if !amount.is_positive() {
        return Err(PfError::Validation(format!(
            "Amount must be greater than zero, got {}",
            amount.to_decimal_string()
        )));
    }
    Ok(())
}

/// Newest date first; the higher id breaks ties so later entries lead
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
}
