//! Category resolution shared by every report
//!
//! A transaction counts toward income or expense only through its category.
//! Transactions whose category is missing, unknown, or of neither type are
//! dropped here once, so no report can sum them by accident.

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use crate::models::{Category, CategoryId, CategoryKind, Money, Month, Transaction};

/// A transaction paired with the category it resolved to
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub transaction: &'a Transaction,
    pub category: &'a Category,
    /// Always `Income` or `Expense`
    pub kind: CategoryKind,
}

impl Entry<'_> {
    pub fn date(&self) -> NaiveDate {
        self.transaction.date
    }

    pub fn amount(&self) -> Money {
        self.transaction.amount
    }

    pub fn is_income(&self) -> bool {
        self.kind == CategoryKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == CategoryKind::Expense
    }
}

/// Income and expense sums over some window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
}

impl Totals {
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Resolved view over a transaction list
#[derive(Debug, Clone)]
pub struct Ledger<'a> {
    entries: Vec<Entry<'a>>,
}

impl<'a> Ledger<'a> {
    /// Resolve transactions against categories
    ///
    /// When two categories share an id the later one wins.
    pub fn new(transactions: &'a [Transaction], categories: &'a [Category]) -> Self {
        let by_id: HashMap<CategoryId, &Category> =
            categories.iter().map(|c| (c.id, c)).collect();

        let mut skipped = 0usize;
        let entries = transactions
            .iter()
            .filter_map(|txn| {
                let entry = txn
                    .category
                    .and_then(|id| by_id.get(&id).copied())
                    .and_then(|category| match category.kind {
                        Some(kind @ (CategoryKind::Income | CategoryKind::Expense)) => {
                            Some(Entry {
                                transaction: txn,
                                category,
                                kind,
                            })
                        }
                        _ => None,
                    });
                if entry.is_none() {
                    skipped += 1;
                }
                entry
            })
            .collect();

        if skipped > 0 {
            debug!(skipped, "Excluded transactions without an income/expense category");
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    pub fn income(&self) -> impl Iterator<Item = &Entry<'a>> + '_ {
        self.entries.iter().filter(|e| e.is_income())
    }

    pub fn expenses(&self) -> impl Iterator<Item = &Entry<'a>> + '_ {
        self.entries.iter().filter(|e| e.is_expense())
    }

    /// Entries of one kind
    pub fn of_kind(&self, kind: CategoryKind) -> impl Iterator<Item = &Entry<'a>> + '_ {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Totals over every resolved transaction
    pub fn totals(&self) -> Totals {
        self.totals_where(|_| true)
    }

    /// Totals for dates in `[start, end]`, both inclusive
    pub fn totals_between(&self, start: NaiveDate, end: NaiveDate) -> Totals {
        self.totals_where(|e| e.date() >= start && e.date() <= end)
    }

    /// Totals over a whole calendar month
    pub fn totals_in(&self, month: Month) -> Totals {
        self.totals_between(month.start_date(), month.end_date())
    }

    /// Expense spent on one category during a calendar month
    pub fn spent_on(&self, category: CategoryId, month: Month) -> Money {
        self.expenses()
            .filter(|e| e.category.id == category && month.contains(e.date()))
            .map(|e| e.amount())
            .sum()
    }

    fn totals_where(&self, keep: impl Fn(&Entry<'a>) -> bool) -> Totals {
        self.entries
            .iter()
            .filter(|e| keep(*e))
            .fold(Totals::default(), |mut acc, e| {
                if e.is_income() {
                    acc.income += e.amount();
                } else {
                    acc.expense += e.amount();
                }
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(id: i64, category: Option<i64>, units: i64, on: NaiveDate) -> Transaction {
        Transaction::new(
            TransactionId::new(id),
            on,
            Money::from_units(units, 0),
            category.map(CategoryId::new),
        )
    }

    fn categories() -> Vec<Category> {
        let mut neither = Category::new(CategoryId::new(3), "Transfer", CategoryKind::Other);
        neither.kind = None;
        vec![
            Category::new(CategoryId::new(1), "Salary", CategoryKind::Income),
            Category::new(CategoryId::new(2), "Food", CategoryKind::Expense),
            neither,
        ]
    }

    #[test]
    fn test_unresolvable_transactions_are_dropped() {
        let cats = categories();
        let txns = vec![
            txn(1, Some(1), 1000, date(2025, 1, 5)),
            txn(2, Some(2), 40, date(2025, 1, 6)),
            txn(3, Some(3), 99, date(2025, 1, 6)),
            txn(4, Some(42), 77, date(2025, 1, 6)),
            txn(5, None, 55, date(2025, 1, 6)),
        ];
        let ledger = Ledger::new(&txns, &cats);

        assert_eq!(ledger.entries().len(), 2);
        let totals = ledger.totals();
        assert_eq!(totals.income, Money::from_units(1000, 0));
        assert_eq!(totals.expense, Money::from_units(40, 0));
        assert_eq!(totals.net(), Money::from_units(960, 0));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let cats = categories();
        let txns = vec![
            txn(1, Some(2), 10, date(2025, 1, 1)),
            txn(2, Some(2), 20, date(2025, 1, 31)),
            txn(3, Some(2), 40, date(2025, 2, 1)),
        ];
        let ledger = Ledger::new(&txns, &cats);
        let jan = Month::new(2025, 1).unwrap();

        assert_eq!(ledger.totals_in(jan).expense, Money::from_units(30, 0));
        assert_eq!(
            ledger.spent_on(CategoryId::new(2), jan),
            Money::from_units(30, 0)
        );
        assert_eq!(ledger.spent_on(CategoryId::new(1), jan), Money::zero());
    }
}
