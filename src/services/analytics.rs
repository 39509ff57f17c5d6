//! Analytics service
//!
//! Fetches the four record collections and feeds them to the pure report
//! builders. The reference date is always passed in.

use chrono::NaiveDate;
use tracing::debug;

use crate::api::{FinanceApi, RequestContext};
use crate::error::PfResult;
use crate::models::RecordSet;
use crate::reports::{AnalyticsSnapshot, ExpenseReport, GoalsReport, IncomeReport, OverviewReport};

/// Service for the report pages
pub struct AnalyticsService<'a> {
    api: &'a dyn FinanceApi,
    ctx: &'a RequestContext,
    cutoff: Option<NaiveDate>,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(api: &'a dyn FinanceApi, ctx: &'a RequestContext) -> Self {
        Self {
            api,
            ctx,
            cutoff: None,
        }
    }

    /// Leave transactions dated after `date` out of the overview, expense
    /// and income pages
    pub fn until(mut self, date: NaiveDate) -> Self {
        self.cutoff = Some(date);
        self
    }

    fn page_records(&self) -> PfResult<RecordSet> {
        let mut records = self.records()?;
        if let Some(cutoff) = self.cutoff {
            records.transactions.retain(|t| t.date <= cutoff);
        }
        Ok(records)
    }

    /// Fetch all records; any failed collection fails the whole fetch
    pub fn records(&self) -> PfResult<RecordSet> {
        let records = self.api.fetch_records(self.ctx)?;
        debug!(
            transactions = records.transactions.len(),
            categories = records.categories.len(),
            budgets = records.budgets.len(),
            goals = records.goals.len(),
            "Records ready for reporting"
        );
        Ok(records)
    }

    /// The analytics snapshot as of `reference_date`
    pub fn snapshot(&self, reference_date: NaiveDate) -> PfResult<AnalyticsSnapshot> {
        let records = self.records()?;
        Ok(AnalyticsSnapshot::generate(&records, reference_date))
    }

    pub fn overview(&self, recent_limit: usize) -> PfResult<OverviewReport> {
        let records = self.page_records()?;
        Ok(OverviewReport::generate(
            &records.transactions,
            &records.categories,
            recent_limit,
        ))
    }

    pub fn expenses(&self, chart_days: usize) -> PfResult<ExpenseReport> {
        let records = self.page_records()?;
        Ok(ExpenseReport::generate(
            &records.transactions,
            &records.categories,
            chart_days,
        ))
    }

    pub fn income(&self, chart_days: usize) -> PfResult<IncomeReport> {
        let records = self.page_records()?;
        Ok(IncomeReport::generate(
            &records.transactions,
            &records.categories,
            chart_days,
        ))
    }

    pub fn goals(&self) -> PfResult<GoalsReport> {
        let goals = self.api.list_goals(self.ctx)?;
        Ok(GoalsReport::generate(&goals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MemoryApi, DEFAULT_API_BASE_URL};
    use crate::models::{
        Category, CategoryId, CategoryKind, Goal, GoalId, Money, Transaction, TransactionId,
    };

    fn ctx() -> RequestContext {
        RequestContext::anonymous(DEFAULT_API_BASE_URL)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn records() -> RecordSet {
        let salary = Category::new(CategoryId::new(1), "Salary", CategoryKind::Income);
        let food = Category::new(CategoryId::new(2), "Food", CategoryKind::Expense);
        RecordSet {
            transactions: vec![
                Transaction::new(
                    TransactionId::new(1),
                    date(2025, 3, 1),
                    Money::from_units(1000, 0),
                    Some(salary.id),
                ),
                Transaction::new(
                    TransactionId::new(2),
                    date(2025, 3, 5),
                    Money::from_units(400, 0),
                    Some(food.id),
                ),
            ],
            categories: vec![salary, food],
            budgets: Vec::new(),
            goals: vec![Goal::new(
                GoalId::new(1),
                "Trip",
                Money::from_units(100, 0),
                Money::from_units(50, 0),
            )],
        }
    }

    #[test]
    fn test_snapshot_uses_reference_date() {
        let api = MemoryApi::new(records());
        let ctx = ctx();
        let service = AnalyticsService::new(&api, &ctx);

        let snapshot = service.snapshot(date(2025, 3, 31)).unwrap();
        assert_eq!(
            snapshot.month_comparison.current_month.income,
            Money::from_units(1000, 0)
        );
        assert_eq!(snapshot.metrics.savings_rate, "60.0");

        let next_month = service.snapshot(date(2025, 4, 10)).unwrap();
        assert_eq!(
            next_month.month_comparison.last_month.expense,
            Money::from_units(400, 0)
        );
        assert!(next_month.month_comparison.current_month.income.is_zero());
    }

    #[test]
    fn test_empty_server_gives_empty_snapshot() {
        let api = MemoryApi::default();
        let ctx = ctx();
        let service = AnalyticsService::new(&api, &ctx);

        let snapshot = service.snapshot(date(2025, 3, 31)).unwrap();
        assert_eq!(snapshot.health_score, 0);
        assert_eq!(snapshot.monthly_data.len(), 6);
    }

    #[test]
    fn test_page_reports() {
        let api = MemoryApi::new(records());
        let ctx = ctx();
        let service = AnalyticsService::new(&api, &ctx);

        assert_eq!(service.overview(5).unwrap().balance, Money::from_units(600, 0));
        assert_eq!(service.expenses(15).unwrap().total, Money::from_units(400, 0));
        assert_eq!(service.income(10).unwrap().sources.len(), 1);
        assert_eq!(service.goals().unwrap().average_progress, 50.0);
    }

    #[test]
    fn test_cutoff_limits_pages() {
        let api = MemoryApi::new(records());
        let ctx = ctx();
        let service = AnalyticsService::new(&api, &ctx).until(date(2025, 3, 2));

        assert!(service.expenses(15).unwrap().total.is_zero());
        assert_eq!(service.overview(5).unwrap().balance, Money::from_units(1000, 0));
    }
}
