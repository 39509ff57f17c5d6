//! Expense and income pages
//!
//! Daily charts, income sources grouped by category name, and top-N
//! ranking of the analytics category breakdown.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use super::analytics::{non_empty_or, CategoryAmount, FALLBACK_CATEGORY_NAME};
use super::ledger::Ledger;
use crate::error::{PfError, PfResult};
use crate::models::{Category, CategoryKind, Money, Transaction};

/// Icon for income sources whose category has an empty icon
pub const FALLBACK_INCOME_ICON: &str = "💰";

/// Sum of one kind of transaction on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    /// Short form for charts, e.g. "Jan 5"
    pub label: String,
    pub amount: Money,
}

/// Per-day totals for the `days` most recent days that have activity
///
/// Days without transactions are not filled in. Oldest day first.
pub fn daily_totals(
    kind: CategoryKind,
    transactions: &[Transaction],
    categories: &[Category],
    days: usize,
) -> Vec<DailyTotal> {
    daily_totals_from(&Ledger::new(transactions, categories), kind, days)
}

fn daily_totals_from(ledger: &Ledger<'_>, kind: CategoryKind, days: usize) -> Vec<DailyTotal> {
    let mut by_day: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for entry in ledger.of_kind(kind) {
        *by_day.entry(entry.date()).or_default() += entry.amount();
    }

    let skip = by_day.len().saturating_sub(days);
    by_day
        .into_iter()
        .skip(skip)
        .map(|(date, amount)| DailyTotal {
            label: date.format("%b %-d").to_string(),
            date,
            amount,
        })
        .collect()
}

/// Income grouped under one category name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeSource {
    pub name: String,
    pub icon: String,
    pub total: Money,
    pub latest_date: NaiveDate,
    pub transaction_count: usize,
}

/// Group income by category name, in first-seen order
pub fn income_sources(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<IncomeSource> {
    income_sources_from(&Ledger::new(transactions, categories))
}

fn income_sources_from(ledger: &Ledger<'_>) -> Vec<IncomeSource> {
    let mut sources: Vec<IncomeSource> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in ledger.income() {
        let name = non_empty_or(&entry.category.name, FALLBACK_CATEGORY_NAME);
        match index.get(name) {
            Some(&i) => {
                let source = &mut sources[i];
                source.total += entry.amount();
                source.transaction_count += 1;
                if entry.date() > source.latest_date {
                    source.latest_date = entry.date();
                }
            }
            None => {
                index.insert(name, sources.len());
                sources.push(IncomeSource {
                    name: name.to_string(),
                    icon: non_empty_or(&entry.category.icon, FALLBACK_INCOME_ICON).to_string(),
                    total: entry.amount(),
                    latest_date: entry.date(),
                    transaction_count: 1,
                });
            }
        }
    }

    sources
}

/// Largest categories first; equal amounts keep their input order
pub fn rank_top_categories(categories: &[CategoryAmount], limit: usize) -> Vec<CategoryAmount> {
    let mut ranked = categories.to_vec();
    ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
    ranked.truncate(limit);
    ranked
}

/// One row of the expense list
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseRow {
    pub date: NaiveDate,
    pub category: String,
    pub icon: String,
    pub amount: Money,
    pub description: String,
}

/// Expense page: every expense newest first plus the daily chart
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseReport {
    pub rows: Vec<ExpenseRow>,
    pub chart: Vec<DailyTotal>,
    pub total: Money,
}

impl ExpenseReport {
    pub fn generate(
        transactions: &[Transaction],
        categories: &[Category],
        chart_days: usize,
    ) -> Self {
        let ledger = Ledger::new(transactions, categories);

        let mut rows: Vec<ExpenseRow> = ledger
            .expenses()
            .map(|e| ExpenseRow {
                date: e.date(),
                category: e.category.name.clone(),
                icon: e.category.icon.clone(),
                amount: e.amount(),
                description: e.transaction.description_or_empty().to_string(),
            })
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));

        Self {
            total: rows.iter().map(|r| r.amount).sum(),
            chart: daily_totals_from(&ledger, CategoryKind::Expense, chart_days),
            rows,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Expenses: {} total\n",
            self.total.format_with_symbol(currency)
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format_chart(&self.chart, currency));

        output.push('\n');
        if self.rows.is_empty() {
            output.push_str("No expenses recorded.\n");
        }
        for row in &self.rows {
            output.push_str(&format!(
                "{}  {} {:<20} {:>12}  {}\n",
                row.date,
                row.icon,
                row.category,
                row.amount.format_with_symbol(currency),
                row.description
            ));
        }
        output
    }

    /// Export the expense rows to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> PfResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| PfError::Export(e.to_string());

        csv_writer
            .write_record(["Date", "Category", "Amount", "Description"])
            .map_err(export_err)?;
        for row in &self.rows {
            let date = row.date.to_string();
            let amount = row.amount.to_decimal_string();
            csv_writer
                .write_record([
                    date.as_str(),
                    row.category.as_str(),
                    amount.as_str(),
                    row.description.as_str(),
                ])
                .map_err(export_err)?;
        }
        csv_writer
            .flush()
            .map_err(|e| PfError::Export(e.to_string()))?;
        Ok(())
    }
}

/// Income page: sources plus the daily chart
#[derive(Debug, Clone, Serialize)]
pub struct IncomeReport {
    pub sources: Vec<IncomeSource>,
    pub chart: Vec<DailyTotal>,
    pub total: Money,
}

impl IncomeReport {
    pub fn generate(
        transactions: &[Transaction],
        categories: &[Category],
        chart_days: usize,
    ) -> Self {
        let ledger = Ledger::new(transactions, categories);
        let sources = income_sources_from(&ledger);

        Self {
            total: sources.iter().map(|s| s.total).sum(),
            chart: daily_totals_from(&ledger, CategoryKind::Income, chart_days),
            sources,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Income: {} total\n",
            self.total.format_with_symbol(currency)
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format_chart(&self.chart, currency));

        output.push('\n');
        if self.sources.is_empty() {
            output.push_str("No income recorded.\n");
        }
        for source in &self.sources {
            output.push_str(&format!(
                "{} {:<20} {:>12}  {:>3} txns  last {}\n",
                source.icon,
                source.name,
                source.total.format_with_symbol(currency),
                source.transaction_count,
                source.latest_date
            ));
        }
        output
    }

    /// Export the income sources to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> PfResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| PfError::Export(e.to_string());

        csv_writer
            .write_record(["Source", "Total", "Transactions", "Latest Date"])
            .map_err(export_err)?;
        for source in &self.sources {
            let total = source.total.to_decimal_string();
            let count = source.transaction_count.to_string();
            let latest = source.latest_date.to_string();
            csv_writer
                .write_record([
                    source.name.as_str(),
                    total.as_str(),
                    count.as_str(),
                    latest.as_str(),
                ])
                .map_err(export_err)?;
        }
        csv_writer
            .flush()
            .map_err(|e| PfError::Export(e.to_string()))?;
        Ok(())
    }
}

fn format_chart(chart: &[DailyTotal], currency: &str) -> String {
    let max = chart.iter().map(|d| d.amount).max().unwrap_or_default();
    chart
        .iter()
        .map(|day| {
            format!(
                "{:<7} {} {}\n",
                day.label,
                crate::display::report::format_bar(day.amount.to_f64(), max.to_f64(), 30),
                day.amount.format_with_symbol(currency)
            )
        })
        .collect()
}
