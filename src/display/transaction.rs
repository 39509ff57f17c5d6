//! Transaction display formatting

use tabled::Tabled;

use super::report::{render_table, truncate};
use crate::models::{Category, Money, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Name shown for a transaction's category
///
/// Prefers the name the API sent along, then the category list.
pub fn category_label(txn: &Transaction, categories: &[Category]) -> String {
    if let Some(name) = txn.category_name.as_deref().filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    txn.category
        .and_then(|id| Category::find_by_id(categories, id))
        .map(|c| c.to_string())
        .unwrap_or_else(|| "(uncategorized)".to_string())
}

/// Format transactions as a table, in the order given
pub fn format_transaction_table(
    transactions: &[Transaction],
    categories: &[Category],
    currency: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|txn| TransactionRow {
            id: txn.id.to_string(),
            date: txn.date.format(date_format).to_string(),
            category: category_label(txn, categories),
            mode: txn.payment_mode.to_string(),
            description: truncate(txn.description_or_empty(), 40),
            amount: txn.amount.format_with_symbol(currency),
        })
        .collect();

    let total: Money = transactions.iter().map(|t| t.amount).sum();
    format!(
        "{}\n{} transaction(s), {} total\n",
        render_table(rows, 5),
        transactions.len(),
        total.format_with_symbol(currency)
    )
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    categories: &[Category],
    currency: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("Category:    {}\n", category_label(txn, categories)));
    output.push_str(&format!("Mode:        {}\n", txn.payment_mode));

    if !txn.description_or_empty().is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description_or_empty()));
    }

    output
}
