//! CSV Export functionality
//!
//! Transaction lists in the spreadsheet layout users download: Date,
//! Category, Amount, Payment Mode, Description.

use std::io::Write;

use crate::error::{PfError, PfResult};
use crate::models::{Category, Transaction};

const TRANSACTION_HEADER: [&str; 5] =
    ["Date", "Category", "Amount", "Payment Mode", "Description"];

/// Export transactions to CSV, in the order given
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    categories: &[Category],
    writer: W,
) -> PfResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| PfError::Export(e.to_string());

    csv_writer
        .write_record(TRANSACTION_HEADER)
        .map_err(export_err)?;

    for txn in transactions {
        let date = txn.date.format("%Y-%m-%d").to_string();
        let category = category_name(txn, categories);
        let amount = txn.amount.to_decimal_string();
        let mode = txn.payment_mode.to_string();

        csv_writer
            .write_record([
                date.as_str(),
                category.as_str(),
                amount.as_str(),
                mode.as_str(),
                txn.description_or_empty(),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| PfError::Export(e.to_string()))
}

fn category_name(txn: &Transaction, categories: &[Category]) -> String {
    txn.category_name
        .clone()
        .filter(|n| !n.is_empty())
        .or_else(|| {
            txn.category
                .and_then(|id| Category::find_by_id(categories, id))
                .map(|c| c.name.clone())
        })
        .unwrap_or_default()
}
