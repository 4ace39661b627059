//! Prepares transactions for export documents and writes spreadsheet (CSV) exports.
//!
//! Exports receive the repository's list as is (newest first) and must not
//! reorder it. Every export uses the same column order.

use std::io::Write;

use serde::Serialize;

use crate::{Error, category::capitalize, transaction::Transaction};

/// The column headers of an export, in order.
pub const HEADERS: [&str; 5] = ["Date", "Description", "Type", "Category", "Amount"];

/// One transaction formatted for an export document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    /// ISO date, e.g. "2024-03-01".
    #[serde(rename = "Date")]
    pub date: String,
    /// The transaction title.
    #[serde(rename = "Description")]
    pub description: String,
    /// "Income" or "Expense".
    #[serde(rename = "Type")]
    pub kind: String,
    /// The category with its first letter capitalised.
    #[serde(rename = "Category")]
    pub category: String,
    /// The amount with two decimal places.
    #[serde(rename = "Amount")]
    pub amount: String,
}

impl From<&Transaction> for ExportRow {
    fn from(transaction: &Transaction) -> Self {
        Self {
            date: transaction.iso_date(),
            description: transaction.title.clone(),
            kind: capitalize(transaction.kind.as_str()),
            category: capitalize(&transaction.category),
            amount: format!("{:.2}", transaction.amount),
        }
    }
}

/// Format `transactions` as export rows, keeping their order.
pub fn rows(transactions: &[Transaction]) -> Vec<ExportRow> {
    transactions.iter().map(ExportRow::from).collect()
}

/// Write `transactions` as CSV with a header row to `writer`.
///
/// # Errors
/// Returns [Error::ExportError] if a row cannot be written.
pub fn write_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<(), Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if transactions.is_empty() {
        csv_writer.write_record(HEADERS)?;
    }

    for row in rows(transactions) {
        csv_writer.serialize(row)?;
    }

    csv_writer
        .flush()
        .map_err(|error| Error::ExportError(error.to_string()))?;

    tracing::debug!("Exported {} transactions as CSV", transactions.len());

    Ok(())
}
