//! Free-text filtering of transactions.

use crate::transaction::Transaction;

/// Keep the transactions whose title, category or date contains `term`.
///
/// The title and category are compared case-insensitively, the date is
/// compared against its ISO string (e.g. "2024-03" matches every transaction
/// in March 2024). The input order is preserved and an empty `term` keeps
/// every transaction.
pub fn filter_by_term(transactions: &[Transaction], term: &str) -> Vec<Transaction> {
    let term = term.to_lowercase();

    transactions
        .iter()
        .filter(|transaction| matches_term(transaction, &term))
        .cloned()
        .collect()
}

/// `term` must already be lower case.
fn matches_term(transaction: &Transaction, term: &str) -> bool {
    transaction.title.to_lowercase().contains(term)
        || transaction.category.to_lowercase().contains(term)
        || transaction.iso_date().contains(term)
}
