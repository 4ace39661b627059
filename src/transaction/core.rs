//! Defines the core data models for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::InvalidTransaction;

/// Alias for the integer type used as a transaction's primary key.
///
/// IDs are derived from the creation time so ordering by ID orders by creation.
pub type TransactionId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, e.g. a salary payment.
    Income,
    /// Money spent, e.g. buying groceries.
    Expense,
}

impl TransactionType {
    /// The lower case name used for storage and search.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when text does not name a [TransactionType].
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("\"{0}\" is not a transaction type, expected \"income\" or \"expense\"")]
pub struct ParseTransactionTypeError(String);

impl FromStr for TransactionType {
    type Err = ParseTransactionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(ParseTransactionTypeError(s.to_owned())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are never edited. To correct one, remove it and add a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub title: String,
    /// The amount of money spent or earned. Always a non-negative magnitude,
    /// the sign is implied by `kind`.
    pub amount: f64,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// A free-form category, e.g. "food" or "salary".
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
}

impl Transaction {
    /// The date as an ISO-8601 calendar date, e.g. "2024-03-01".
    pub fn iso_date(&self) -> String {
        self.date.to_string()
    }

    /// Check the fields the store relies on.
    ///
    /// The amount is not normalised here, a negative amount is an error.
    ///
    /// # Errors
    /// Returns the first [InvalidTransaction] rule that is broken.
    pub fn validate(&self) -> Result<(), InvalidTransaction> {
        if self.title.trim().is_empty() {
            return Err(InvalidTransaction::EmptyTitle);
        }

        if self.category.trim().is_empty() {
            return Err(InvalidTransaction::EmptyCategory);
        }

        if !self.amount.is_finite() {
            return Err(InvalidTransaction::NonFiniteAmount);
        }

        if self.amount < 0.0 {
            return Err(InvalidTransaction::NegativeAmount(self.amount));
        }

        Ok(())
    }
}

/// A transaction as submitted by a user, before it has been given an ID.
///
/// To create a new `NewTransaction`, use [NewTransaction::new].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    pub title: String,
    /// The magnitude of the amount.
    pub amount: f64,
    /// Whether the money was earned or spent.
    pub kind: TransactionType,
    /// A free-form category.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
}

impl NewTransaction {
    /// Create a new transaction from user input.
    ///
    /// The sign of `amount` is dropped since the direction of the money is
    /// given by `kind`.
    pub fn new(
        title: &str,
        amount: f64,
        kind: TransactionType,
        category: &str,
        date: Date,
    ) -> Self {
        Self {
            title: title.to_owned(),
            amount: amount.abs(),
            kind,
            category: category.to_owned(),
            date,
        }
    }

    /// Attach an ID, producing the stored form of the transaction.
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            title: self.title,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            date: self.date,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Map a database row to a Transaction.
///
/// Expects the columns `id, title, amount, type, category, date` in that order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let amount = row.get(2)?;
    let kind = row.get(3)?;
    let category = row.get(4)?;
    let date = row.get(5)?;

    Ok(Transaction {
        id,
        title,
        amount,
        kind,
        category,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================
