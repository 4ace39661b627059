//! Defines the crate level error type and the reasons a transaction can be rejected.

use crate::transaction::TransactionId;

/// The errors that may occur in the ledger.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The durable store could not be opened or its schema could not be created.
    ///
    /// Every operation fails until the store is reopened successfully. The
    /// string holds the underlying error message.
    #[error("the transaction store is unavailable: {0}")]
    StorageUnavailable(String),

    /// A transaction with the same ID already exists in the store.
    ///
    /// Generated IDs are strictly increasing so this should only happen when
    /// a caller supplies an ID itself. The insert is rejected rather than
    /// overwriting the stored transaction.
    #[error("a transaction with the ID {0} already exists")]
    DuplicateKey(TransactionId),

    /// The transaction failed validation and never reached the store.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(InvalidTransaction),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The blocking task running a store operation panicked or was cancelled.
    #[error("a background store task failed: {0}")]
    BackgroundTaskFailed(String),

    /// Transactions could not be written to an export document.
    #[error("could not export transactions: {0}")]
    ExportError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

/// The validation rule a transaction broke.
#[derive(Debug, thiserror::Error, PartialEq, Clone, Copy)]
pub enum InvalidTransaction {
    /// The title was empty or only whitespace.
    #[error("the title cannot be empty")]
    EmptyTitle,

    /// The category was empty or only whitespace.
    #[error("the category cannot be empty")]
    EmptyCategory,

    /// The amount was negative.
    ///
    /// Stored amounts are magnitudes, the sign is implied by the transaction
    /// type. Use [crate::NewTransaction] to normalise user input.
    #[error("the amount {0} is negative")]
    NegativeAmount(f64),

    /// The amount was NaN or infinite.
    #[error("the amount must be a finite number")]
    NonFiniteAmount,
}

impl From<InvalidTransaction> for Error {
    fn from(value: InvalidTransaction) -> Self {
        Error::InvalidTransaction(value)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        tracing::error!("a blocking store task did not complete: {}", value);
        Error::BackgroundTaskFailed(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::ExportError(value.to_string())
    }
}
