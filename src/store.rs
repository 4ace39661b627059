//! Durable storage for transactions.
//!
//! The [TransactionStore] trait is the only way the rest of the crate touches
//! persisted data. [SQLiteTransactionStore] implements it on top of a SQLite
//! database, either a file on disk or an in-memory database for tests.

use std::path::Path;

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    transaction::{Transaction, TransactionId, map_transaction_row},
};

/// Handles the insertion, removal and retrieval of transactions.
///
/// Each method applies one logical change atomically.
pub trait TransactionStore {
    /// Durably persist `transaction`.
    ///
    /// # Errors
    /// Implementers must return [Error::DuplicateKey] if a transaction with
    /// the same ID already exists, rather than overwriting it.
    fn insert(&mut self, transaction: &Transaction) -> Result<(), Error>;

    /// Remove the transaction with `id`.
    ///
    /// Removing an ID that does not exist succeeds and changes nothing.
    fn delete_by_id(&mut self, id: TransactionId) -> Result<(), Error>;

    /// Retrieve every stored transaction, in no particular order.
    fn list_all(&self) -> Result<Vec<Transaction>, Error>;
}

/// Stores transactions in a SQLite database.
#[derive(Debug)]
pub struct SQLiteTransactionStore {
    connection: Connection,
}

impl SQLiteTransactionStore {
    /// Open the database at `path`, creating the file and schema if needed.
    ///
    /// # Errors
    /// Returns [Error::StorageUnavailable] if the file cannot be opened or the
    /// schema cannot be created. The caller may retry by opening again.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let connection = Connection::open(path).map_err(|error| {
            tracing::error!("Could not open the database at {path:?}: {error}");
            Error::StorageUnavailable(error.to_string())
        })?;

        tracing::info!("Opened transaction store at {path:?}");
        Self::from_connection(connection)
    }

    /// Open a private in-memory database. Data is lost when the store is dropped.
    ///
    /// # Errors
    /// Returns [Error::StorageUnavailable] if the database cannot be created.
    pub fn open_in_memory() -> Result<Self, Error> {
        let connection = Connection::open_in_memory()
            .map_err(|error| Error::StorageUnavailable(error.to_string()))?;

        Self::from_connection(connection)
    }

    /// Wrap an existing SQLite `connection`, initialising the schema.
    ///
    /// # Errors
    /// Returns [Error::StorageUnavailable] if the schema cannot be created.
    pub fn from_connection(connection: Connection) -> Result<Self, Error> {
        initialize(&connection).map_err(|error| {
            tracing::error!("Could not create the transaction schema: {error}");
            Error::StorageUnavailable(error.to_string())
        })?;

        Ok(Self { connection })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    fn insert(&mut self, transaction: &Transaction) -> Result<(), Error> {
        self.connection
            .execute(
                "INSERT INTO \"transaction\" (id, title, amount, type, category, date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                (
                    transaction.id,
                    &transaction.title,
                    transaction.amount,
                    transaction.kind,
                    &transaction.category,
                    transaction.date,
                ),
            )
            .map_err(|error| match error {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error {
                        code: _,
                        extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY,
                    },
                    _,
                ) => Error::DuplicateKey(transaction.id),
                error => error.into(),
            })?;

        tracing::debug!("Inserted transaction {}", transaction.id);

        Ok(())
    }

    fn delete_by_id(&mut self, id: TransactionId) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .execute("DELETE FROM \"transaction\" WHERE id = ?1", (id,))?;

        if rows_affected == 0 {
            tracing::debug!("Transaction {id} was already absent, nothing to delete");
        } else {
            tracing::debug!("Deleted transaction {id}");
        }

        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Transaction>, Error> {
        self.connection
            .prepare("SELECT id, title, amount, type, category, date FROM \"transaction\"")?
            .query_map([], map_transaction_row)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| error.into())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        store::{SQLiteTransactionStore, TransactionStore},
        transaction::{Transaction, TransactionType},
    };

    fn get_test_store() -> SQLiteTransactionStore {
        SQLiteTransactionStore::open_in_memory().expect("Could not open in-memory store")
    }

    fn expense(id: i64, title: &str, amount: f64, category: &str) -> Transaction {
        Transaction {
            id,
            title: title.to_owned(),
            amount,
            kind: TransactionType::Expense,
            category: category.to_owned(),
            date: date!(2024 - 03 - 01),
        }
    }

    #[test]
    fn insert_then_list_returns_transaction() {
        let mut store = get_test_store();
        let want = expense(1, "Coffee", 4.5, "food");

        store.insert(&want).expect("Could not insert transaction");
        let got = store.list_all().expect("Could not list transactions");

        assert_eq!(got, vec![want]);
    }

    #[test]
    fn list_all_on_empty_store() {
        let store = get_test_store();

        assert_eq!(store.list_all(), Ok(vec![]));
    }

    #[test]
    fn insert_fails_on_duplicate_id() {
        let mut store = get_test_store();
        let original = expense(1, "Coffee", 4.5, "food");
        store.insert(&original).unwrap();

        let result = store.insert(&expense(1, "Tea", 3.0, "food"));

        assert_eq!(result, Err(Error::DuplicateKey(1)));
        assert_eq!(store.list_all(), Ok(vec![original]));
    }

    #[test]
    fn delete_removes_only_matching_id() {
        let mut store = get_test_store();
        let coffee = expense(1, "Coffee", 4.5, "food");
        let bus = expense(2, "Bus", 2.0, "transport");
        store.insert(&coffee).unwrap();
        store.insert(&bus).unwrap();

        store.delete_by_id(1).expect("Could not delete transaction");

        assert_eq!(store.list_all(), Ok(vec![bus]));
    }

    #[test]
    fn delete_missing_id_is_a_no_op() {
        let mut store = get_test_store();
        let coffee = expense(1, "Coffee", 4.5, "food");
        store.insert(&coffee).unwrap();

        assert_eq!(store.delete_by_id(42), Ok(()));
        assert_eq!(store.delete_by_id(42), Ok(()));
        assert_eq!(store.list_all(), Ok(vec![coffee]));
    }

    #[test]
    fn unknown_categories_round_trip() {
        let mut store = get_test_store();
        let odd = expense(3, "Llama feed", 12.0, "llama upkeep");

        store.insert(&odd).unwrap();

        assert_eq!(store.list_all(), Ok(vec![odd]));
    }

    #[test]
    fn open_fails_when_directory_is_missing() {
        let result = SQLiteTransactionStore::open("/this/directory/does/not/exist/ledger.db");

        assert!(
            matches!(result, Err(Error::StorageUnavailable(_))),
            "got {result:?}"
        );
    }
}
