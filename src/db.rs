//! Schema setup for the SQLite database that backs the transaction store.

use rusqlite::{Connection, Transaction as SqlTransaction};

/// Create the tables used by the ledger.
///
/// Safe to call on a database that has already been initialised.
///
/// # Errors
/// Returns an error if the schema cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Create the transaction table in the database.
///
/// IDs are supplied by the caller, so the primary key is not autoincremented.
fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount >= 0),
                type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                category TEXT NOT NULL,
                date TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}
