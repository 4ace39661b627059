//! FinanceFlow is a personal finance ledger.
//!
//! Income and expense transactions are kept in a local SQLite database. A
//! [Repository] is the only way to change or query them: every change is
//! written to the store and followed by a full reload, and the reloaded,
//! newest-first list is summarised into a balance, total expenses, this
//! month's income and an expense breakdown per category.
//!
//! ```no_run
//! use financeflow::{NewTransaction, Repository, SQLiteTransactionStore, TransactionType};
//! use time::macros::date;
//!
//! # async fn run() -> Result<(), financeflow::Error> {
//! let store = SQLiteTransactionStore::open("ledger.db")?;
//! let repository = Repository::new(store, "Asia/Kolkata").await?;
//!
//! repository
//!     .create(NewTransaction::new(
//!         "Coffee",
//!         4.5,
//!         TransactionType::Expense,
//!         "food",
//!         date!(2024 - 03 - 01),
//!     ))
//!     .await?;
//!
//! let summary = repository.summary().await?;
//! println!("Balance: {:.2}", summary.balance);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod aggregation;
pub mod category;
pub mod chart;
mod config;
mod db;
mod error;
pub mod export;
mod filter;
mod repository;
mod store;
mod transaction;

pub use aggregation::{CategoryTotal, Summary};
pub use config::{Config, DEFAULT_TIMEZONE, get_local_offset, today};
pub use db::initialize as initialize_db;
pub use error::{Error, InvalidTransaction};
pub use filter::filter_by_term;
pub use repository::{Repository, Snapshot};
pub use store::{SQLiteTransactionStore, TransactionStore};
pub use transaction::{
    IdGenerator, NewTransaction, ParseTransactionTypeError, Transaction, TransactionId,
    TransactionType,
};
