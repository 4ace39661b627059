//! Transactions: the model, its database row mapping and ID generation.

mod core;
mod id;

pub use self::core::{
    NewTransaction, ParseTransactionTypeError, Transaction, TransactionId, TransactionType,
    map_transaction_row,
};
pub use id::IdGenerator;
