//! The transaction repository: the only way to change or query the ledger.
//!
//! Every mutation writes to the [TransactionStore] and then reloads the full
//! set of transactions from it. The reloaded set is sorted newest first,
//! summarised and published to subscribers as a [Snapshot]. There is no cache
//! to keep in sync, every read goes back to the store.
//!
//! Store calls are blocking SQLite work, so they run on tokio's blocking
//! thread pool. The store lock is held for the whole write, reload and
//! publish sequence, which keeps concurrent mutations from interleaving.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use time::Date;
use tokio::sync::watch;

use crate::{
    Error,
    aggregation::Summary,
    config::{get_local_offset, today},
    filter::filter_by_term,
    store::TransactionStore,
    transaction::{IdGenerator, NewTransaction, Transaction, TransactionId},
};

/// The state of the ledger after a load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    /// Every transaction, newest first.
    pub transactions: Vec<Transaction>,
    /// Figures computed from `transactions`.
    pub summary: Summary,
}

/// The store and the ID generator are guarded together so that ID
/// assignment, the write and the reload form one unit.
struct Ledger<S> {
    store: S,
    ids: IdGenerator,
    timezone: String,
}

impl<S: TransactionStore> Ledger<S> {
    /// Read every transaction from the store, newest first.
    fn load(&self) -> Result<Vec<Transaction>, Error> {
        let mut transactions = self.store.list_all()?;
        sort_newest_first(&mut transactions);

        tracing::debug!("Loaded {} transactions", transactions.len());

        Ok(transactions)
    }

    /// Today's date in the ledger's timezone.
    ///
    /// The offset is looked up on every call so it follows daylight saving changes.
    fn today(&self) -> Result<Date, Error> {
        get_local_offset(&self.timezone)
            .map(today)
            .ok_or_else(|| Error::InvalidTimezoneError(self.timezone.clone()))
    }

    fn snapshot(&self) -> Result<Snapshot, Error> {
        let transactions = self.load()?;
        let summary = Summary::compute(&transactions, self.today()?);

        Ok(Snapshot {
            transactions,
            summary,
        })
    }

    fn insert(&mut self, transaction: &Transaction) -> Result<(), Error> {
        self.store.insert(transaction)?;
        self.ids.observe(transaction.id);

        Ok(())
    }
}

/// Adds, removes and queries transactions over a [TransactionStore].
///
/// Cloning a repository gives another handle to the same store.
pub struct Repository<S> {
    ledger: Arc<Mutex<Ledger<S>>>,
    publisher: Arc<watch::Sender<Snapshot>>,
}

impl<S> Clone for Repository<S> {
    fn clone(&self) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            publisher: Arc::clone(&self.publisher),
        }
    }
}

impl<S> Repository<S>
where
    S: TransactionStore + Send + 'static,
{
    /// Create a repository over an opened `store` and publish its initial contents.
    ///
    /// `timezone` is a canonical timezone name, e.g. "Asia/Kolkata", that
    /// decides which month is the current month in published summaries.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidTimezoneError] if `timezone` is not a known timezone,
    /// - or any error from reading the store.
    pub async fn new(store: S, timezone: &str) -> Result<Self, Error> {
        if get_local_offset(timezone).is_none() {
            tracing::error!("Unknown timezone {timezone}");
            return Err(Error::InvalidTimezoneError(timezone.to_owned()));
        }

        let (publisher, _) = watch::channel(Snapshot::default());
        let ledger = Ledger {
            store,
            ids: IdGenerator::default(),
            timezone: timezone.to_owned(),
        };
        let repository = Self {
            ledger: Arc::new(Mutex::new(ledger)),
            publisher: Arc::new(publisher),
        };

        repository.publish_initial().await?;

        Ok(repository)
    }

    /// Validate and store `transaction`, then reload.
    ///
    /// The transaction is stored exactly as given, a negative amount is
    /// rejected rather than normalised.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidTransaction] if a required field is blank or the amount is negative or not finite,
    /// - [Error::DuplicateKey] if a transaction with the same ID is already stored,
    /// - or any other error from the store.
    pub async fn add(&self, transaction: Transaction) -> Result<Transaction, Error> {
        if let Err(reason) = transaction.validate() {
            tracing::error!("Rejected transaction {}: {reason}", transaction.id);
            return Err(reason.into());
        }

        self.mutate(move |ledger| {
            ledger.insert(&transaction)?;
            Ok(transaction)
        })
        .await
    }

    /// Give `new_transaction` the next ID, then follow the [Repository::add] contract.
    ///
    /// # Errors
    /// Returns the same errors as [Repository::add].
    pub async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        // Rejected input must not consume an ID.
        if let Err(reason) = new_transaction.clone().with_id(0).validate() {
            tracing::error!("Rejected new transaction {:?}: {reason}", new_transaction.title);
            return Err(reason.into());
        }

        self.mutate(move |ledger| {
            let transaction = new_transaction.with_id(ledger.ids.next_id());
            ledger.insert(&transaction)?;
            Ok(transaction)
        })
        .await
    }

    /// Remove the transaction with `id`, then reload.
    ///
    /// Removing an ID that is not stored is not an error.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub async fn remove(&self, id: TransactionId) -> Result<(), Error> {
        self.mutate(move |ledger| ledger.store.delete_by_id(id))
            .await
    }

    /// Every stored transaction, newest first.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub async fn list(&self) -> Result<Vec<Transaction>, Error> {
        self.read(|ledger| ledger.load()).await
    }

    /// The transactions whose title, category or date contains `term`,
    /// newest first. See [filter_by_term].
    ///
    /// # Errors
    /// Returns any error from the store.
    pub async fn search(&self, term: &str) -> Result<Vec<Transaction>, Error> {
        let transactions = self.list().await?;

        Ok(filter_by_term(&transactions, term))
    }

    /// Figures computed from the current contents of the store.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub async fn summary(&self) -> Result<Summary, Error> {
        self.read(|ledger| ledger.snapshot().map(|snapshot| snapshot.summary))
            .await
    }

    /// Receive a new [Snapshot] after every mutation.
    ///
    /// The receiver starts with the latest published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.publisher.subscribe()
    }

    /// Load what the store already holds, seed the ID generator past it and publish it.
    async fn publish_initial(&self) -> Result<(), Error> {
        let ledger = Arc::clone(&self.ledger);
        let publisher = Arc::clone(&self.publisher);

        tokio::task::spawn_blocking(move || {
            let mut ledger = lock(&ledger)?;

            let snapshot = ledger.snapshot()?;
            let newest = snapshot.transactions.first().map(|transaction| transaction.id);
            ledger.ids = IdGenerator::starting_after(newest.unwrap_or_default());

            tracing::info!(
                "Repository ready with {} transactions",
                snapshot.transactions.len()
            );
            publisher.send_replace(snapshot);

            Ok(())
        })
        .await?
    }

    /// Run `mutation`, then reload and publish the new state, all under the store lock.
    ///
    /// Nothing is reloaded or published when `mutation` fails.
    async fn mutate<T, F>(&self, mutation: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&mut Ledger<S>) -> Result<T, Error> + Send + 'static,
    {
        let ledger = Arc::clone(&self.ledger);
        let publisher = Arc::clone(&self.publisher);

        tokio::task::spawn_blocking(move || {
            let mut ledger = lock(&ledger)?;

            let output = mutation(&mut *ledger)?;
            let snapshot = ledger.snapshot()?;

            tracing::info!(
                "Committed change, ledger now holds {} transactions",
                snapshot.transactions.len()
            );
            publisher.send_replace(snapshot);

            Ok(output)
        })
        .await?
    }

    async fn read<T, F>(&self, query: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&Ledger<S>) -> Result<T, Error> + Send + 'static,
    {
        let ledger = Arc::clone(&self.ledger);

        tokio::task::spawn_blocking(move || {
            let ledger = lock(&ledger)?;

            query(&*ledger)
        })
        .await?
    }
}

fn lock<S>(ledger: &Mutex<Ledger<S>>) -> Result<MutexGuard<'_, Ledger<S>>, Error> {
    ledger.lock().map_err(|error| {
        tracing::error!("Could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}

/// Sort by ID, largest (newest) first.
fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.id.cmp(&a.id));
}
