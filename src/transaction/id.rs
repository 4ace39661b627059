//! Clock-derived transaction IDs.

use time::OffsetDateTime;

use crate::transaction::TransactionId;

/// Issues transaction IDs from the wall clock.
///
/// An ID is the number of milliseconds since the Unix epoch, bumped to one
/// more than the previous ID when the clock has not advanced (or has gone
/// backwards). IDs are therefore strictly increasing for a single writer and
/// still sort in creation order.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: TransactionId,
}

impl IdGenerator {
    /// Create a generator whose IDs are all greater than `last`.
    pub fn starting_after(last: TransactionId) -> Self {
        Self { last }
    }

    /// The next ID for a transaction created now.
    pub fn next_id(&mut self) -> TransactionId {
        self.next_id_at(OffsetDateTime::now_utc())
    }

    /// The next ID for a transaction created at `now`.
    pub fn next_id_at(&mut self, now: OffsetDateTime) -> TransactionId {
        let millis = (now.unix_timestamp_nanos() / 1_000_000) as TransactionId;
        let id = millis.max(self.last.saturating_add(1));
        self.last = id;

        id
    }

    /// Record an ID that was issued elsewhere so later IDs stay above it.
    pub fn observe(&mut self, id: TransactionId) {
        self.last = self.last.max(id);
    }
}
