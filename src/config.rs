//! Runtime configuration for opening a ledger.

use std::path::PathBuf;

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// The timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";

/// Where the ledger lives and which timezone "today" is measured in.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// File path to the SQLite database.
    pub db_path: PathBuf,
    /// A canonical IANA timezone name, e.g. "Pacific/Auckland".
    pub timezone: String,
}

impl Config {
    /// Create a config for the database at `db_path` using [DEFAULT_TIMEZONE].
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            timezone: DEFAULT_TIMEZONE.to_owned(),
        }
    }

    /// Set the timezone.
    pub fn timezone(mut self, timezone: &str) -> Self {
        self.timezone = timezone.to_owned();
        self
    }

    /// The current UTC offset of the configured timezone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the timezone name is unknown.
    pub fn local_offset(&self) -> Result<UtcOffset, Error> {
        get_local_offset(&self.timezone)
            .ok_or_else(|| Error::InvalidTimezoneError(self.timezone.clone()))
    }
}

/// The current UTC offset of `canonical_timezone`, if it is a known timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date at `offset`.
pub fn today(offset: UtcOffset) -> Date {
    OffsetDateTime::now_utc().to_offset(offset).date()
}
