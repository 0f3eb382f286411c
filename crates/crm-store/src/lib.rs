//! Downstream customer store.
//!
//! Accepted records are loaded with "insert, do nothing on conflict"
//! semantics keyed by the identity hash: re-running a batch never
//! duplicates or overwrites a stored customer. Records without an identity
//! cannot be keyed and are skipped.

mod error;
mod memory;
mod sqlite;

use serde::Serialize;

use crm_model::CleanRecord;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::{CUSTOMER_TABLE, SqliteStore};

/// Outcome of one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpsertSummary {
    pub inserted: usize,
    /// Identity already stored; the row was left untouched.
    pub already_present: usize,
    pub skipped_missing_identity: usize,
}

impl UpsertSummary {
    pub fn total(&self) -> usize {
        self.inserted + self.already_present + self.skipped_missing_identity
    }
}

/// Sink for accepted customer records.
pub trait CustomerStore {
    /// Inserts records whose identity is not stored yet.
    fn insert_new(&mut self, records: &[CleanRecord]) -> Result<UpsertSummary>;

    /// Number of stored customers.
    fn count(&self) -> Result<usize>;

    fn contains(&self, identity: i64) -> Result<bool>;
}
