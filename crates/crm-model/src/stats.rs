use serde::{Deserialize, Serialize};

/// Counters collected over one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Rows read from the source table.
    pub input_rows: usize,
    pub duplicates_removed: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Rejected rows with an unparseable registration date.
    pub invalid_dates: usize,
    /// Rejected rows with a region code outside the configured set.
    pub unknown_regions: usize,
    /// Rows whose name matched no splitting rule.
    pub unsplit_names: usize,
    /// Rows without a natural key for the downstream store.
    pub missing_identities: usize,
    pub vip: usize,
}

impl BatchStats {
    /// Rows that survived duplicate removal.
    pub fn processed(&self) -> usize {
        self.accepted + self.rejected
    }
}
