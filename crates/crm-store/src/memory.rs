//! In-memory store with the same conflict semantics as SQLite.

use std::collections::BTreeMap;

use crm_model::CleanRecord;

use crate::error::Result;
use crate::{CustomerStore, UpsertSummary};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: BTreeMap<i64, CleanRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identity: i64) -> Option<&CleanRecord> {
        self.rows.get(&identity)
    }
}

impl CustomerStore for MemoryStore {
    fn insert_new(&mut self, records: &[CleanRecord]) -> Result<UpsertSummary> {
        let mut summary = UpsertSummary::default();
        for record in records {
            let Some(hash) = record.identity.as_i64() else {
                summary.skipped_missing_identity += 1;
                continue;
            };
            if self.rows.contains_key(&hash) {
                summary.already_present += 1;
            } else {
                self.rows.insert(hash, record.clone());
                summary.inserted += 1;
            }
        }
        Ok(summary)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.rows.len())
    }

    fn contains(&self, identity: i64) -> Result<bool> {
        Ok(self.rows.contains_key(&identity))
    }
}
