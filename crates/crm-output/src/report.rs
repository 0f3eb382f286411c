//! JSON batch report.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crm_model::{BatchStats, Partition};

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

pub const REPORT_SCHEMA: &str = "crm-normalize.batch-report";
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Serialized summary of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub origin: String,
    pub stats: BatchStats,
    /// Rejected rows per failed predicate; a row with two reasons counts twice.
    pub rejection_reasons: BTreeMap<&'static str, usize>,
    pub valid_regions: Vec<String>,
}

impl BatchReport {
    pub fn new<'a>(
        origin: &str,
        stats: BatchStats,
        partition: &Partition,
        valid_regions: impl IntoIterator<Item = &'a String>,
    ) -> Self {
        let mut rejection_reasons = BTreeMap::new();
        for rejected in &partition.rejected {
            for reason in &rejected.reasons {
                *rejection_reasons.entry(reason.as_str()).or_insert(0) += 1;
            }
        }
        Self {
            schema: REPORT_SCHEMA,
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            origin: origin.to_string(),
            stats,
            rejection_reasons,
            valid_regions: valid_regions.into_iter().cloned().collect(),
        }
    }
}

/// Writes `report` as pretty JSON followed by a newline.
pub fn write_batch_report(path: &Path, report: &BatchReport) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, format!("{json}\n")).map_err(|source| OutputError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}
