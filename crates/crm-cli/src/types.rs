use std::path::PathBuf;

use crm_model::BatchStats;
use crm_output::PartitionOutputs;
use crm_store::UpsertSummary;

#[derive(Debug)]
pub struct BatchResult {
    pub source: PathBuf,
    pub origin: String,
    pub stats: BatchStats,
    /// `None` on a dry run.
    pub outputs: Option<PartitionOutputs>,
    pub report: Option<PathBuf>,
    /// `None` when no database was configured or on a dry run.
    pub store: Option<UpsertSummary>,
    pub dry_run: bool,
}
