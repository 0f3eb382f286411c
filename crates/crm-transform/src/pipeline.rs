//! Record pipeline with explicit stages.
//!
//! The stages run in a fixed order, each materializing its output before the
//! next one starts:
//! 1. **Prune**: project rows onto the configured columns
//! 2. **Standardize**: upper-case name and region, canonicalize the phone
//! 3. **Dedupe**: drop exact duplicates of the standardized row
//! 4. **Normalize**: clean and split the name, canonicalize the date, tag
//!    origin, classify status, derive the identity
//! 5. **Partition**: split into accepted and rejected records
//!
//! Every derived field comes from the same in-flight record, so row
//! alignment between columns cannot drift.

use std::time::Instant;

use tracing::{debug, info, info_span};

use crm_ingest::{RawTable, project_records};
use crm_model::{
    BatchStats, CleanRecord, Partition, PersonName, Phone, PipelineConfig, RawRecord,
    RejectionReason, StatusTag,
};

use crate::dedupe::dedupe_by_key;
use crate::error::Result;
use crate::identity::identity_for;
use crate::name_split::split_full_name;
use crate::normalization::{canonicalize_date, canonicalize_phone, clean_name_text};
use crate::partition::partition_records;
use crate::status::classify_status;

/// Result of one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub partition: Partition,
    pub stats: BatchStats,
}

/// Row after case normalization and phone canonicalization.
#[derive(Debug, Clone)]
struct StandardizedRecord {
    full_name: String,
    phone: Phone,
    region: String,
    registration_date: String,
    status_note: Option<String>,
}

impl StandardizedRecord {
    fn from_raw(raw: RawRecord) -> Self {
        Self {
            full_name: raw.full_name.to_uppercase(),
            phone: canonicalize_phone(&raw.contact),
            region: raw.region.trim().to_uppercase(),
            registration_date: raw.registration_date,
            status_note: raw.status_note,
        }
    }

    /// Duplicate key: the pruned row without the annotation column.
    fn dedupe_key(&self) -> (String, String, String, String) {
        (
            self.full_name.clone(),
            self.phone.as_str().to_string(),
            self.region.clone(),
            self.registration_date.clone(),
        )
    }
}

/// Normalizes one batch according to a fixed [`PipelineConfig`].
#[derive(Debug, Clone)]
pub struct RecordPipeline {
    config: PipelineConfig,
}

impl RecordPipeline {
    /// Validates the configuration and builds the pipeline.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Runs every stage over `table`, stamping `origin` on each record.
    ///
    /// Fails only when a required column is missing from the table.
    pub fn run(&self, table: &RawTable, origin: &str) -> Result<BatchOutcome> {
        let mut stats = BatchStats {
            input_rows: table.len(),
            ..BatchStats::default()
        };

        let raw = info_span!("prune").in_scope(|| project_records(table, &self.config.columns))?;

        let standardized = info_span!("standardize").in_scope(|| {
            let start = Instant::now();
            let rows: Vec<StandardizedRecord> =
                raw.into_iter().map(StandardizedRecord::from_raw).collect();
            debug!(
                record_count = rows.len(),
                duration_ms = start.elapsed().as_millis(),
                "standardize complete"
            );
            rows
        });

        let deduped = info_span!("dedupe").in_scope(|| {
            let (rows, removed) = dedupe_by_key(standardized, StandardizedRecord::dedupe_key);
            stats.duplicates_removed = removed;
            debug!(
                record_count = rows.len(),
                duplicates_removed = removed,
                "dedupe complete"
            );
            rows
        });

        let normalized = info_span!("normalize").in_scope(|| {
            let start = Instant::now();
            let records: Vec<CleanRecord> = deduped
                .into_iter()
                .enumerate()
                .map(|(row, record)| self.normalize_record(row, record, origin))
                .collect();
            debug!(
                record_count = records.len(),
                duration_ms = start.elapsed().as_millis(),
                "normalize complete"
            );
            records
        });

        for record in &normalized {
            if !record.name.is_split() {
                stats.unsplit_names += 1;
            }
            if record.identity.value().is_none() {
                stats.missing_identities += 1;
            }
            if record.status == StatusTag::Vip {
                stats.vip += 1;
            }
        }

        let partition = info_span!("partition")
            .in_scope(|| partition_records(normalized, &self.config.valid_regions));
        stats.accepted = partition.accepted.len();
        stats.rejected = partition.rejected.len();
        for rejected in &partition.rejected {
            if rejected.has_reason(RejectionReason::InvalidDate) {
                stats.invalid_dates += 1;
            }
            if rejected.has_reason(RejectionReason::UnknownRegion) {
                stats.unknown_regions += 1;
            }
        }

        info!(
            input_rows = stats.input_rows,
            duplicates_removed = stats.duplicates_removed,
            accepted = stats.accepted,
            rejected = stats.rejected,
            "batch normalized"
        );
        Ok(BatchOutcome { partition, stats })
    }

    fn normalize_record(&self, row: usize, record: StandardizedRecord, origin: &str) -> CleanRecord {
        let cleaned = clean_name_text(&record.full_name);
        let name = split_full_name(&cleaned);
        if let PersonName::Unsplit { token_count } = &name {
            debug!(row, token_count, "name matched no split rule");
        }
        let registration_date =
            canonicalize_date(&record.registration_date, self.config.date_order);
        if !registration_date.is_valid() {
            debug!(row, "unparseable registration date");
        }
        let status = classify_status(record.status_note.as_deref());
        let identity = identity_for(&record.phone);
        CleanRecord {
            identity,
            name,
            phone: record.phone,
            region: record.region,
            status,
            registration_date,
            origin: origin.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[[&str; 5]]) -> RawTable {
        RawTable::new(
            ["Nome completo", "Contato", "UF", "Data Cadastro", "Observações"]
                .iter()
                .map(|h| (*h).to_string())
                .collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn duplicates_are_detected_after_standardization() {
        let pipeline = RecordPipeline::new(PipelineConfig::default()).unwrap();
        let outcome = pipeline
            .run(
                &table(&[
                    ["Ana Lima", "(11) 98888-7777", "sp", "2023-01-02", "VIP"],
                    ["ANA LIMA", "11988887777", "SP", "2023-01-02", ""],
                ]),
                "lote",
            )
            .unwrap();
        assert_eq!(outcome.stats.duplicates_removed, 1);
        assert_eq!(outcome.partition.accepted.len(), 1);
        assert_eq!(outcome.partition.accepted[0].status, StatusTag::Vip);
    }

    #[test]
    fn region_is_trimmed_before_validation() {
        let pipeline = RecordPipeline::new(PipelineConfig::default()).unwrap();
        let outcome = pipeline
            .run(&table(&[["Ana Lima", "11988887777", " mg", "2023-01-02", ""]]), "lote")
            .unwrap();
        assert_eq!(outcome.partition.accepted[0].region, "MG");
    }

    #[test]
    fn invalid_config_is_refused() {
        let config = PipelineConfig::default().with_valid_regions(Vec::<String>::new());
        assert!(RecordPipeline::new(config).is_err());
    }
}
