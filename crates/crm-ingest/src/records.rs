//! Column projection: keeps the columns the pipeline reads, drops the rest.

use crm_model::{ColumnNames, RawRecord};
use tracing::{debug, warn};

use crate::csv_table::{RawTable, normalize_header};
use crate::error::{IngestError, Result};

/// Positions of the configured columns within a [`RawTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub full_name: usize,
    pub contact: usize,
    pub region: usize,
    pub registration_date: usize,
    /// The annotation column is optional; without it every record is regular.
    pub status_note: Option<usize>,
}

impl ColumnIndex {
    /// Resolves header positions. Exact matches win over case-insensitive ones.
    pub fn resolve(headers: &[String], columns: &ColumnNames) -> Result<Self> {
        let required = |name: &str| {
            find_header(headers, name).ok_or_else(|| IngestError::MissingColumn {
                column: name.to_string(),
                available: headers.join(", "),
            })
        };
        let index = Self {
            full_name: required(&columns.full_name)?,
            contact: required(&columns.contact)?,
            region: required(&columns.region)?,
            registration_date: required(&columns.registration_date)?,
            status_note: find_header(headers, &columns.status_note),
        };
        if index.status_note.is_none() {
            warn!(
                column = %columns.status_note,
                "status column not found, every record will be REGULAR"
            );
        }
        Ok(index)
    }
}

fn find_header(headers: &[String], wanted: &str) -> Option<usize> {
    let wanted = normalize_header(wanted);
    headers
        .iter()
        .position(|header| *header == wanted)
        .or_else(|| {
            let lowered = wanted.to_lowercase();
            headers
                .iter()
                .position(|header| header.to_lowercase() == lowered)
        })
}

/// Projects every table row onto a [`RawRecord`], preserving row order.
pub fn project_records(table: &RawTable, columns: &ColumnNames) -> Result<Vec<RawRecord>> {
    let index = ColumnIndex::resolve(&table.headers, columns)?;
    let kept = 4 + usize::from(index.status_note.is_some());
    let dropped = table.headers.len().saturating_sub(kept);
    debug!(kept, dropped, "pruned extraneous columns");
    let cell = |row: &[String], idx: usize| row.get(idx).cloned().unwrap_or_default();
    Ok(table
        .rows
        .iter()
        .map(|row| RawRecord {
            full_name: cell(row, index.full_name),
            contact: cell(row, index.contact),
            region: cell(row, index.region),
            registration_date: cell(row, index.registration_date),
            status_note: index
                .status_note
                .map(|idx| cell(row, idx))
                .filter(|note| !note.is_empty()),
        })
        .collect())
}
