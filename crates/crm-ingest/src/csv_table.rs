use std::io::ErrorKind;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Source table held fully in memory: one header row plus data rows.
///
/// Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows.into_iter().map(|row| pad_row(row, width)).collect();
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn pad_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a delimited file whose first non-blank row is the header.
///
/// Blank rows are skipped. Short rows are padded with empty cells and long
/// rows are cut to the header width.
pub fn read_csv_table(path: &Path, delimiter: u8) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|source| open_error(path, source))?;

    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        match &headers {
            None => headers = Some(row.iter().map(|cell| normalize_header(cell)).collect()),
            Some(header_row) => {
                let mut row = row;
                row.truncate(header_row.len());
                rows.push(row);
            }
        }
    }

    let Some(headers) = headers else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    debug!(
        path = %path.display(),
        column_count = headers.len(),
        row_count = rows.len(),
        "read source table"
    );
    Ok(RawTable::new(headers, rows))
}

fn open_error(path: &Path, source: csv::Error) -> IngestError {
    match source.into_kind() {
        csv::ErrorKind::Io(err) if err.kind() == ErrorKind::NotFound => IngestError::FileNotFound {
            path: path.to_path_buf(),
        },
        csv::ErrorKind::Io(err) => IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        },
        other => IngestError::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::other(format!("{other:?}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_header_collapses_whitespace_and_bom() {
        assert_eq!(normalize_header("\u{feff} Nome   completo "), "Nome completo");
        assert_eq!(normalize_header("   "), "");
    }

    #[test]
    fn raw_table_pads_short_rows() {
        let table = RawTable::new(
            vec!["A".to_string(), "B".to_string()],
            vec![vec!["1".to_string()]],
        );
        assert_eq!(table.rows[0], vec!["1".to_string(), String::new()]);
        assert_eq!(table.len(), 1);
    }
}
