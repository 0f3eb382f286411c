//! Pipeline configuration.
//!
//! Every value that the batch run depends on (paths, column names, the set
//! of valid region codes) lives here and is passed into the pipeline when it
//! is constructed. All fields have defaults, so a partial TOML file or no
//! file at all yields a usable configuration.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::enums::DateOrder;
use crate::error::{ModelError, Result};

/// Brazilian federative unit codes (26 states plus the Federal District).
pub const DEFAULT_REGION_CODES: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB", "PR",
    "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

pub const DEFAULT_OUTPUT_DIR: &str = "./processed_data";
pub const DEFAULT_ACCEPTED_FILE: &str = "clientes_erp_formatado.csv";
pub const DEFAULT_REJECTED_FILE: &str = "erros.csv";

/// Source column headers read by the pipeline. Any other column is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub full_name: String,
    pub contact: String,
    pub region: String,
    pub registration_date: String,
    pub status_note: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            full_name: "Nome completo".to_string(),
            contact: "Contato".to_string(),
            region: "UF".to_string(),
            registration_date: "Data Cadastro".to_string(),
            status_note: "Observações".to_string(),
        }
    }
}

impl ColumnNames {
    /// Header names in projection order.
    pub fn all(&self) -> [&str; 5] {
        [
            &self.full_name,
            &self.contact,
            &self.region,
            &self.registration_date,
            &self.status_note,
        ]
    }
}

/// Configuration for one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Input table. Usually supplied on the command line.
    pub source: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub accepted_file: String,
    pub rejected_file: String,
    /// Origin identifier stamped on every record; defaults to the source path.
    pub origin: Option<String>,
    /// SQLite database receiving accepted records.
    pub database: Option<PathBuf>,
    pub valid_regions: BTreeSet<String>,
    pub columns: ColumnNames,
    pub date_order: DateOrder,
    pub delimiter: char,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            accepted_file: DEFAULT_ACCEPTED_FILE.to_string(),
            rejected_file: DEFAULT_REJECTED_FILE.to_string(),
            origin: None,
            database: None,
            valid_regions: DEFAULT_REGION_CODES
                .iter()
                .map(|code| (*code).to_string())
                .collect(),
            columns: ColumnNames::default(),
            date_order: DateOrder::default(),
            delimiter: ',',
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    #[must_use]
    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    #[must_use]
    pub fn with_valid_regions<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_regions = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Origin identifier for records loaded from `source`.
    pub fn origin_for(&self, source: &Path) -> String {
        self.origin
            .clone()
            .unwrap_or_else(|| source.display().to_string())
    }

    pub fn accepted_path(&self) -> PathBuf {
        self.output_dir.join(&self.accepted_file)
    }

    pub fn rejected_path(&self) -> PathBuf {
        self.output_dir.join(&self.rejected_file)
    }

    /// Delimiter as a CSV byte. Only valid after [`PipelineConfig::validate`].
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or(b',')
    }

    /// Checks invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.valid_regions.is_empty() {
            return Err(ModelError::EmptyRegionSet);
        }
        for code in &self.valid_regions {
            let well_formed =
                code.len() == 2 && code.chars().all(|ch| ch.is_ascii_uppercase());
            if !well_formed {
                return Err(ModelError::InvalidRegionCode(code.clone()));
            }
        }
        if !self.delimiter.is_ascii() {
            return Err(ModelError::InvalidDelimiter(self.delimiter));
        }
        let mut seen = BTreeSet::new();
        for name in self.columns.all() {
            if !seen.insert(name.trim()) {
                return Err(ModelError::DuplicateColumn(name.to_string()));
            }
        }
        Ok(())
    }
}
