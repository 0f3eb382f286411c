//! Customer data ingestion.
//!
//! Reads the delimited export of the source spreadsheet into a [`RawTable`]
//! and projects its rows onto the columns named in
//! [`crm_model::ColumnNames`], dropping every other column.

pub mod csv_table;
pub mod error;
pub mod records;

pub use csv_table::{RawTable, read_csv_table};
pub use error::{IngestError, Result};
pub use records::{ColumnIndex, project_records};
