//! Customer output generation.
//!
//! - **CSV**: the accepted and rejected tables, same column layout
//! - **Report**: machine-readable JSON summary of one batch run

mod common;
mod csv_table;
mod error;
mod report;

pub use csv_table::{PartitionOutputs, write_partition, write_records};
pub use error::{OutputError, Result};
pub use report::{BatchReport, REPORT_SCHEMA, REPORT_SCHEMA_VERSION, write_batch_report};
