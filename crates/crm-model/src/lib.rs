//! Customer record model.
//!
//! - **record**: raw rows, normalized records and typed field outcomes
//! - **enums**: status tags, rejection reasons, date order
//! - **config**: pipeline configuration with the valid region codes
//! - **stats**: per-batch counters

pub mod config;
pub mod enums;
pub mod error;
pub mod record;
pub mod stats;

pub use config::{
    ColumnNames, DEFAULT_ACCEPTED_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_REGION_CODES,
    DEFAULT_REJECTED_FILE, PipelineConfig,
};
pub use enums::{DateOrder, RejectionReason, StatusTag};
pub use error::{ModelError, Result};
pub use record::{
    CLEAN_RECORD_COLUMNS, CleanRecord, INVALID_DATE_SENTINEL, Identity, Partition, PersonName,
    Phone, RawRecord, RegistrationDate, RejectedRecord, UNPARSEABLE_PHONE,
};
pub use stats::BatchStats;
