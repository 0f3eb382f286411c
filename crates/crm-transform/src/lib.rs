//! Customer record normalization.
//!
//! This crate holds every decision the batch run makes:
//!
//! - **normalization**: single-field canonicalizers (phone, name text, date)
//! - **name_split**: given/family split of a cleaned full name
//! - **status**: customer tier from the annotation column
//! - **identity**: stable natural-key hash for the downstream store
//! - **dedupe**: exact-duplicate removal, first occurrence wins
//! - **partition**: accepted/rejected split on date and region validity
//! - **pipeline**: the fixed stage sequence over one batch

pub mod dedupe;
pub mod error;
pub mod identity;
pub mod name_split;
pub mod normalization;
pub mod partition;
pub mod pipeline;
pub mod status;

pub use error::{Result, TransformError};
pub use identity::{identity_for, stable_hash};
pub use name_split::{SplitRule, split_full_name};
pub use normalization::{canonicalize_date, canonicalize_phone, clean_name_text};
pub use partition::{partition_records, rejection_reasons};
pub use pipeline::{BatchOutcome, RecordPipeline};
pub use status::classify_status;
