//! Raw and normalized customer records.
//!
//! A [`RawRecord`] is one spreadsheet row projected onto the columns the
//! pipeline reads. A [`CleanRecord`] is its normalized counterpart. Field-level
//! failures are variants of the field types, never errors.

use std::fmt;

use chrono::NaiveDate;

use crate::enums::{RejectionReason, StatusTag};

/// Rendered value of a registration date that failed to parse.
pub const INVALID_DATE_SENTINEL: &str = "invalido";

/// Rendered value of a contact string without a single digit.
pub const UNPARSEABLE_PHONE: &str = "unparseable";

/// Column order of both output tables.
pub const CLEAN_RECORD_COLUMNS: [&str; 8] = [
    "Hash Cliente",
    "Nome",
    "Sobrenome",
    "Contato",
    "UF",
    "Status do Cliente",
    "Data Cadastro",
    "Origem",
];

/// One source row after the extraneous columns were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub full_name: String,
    pub contact: String,
    pub region: String,
    pub registration_date: String,
    /// Free-text annotation; `None` when the cell is empty.
    pub status_note: Option<String>,
}

/// Canonicalized contact phone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Phone {
    /// Templated `(DD)9DDDDDDDD` token, possibly shorter for short inputs.
    Canonical(String),
    /// The contact string held no digits.
    Unparseable,
}

impl Phone {
    pub fn as_str(&self) -> &str {
        match self {
            Phone::Canonical(value) => value,
            Phone::Unparseable => UNPARSEABLE_PHONE,
        }
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration date after canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegistrationDate {
    Valid(NaiveDate),
    /// Parse failure; keeps the source text for diagnostics.
    Invalid { raw: String },
}

impl RegistrationDate {
    pub fn is_valid(&self) -> bool {
        matches!(self, RegistrationDate::Valid(_))
    }

    /// `YYYY-MM-DD`, or [`INVALID_DATE_SENTINEL`].
    pub fn render(&self) -> String {
        match self {
            RegistrationDate::Valid(date) => date.format("%Y-%m-%d").to_string(),
            RegistrationDate::Invalid { .. } => INVALID_DATE_SENTINEL.to_string(),
        }
    }
}

impl fmt::Display for RegistrationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Given/family split of a cleaned full name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PersonName {
    Split { given: String, family: String },
    /// The token count matched no splitting rule; both parts render empty.
    Unsplit { token_count: usize },
}

impl PersonName {
    pub fn given_name(&self) -> &str {
        match self {
            PersonName::Split { given, .. } => given,
            PersonName::Unsplit { .. } => "",
        }
    }

    pub fn family_name(&self) -> &str {
        match self {
            PersonName::Split { family, .. } => family,
            PersonName::Unsplit { .. } => "",
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, PersonName::Split { .. })
    }
}

/// Natural-key token used by the downstream store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identity {
    /// Non-negative 63-bit value; fits a signed 64-bit column.
    Hashed(u64),
    /// No usable natural key (contact without digits).
    Missing,
}

impl Identity {
    /// Builds a hashed identity, clearing the sign bit.
    pub fn hashed(value: u64) -> Self {
        Identity::Hashed(value & (i64::MAX as u64))
    }

    pub fn value(&self) -> Option<u64> {
        match self {
            Identity::Hashed(value) => Some(*value),
            Identity::Missing => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.value().and_then(|value| i64::try_from(value).ok())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Hashed(value) => write!(f, "{value}"),
            Identity::Missing => Ok(()),
        }
    }
}

/// Normalized projection of one surviving source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanRecord {
    pub identity: Identity,
    pub name: PersonName,
    pub phone: Phone,
    /// Upper-cased region code as found in the source.
    pub region: String,
    pub status: StatusTag,
    pub registration_date: RegistrationDate,
    /// Identifier of the source batch.
    pub origin: String,
}

impl CleanRecord {
    /// Cells in [`CLEAN_RECORD_COLUMNS`] order.
    pub fn to_row(&self) -> [String; 8] {
        [
            self.identity.to_string(),
            self.name.given_name().to_string(),
            self.name.family_name().to_string(),
            self.phone.to_string(),
            self.region.clone(),
            self.status.to_string(),
            self.registration_date.render(),
            self.origin.clone(),
        ]
    }
}

/// A record that failed at least one validity predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub record: CleanRecord,
    /// Failed predicates in evaluation order; never empty.
    pub reasons: Vec<RejectionReason>,
}

impl RejectedRecord {
    pub fn has_reason(&self, reason: RejectionReason) -> bool {
        self.reasons.contains(&reason)
    }
}

/// Disjoint accepted/rejected split of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub accepted: Vec<CleanRecord>,
    pub rejected: Vec<RejectedRecord>,
}

impl Partition {
    pub fn total(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }
}
