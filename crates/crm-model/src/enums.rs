//! Type-safe enumerations for customer record fields.
//!
//! These enums replace the free-text markers of the spreadsheet export
//! ("VIP", "REGULAR", ...) with closed sets that the pipeline can match on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Coarse customer tier derived from the status annotation column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusTag {
    /// Annotation mentions "VIP".
    Vip,
    /// No special status. Also the fallback for missing annotations.
    #[default]
    Regular,
}

impl StatusTag {
    /// Returns the label written to the output tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTag::Vip => "VIP",
            StatusTag::Regular => "REGULAR",
        }
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusTag {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "VIP" => Ok(StatusTag::Vip),
            "REGULAR" => Ok(StatusTag::Regular),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}

/// Why a record landed in the rejected table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Registration date could not be parsed.
    InvalidDate,
    /// Region code is not in the configured set of valid codes.
    UnknownRegion,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::InvalidDate => "invalid_date",
            RejectionReason::UnknownRegion => "unknown_region",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpretation of ambiguous `a/b/yyyy` dates.
///
/// The first order is tried first; the other one is the fallback, so
/// `25/12/2023` still parses under [`DateOrder::MonthFirst`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    #[default]
    MonthFirst,
    DayFirst,
}

impl DateOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateOrder::MonthFirst => "month_first",
            DateOrder::DayFirst => "day_first",
        }
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateOrder {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "month_first" | "mdy" => Ok(DateOrder::MonthFirst),
            "day_first" | "dmy" => Ok(DateOrder::DayFirst),
            _ => Err(ModelError::UnknownDateOrder(s.to_string())),
        }
    }
}
