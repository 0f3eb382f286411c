use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown status tag: {0}")]
    UnknownStatus(String),
    #[error("unknown date order: {0}")]
    UnknownDateOrder(String),
    #[error("invalid region code '{0}': expected two upper-case ASCII letters")]
    InvalidRegionCode(String),
    #[error("region code set is empty")]
    EmptyRegionSet,
    #[error("invalid delimiter {0:?}: expected a single ASCII character")]
    InvalidDelimiter(char),
    #[error("column '{0}' is mapped more than once")]
    DuplicateColumn(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
