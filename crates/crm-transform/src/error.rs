use thiserror::Error;

use crm_ingest::IngestError;
use crm_model::ModelError;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("invalid pipeline configuration: {0}")]
    Config(#[from] ModelError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
