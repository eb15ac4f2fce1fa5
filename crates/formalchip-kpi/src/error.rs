//! Error type for KPI computation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KpiError {
    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("malformed baseline CSV {path}: {reason}")]
    MalformedBaseline { path: String, reason: String },

    #[error("baseline CSV {path} is missing a required column: {column}")]
    MissingColumn { path: String, column: String },

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}
