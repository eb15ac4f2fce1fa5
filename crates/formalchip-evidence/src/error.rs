//! Error type for evidence-pack construction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvidenceError {
    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path { path: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}
