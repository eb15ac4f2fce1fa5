use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("failed to serialise report: {0}")]
    Serialize(#[from] serde_json::Error),
}
