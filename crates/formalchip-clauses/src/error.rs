use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported spec kind: {kind}")]
    UnsupportedKind { kind: String },

    #[error("failed to read spec file {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("malformed {format} in {path}: {reason}")]
    Malformed {
        format: &'static str,
        path: String,
        reason: String,
    },

    #[error("register CSV row {row} missing required column: {column}")]
    MissingColumn { row: usize, column: String },
}
