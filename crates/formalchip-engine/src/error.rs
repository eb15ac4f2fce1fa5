use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error(transparent)]
    Runner(#[from] formalchip_utils::RunnerError),
}
