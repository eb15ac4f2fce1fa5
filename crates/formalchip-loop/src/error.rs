use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error(transparent)]
    Ingest(#[from] formalchip_clauses::IngestError),

    #[error(transparent)]
    Signals(#[from] anyhow::Error),

    #[error(transparent)]
    Llm(#[from] formalchip_llm::LlmError),

    #[error(transparent)]
    Engine(#[from] formalchip_engine::EngineError),

    #[error("failed to persist run state: {0}")]
    State(String),
}
