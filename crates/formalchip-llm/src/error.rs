use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("command backend '{program}' exited with {exit_code:?}: {stderr}")]
    CommandFailed {
        program: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("command backend '{program}' timed out after {timeout_seconds}s")]
    Timeout { program: String, timeout_seconds: u64 },

    #[error("command backend response was not valid JSON or missing `candidates`: {reason}")]
    MalformedResponse { reason: String },

    #[error(transparent)]
    Runner(#[from] formalchip_utils::RunnerError),
}
