use thiserror::Error;

/// Errors raised by the process execution layer.
///
/// Mirrors the narrow, typed error surface used for subprocess execution
/// elsewhere in this codebase: every variant names a concrete failure mode
/// rather than wrapping an opaque string.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to spawn process {program:?}: {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error("process {program:?} timed out after {timeout_seconds}s")]
    Timeout { program: String, timeout_seconds: u64 },

    #[error("failed to wait on process {program:?}: {reason}")]
    WaitFailed { program: String, reason: String },

    #[error("failed to write to stdin of {program:?}: {reason}")]
    StdinWriteFailed { program: String, reason: String },
}
