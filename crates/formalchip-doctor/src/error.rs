//! Error type for the doctor crate's own (rare) internal failures.
//!
//! Preflight findings themselves are never `Err` — a missing RTL file, an
//! absent `sby` binary, or zero synthesised candidates are findings on
//! [`crate::DoctorReport`], not failures of running the doctor itself.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DoctorError {
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}
