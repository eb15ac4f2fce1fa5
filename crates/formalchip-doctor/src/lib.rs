//! Preflight checks: config paths, tooling on PATH, signal catalogue
//! coverage, and placeholder ratio, run before committing to a full loop.

pub mod checks;
pub mod error;
pub mod model;

pub use checks::run_doctor;
pub use error::DoctorError;
pub use model::DoctorReport;
