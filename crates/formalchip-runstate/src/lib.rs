//! The shared run-state model and recorder: the append-only journal that
//! the iteration loop writes and the reporting/KPI/evidence crates read.

pub mod model;
pub mod recorder;

pub use model::{IterationFeedback, IterationRecord, RunState, RunStatus, Status};
pub use recorder::RunRecorder;
