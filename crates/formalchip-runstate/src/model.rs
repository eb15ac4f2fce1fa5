//! The run-state data model: per-iteration feedback, the iteration journal
//! entry it becomes once recorded, and the run-level state that owns them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The uniform status an engine adapter (or the run as a whole) reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
    Unknown,
    Error,
}

impl Status {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Pass | Status::Fail | Status::Error)
    }
}

/// The run-level status, distinct from per-iteration [`Status`] only in
/// that a run can still be `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Pass,
    Fail,
    Unknown,
    Error,
}

impl From<Status> for RunStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Pass => RunStatus::Pass,
            Status::Fail => RunStatus::Fail,
            Status::Unknown => RunStatus::Unknown,
            Status::Error => RunStatus::Error,
        }
    }
}

/// One engine adapter's result for a single iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationFeedback {
    pub status: Status,
    pub summary: String,
    #[serde(default)]
    pub failed_properties: Vec<String>,
    #[serde(default)]
    pub counterexamples: Vec<String>,
    #[serde(default)]
    pub unsat_cores: Vec<String>,
    #[serde(default)]
    pub coverage_hits: u32,
    #[serde(default)]
    pub artifact_files: Vec<String>,
}

impl IterationFeedback {
    #[must_use]
    pub fn bug_found(&self) -> bool {
        !self.failed_properties.is_empty() || !self.counterexamples.is_empty()
    }
}

/// The append-only journal entry for one loop iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: u32,
    #[serde(flatten)]
    pub feedback: IterationFeedback,
    pub property_file: String,
    pub engine_log: String,
    pub started_at: String,
    pub completed_at: String,
    pub duration_s: f64,
}

/// The full run journal: `run_id`, lifecycle timestamps, and every
/// iteration recorded so far. Grows monotonically until the run completes,
/// at which point it is sealed into the evidence tarball.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub run_id: String,
    pub started_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    pub status: RunStatus,
    pub config_path: String,
    #[serde(default)]
    pub iterations: Vec<IterationRecord>,
    #[serde(default)]
    pub evidence_pack: Option<String>,
    /// Report artifact name (`summary_json`, `summary_md`, `gate_verdict_json`, `kpi_json`) -> path.
    #[serde(default)]
    pub reports: BTreeMap<String, String>,
}

impl RunState {
    #[must_use]
    pub fn new(run_id: String, started_at: String, config_path: String) -> Self {
        RunState {
            run_id,
            started_at,
            completed_at: None,
            status: RunStatus::Running,
            config_path,
            iterations: Vec::new(),
            evidence_pack: None,
            reports: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self.status, RunStatus::Running)
    }

    #[must_use]
    pub fn last_iteration(&self) -> Option<&IterationRecord> {
        self.iterations.last()
    }
}
