//! Run summary and gate-verdict shapes, independent of how they were built.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub run_id: String,
    pub status: String,
    pub bug_found: bool,
    pub iterations_run: u32,
    pub unique_failed_properties: Vec<String>,
    pub counterexample_line_count: u32,
    pub unsat_core_line_count: u32,
    pub coverage_hits: u32,
    pub artifact_count: u32,
    pub total_duration_s: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateCheck {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateVerdict {
    pub passed: bool,
    pub checks: Vec<GateCheck>,
}

impl GateVerdict {
    #[must_use]
    pub fn check(&self, name: &str) -> Option<&GateCheck> {
        self.checks.iter().find(|c| c.name == name)
    }
}
