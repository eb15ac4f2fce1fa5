//! Derives a [`Summary`] from a completed (or in-flight) [`RunState`].

use std::collections::BTreeSet;

use formalchip_runstate::RunState;

use crate::model::Summary;

#[must_use]
pub fn build_summary(state: &RunState) -> Summary {
    let mut unique_failed = BTreeSet::new();
    let mut counterexample_line_count = 0u32;
    let mut unsat_core_line_count = 0u32;
    let mut coverage_hits = 0u32;
    let mut artifact_count = 0u32;
    let mut total_duration_s = 0.0;

    for iteration in &state.iterations {
        unique_failed.extend(iteration.feedback.failed_properties.iter().cloned());
        counterexample_line_count += iteration.feedback.counterexamples.len() as u32;
        unsat_core_line_count += iteration.feedback.unsat_cores.len() as u32;
        coverage_hits += iteration.feedback.coverage_hits;
        artifact_count += iteration.feedback.artifact_files.len() as u32;
        total_duration_s += iteration.duration_s;
    }

    let bug_found = !unique_failed.is_empty() || counterexample_line_count > 0;

    Summary {
        run_id: state.run_id.clone(),
        status: format!("{:?}", state.status).to_ascii_lowercase(),
        bug_found,
        iterations_run: state.iterations.len() as u32,
        unique_failed_properties: unique_failed.into_iter().collect(),
        counterexample_line_count,
        unsat_core_line_count,
        coverage_hits,
        artifact_count,
        total_duration_s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formalchip_runstate::{IterationFeedback, IterationRecord, RunStatus, Status};

    fn iteration(iteration: u32, failed: Vec<&str>, counterexamples: Vec<&str>) -> IterationRecord {
        IterationRecord {
            iteration,
            feedback: IterationFeedback {
                status: if failed.is_empty() { Status::Pass } else { Status::Fail },
                summary: "ran".to_string(),
                failed_properties: failed.into_iter().map(str::to_string).collect(),
                counterexamples: counterexamples.into_iter().map(str::to_string).collect(),
                unsat_cores: Vec::new(),
                coverage_hits: 1,
                artifact_files: vec!["artifacts/witnesses/a.vcd".to_string()],
            },
            property_file: format!("iter_{iteration:02}/properties.sv"),
            engine_log: format!("iter_{iteration:02}/engine.log"),
            started_at: "t0".to_string(),
            completed_at: "t1".to_string(),
            duration_s: 2.0,
        }
    }

    #[test]
    fn bug_found_true_when_any_iteration_failed() {
        let mut state = RunState::new("r1".to_string(), "t0".to_string(), "cfg.toml".to_string());
        state.iterations.push(iteration(1, vec!["p1"], vec!["cex line"]));
        state.status = RunStatus::Fail;
        let summary = build_summary(&state);
        assert!(summary.bug_found);
        assert_eq!(summary.unique_failed_properties, vec!["p1".to_string()]);
        assert_eq!(summary.counterexample_line_count, 1);
    }

    #[test]
    fn bug_found_false_on_clean_run() {
        let mut state = RunState::new("r1".to_string(), "t0".to_string(), "cfg.toml".to_string());
        state.iterations.push(iteration(1, vec![], vec![]));
        state.status = RunStatus::Pass;
        let summary = build_summary(&state);
        assert!(!summary.bug_found);
    }

    #[test]
    fn aggregates_duration_and_artifacts_across_iterations() {
        let mut state = RunState::new("r1".to_string(), "t0".to_string(), "cfg.toml".to_string());
        state.iterations.push(iteration(1, vec!["p1"], vec![]));
        state.iterations.push(iteration(2, vec![], vec![]));
        let summary = build_summary(&state);
        assert_eq!(summary.total_duration_s, 4.0);
        assert_eq!(summary.artifact_count, 2);
        assert_eq!(summary.coverage_hits, 2);
    }

    #[test]
    fn dedups_failed_properties_across_iterations() {
        let mut state = RunState::new("r1".to_string(), "t0".to_string(), "cfg.toml".to_string());
        state.iterations.push(iteration(1, vec!["p1"], vec![]));
        state.iterations.push(iteration(2, vec!["p1", "p2"], vec![]));
        let summary = build_summary(&state);
        assert_eq!(summary.unique_failed_properties, vec!["p1".to_string(), "p2".to_string()]);
    }
}
