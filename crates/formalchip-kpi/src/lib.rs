//! Baseline-study KPI computation: `kpi.json`.
//!
//! Shares [`formalchip_report::build_gate_verdict`] with the report writer
//! so `kpi.json` and `report/gate_verdict.json` never disagree.

pub mod baseline;
pub mod error;
pub mod metrics;
pub mod model;

pub use baseline::baseline_reduction_percent;
pub use error::KpiError;
pub use metrics::{first_iteration_property_metrics, time_to_first_meaningful_properties_min};
pub use model::KpiReport;

use camino::Utf8Path;
use formalchip_config::KpiConfig;
use formalchip_runstate::RunState;

/// Build the full KPI report for a completed (or in-flight) run.
pub fn build_kpi_report(
    run_dir: &Utf8Path,
    state: &RunState,
    kpi: &KpiConfig,
    evidence_pack_present: bool,
) -> Result<KpiReport, KpiError> {
    let summary = formalchip_report::build_summary(state);

    let (first_iteration_property_count, first_iteration_placeholder_count) =
        match state.iterations.first() {
            Some(first) => {
                let property_file = run_dir.join(&first.property_file);
                let content = std::fs::read_to_string(&property_file).map_err(|e| KpiError::ReadFailed {
                    path: property_file.to_string(),
                    reason: e.to_string(),
                })?;
                first_iteration_property_metrics(&content)
            }
            None => (0, 0),
        };
    let first_iteration_meaningful_count =
        first_iteration_property_count.saturating_sub(first_iteration_placeholder_count);

    let time_to_first_meaningful_properties_min = time_to_first_meaningful_properties_min(run_dir, state)?;

    let baseline_reduction_percent = match &kpi.baseline_csv {
        Some(path) => baseline_reduction_percent(path)?,
        None => None,
    };
    let meets_time_reduction_target = baseline_reduction_percent
        .is_some_and(|pct| pct >= kpi.min_time_reduction_percent);

    let bug_or_coverage_ok =
        !kpi.require_bug_or_coverage || summary.bug_found || summary.coverage_hits > 0;
    let overall_success = if !bug_or_coverage_ok {
        false
    } else if kpi.baseline_csv.is_some() {
        meets_time_reduction_target
    } else {
        true
    };

    let gate = formalchip_report::build_gate_verdict(&summary, state.status, kpi, evidence_pack_present);

    Ok(KpiReport {
        run_id: state.run_id.clone(),
        first_iteration_property_count,
        first_iteration_placeholder_count,
        first_iteration_meaningful_count,
        time_to_first_meaningful_properties_min,
        baseline_reduction_percent,
        meets_time_reduction_target,
        bug_found: summary.bug_found,
        coverage_hits: summary.coverage_hits,
        overall_success,
        gate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use formalchip_runstate::{IterationFeedback, IterationRecord, RunStatus, Status};

    fn iteration(property_file_text: &str, dir: &Utf8Path, name: &str) -> IterationRecord {
        std::fs::write(dir.join(name), property_file_text).unwrap();
        IterationRecord {
            iteration: 1,
            feedback: IterationFeedback {
                status: Status::Pass,
                summary: "ran".to_string(),
                failed_properties: Vec::new(),
                counterexamples: Vec::new(),
                unsat_cores: Vec::new(),
                coverage_hits: 0,
                artifact_files: Vec::new(),
            },
            property_file: name.to_string(),
            engine_log: "engine.log".to_string(),
            started_at: "2026-01-01T00:00:00Z".to_string(),
            completed_at: "2026-01-01T00:05:00Z".to_string(),
            duration_s: 300.0,
        }
    }

    #[test]
    fn overall_success_false_when_bug_or_coverage_required_but_absent() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let mut state = RunState::new("r1".to_string(), "2026-01-01T00:00:00Z".to_string(), "cfg.toml".to_string());
        state.status = RunStatus::Pass;
        state.iterations.push(iteration("property p1;\n  a |-> b;\nendproperty\n", &run_dir, "properties.sv"));

        let kpi = KpiConfig::default();
        let report = build_kpi_report(&run_dir, &state, &kpi, true).unwrap();
        assert!(!report.overall_success);
        assert_eq!(report.first_iteration_property_count, 1);
        assert_eq!(report.first_iteration_placeholder_count, 0);
    }

    #[test]
    fn overall_success_true_without_baseline_when_bug_or_coverage_not_required() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let mut state = RunState::new("r1".to_string(), "2026-01-01T00:00:00Z".to_string(), "cfg.toml".to_string());
        state.status = RunStatus::Pass;
        state.iterations.push(iteration("property p1;\n  a |-> b;\nendproperty\n", &run_dir, "properties.sv"));

        let mut kpi = KpiConfig::default();
        kpi.require_bug_or_coverage = false;
        let report = build_kpi_report(&run_dir, &state, &kpi, true).unwrap();
        assert!(report.overall_success);
    }

    #[test]
    fn time_to_first_meaningful_is_computed_from_iteration_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let mut state = RunState::new("r1".to_string(), "2026-01-01T00:00:00Z".to_string(), "cfg.toml".to_string());
        state.iterations.push(iteration("property p1;\n  a |-> b;\nendproperty\n", &run_dir, "properties.sv"));

        let kpi = KpiConfig::default();
        let report = build_kpi_report(&run_dir, &state, &kpi, true).unwrap();
        assert_eq!(report.time_to_first_meaningful_properties_min, Some(5.0));
    }

    #[test]
    fn all_placeholder_first_iteration_has_no_meaningful_properties_and_no_timing() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let mut state = RunState::new("r1".to_string(), "2026-01-01T00:00:00Z".to_string(), "cfg.toml".to_string());
        state.iterations.push(iteration(
            "// NOTE: missing signals: clk\nproperty p1;\n  1'b1 |-> 1'b1;\nendproperty\n",
            &run_dir,
            "properties.sv",
        ));

        let kpi = KpiConfig::default();
        let report = build_kpi_report(&run_dir, &state, &kpi, true).unwrap();
        assert_eq!(report.first_iteration_meaningful_count, 0);
        assert!(report.time_to_first_meaningful_properties_min.is_none());
    }
}
