//! Writes the report triple: `summary.json`, `summary.md`, `gate_verdict.json`.

use camino::{Utf8Path, Utf8PathBuf};
use formalchip_utils::atomic_write::write_file_atomic;

use crate::error::ReportError;
use crate::model::{GateVerdict, Summary};
use crate::render::render_markdown;

/// The three report artifact paths, in the order the filenames imply.
pub struct ReportPaths {
    pub summary_json: Utf8PathBuf,
    pub summary_md: Utf8PathBuf,
    pub gate_verdict_json: Utf8PathBuf,
}

/// Write `summary.json`, `summary.md`, and `gate_verdict.json` under
/// `run_dir/report/`, returning the triple of paths written.
pub fn write_reports(
    run_dir: &Utf8Path,
    summary: &Summary,
    gate: &GateVerdict,
) -> Result<ReportPaths, ReportError> {
    let report_dir = run_dir.join("report");

    let summary_json = report_dir.join("summary.json");
    let summary_md = report_dir.join("summary.md");
    let gate_verdict_json = report_dir.join("gate_verdict.json");

    let summary_body = serde_json::to_string_pretty(summary)?;
    write_file_atomic(&summary_json, &summary_body).map_err(|e| ReportError::WriteFailed {
        path: summary_json.to_string(),
        reason: e.to_string(),
    })?;

    let markdown = render_markdown(summary, gate);
    write_file_atomic(&summary_md, &markdown).map_err(|e| ReportError::WriteFailed {
        path: summary_md.to_string(),
        reason: e.to_string(),
    })?;

    let gate_body = serde_json::to_string_pretty(gate)?;
    write_file_atomic(&gate_verdict_json, &gate_body).map_err(|e| ReportError::WriteFailed {
        path: gate_verdict_json.to_string(),
        reason: e.to_string(),
    })?;

    Ok(ReportPaths {
        summary_json,
        summary_md,
        gate_verdict_json,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GateCheck;

    #[test]
    fn writes_all_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let summary = Summary {
            run_id: "r1".to_string(),
            status: "pass".to_string(),
            bug_found: false,
            iterations_run: 1,
            unique_failed_properties: Vec::new(),
            counterexample_line_count: 0,
            unsat_core_line_count: 0,
            coverage_hits: 0,
            artifact_count: 0,
            total_duration_s: 1.0,
        };
        let gate = GateVerdict {
            passed: true,
            checks: vec![GateCheck {
                name: "run_completed".to_string(),
                passed: true,
                detail: String::new(),
            }],
        };
        let paths = write_reports(&run_dir, &summary, &gate).unwrap();
        assert!(paths.summary_json.exists());
        assert!(paths.summary_md.exists());
        assert!(paths.gate_verdict_json.exists());
    }
}
