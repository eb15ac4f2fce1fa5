//! The one place the gate verdict is computed, shared by the report writer
//! and the KPI report so `report/gate_verdict.json` and `kpi.json` can
//! never disagree (see design note on the `kpi`/`reporting` inconsistency).

use formalchip_config::KpiConfig;
use formalchip_runstate::RunStatus;

use crate::model::{GateCheck, GateVerdict, Summary};

/// Build the gate verdict from a run summary and KPI policy.
///
/// `evidence_pack_present` is passed in rather than inferred from
/// `RunState`, because the evidence pack is written after the gate verdict
/// is first computed (it bundles the report files) — callers that have not
/// produced the pack yet but are certain the pipeline will pass `true`.
#[must_use]
pub fn build_gate_verdict(
    summary: &Summary,
    run_status: RunStatus,
    kpi: &KpiConfig,
    evidence_pack_present: bool,
) -> GateVerdict {
    let evidence_check = GateCheck {
        name: "evidence_pack_present".to_string(),
        passed: evidence_pack_present,
        detail: if evidence_pack_present {
            "evidence pack recorded for this run".to_string()
        } else {
            "no evidence pack recorded for this run".to_string()
        },
    };

    let bug_or_coverage = summary.bug_found || summary.coverage_hits > 0;
    let has_bug_or_coverage_check = if kpi.require_bug_or_coverage {
        GateCheck {
            name: "has_bug_or_coverage".to_string(),
            passed: bug_or_coverage,
            detail: format!(
                "bug_found={}, coverage_hits={} (required by policy)",
                summary.bug_found, summary.coverage_hits
            ),
        }
    } else {
        GateCheck {
            name: "has_bug_or_coverage".to_string(),
            passed: true,
            detail: "not required by policy".to_string(),
        }
    };

    let run_completed = matches!(run_status, RunStatus::Pass | RunStatus::Fail | RunStatus::Unknown);
    let run_completed_check = GateCheck {
        name: "run_completed".to_string(),
        passed: run_completed,
        detail: format!("run status: {run_status:?}"),
    };

    let checks = vec![evidence_check, has_bug_or_coverage_check, run_completed_check];
    let passed = checks.iter().all(|c| c.passed);
    GateVerdict { passed, checks }
}
