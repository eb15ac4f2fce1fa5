//! Markdown rendering of a [`Summary`] and [`GateVerdict`] for human readers.

use std::fmt::Write as _;

use crate::model::{GateVerdict, Summary};

#[must_use]
pub fn render_markdown(summary: &Summary, gate: &GateVerdict) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# FormalChip run {}", summary.run_id);
    let _ = writeln!(out);
    let _ = writeln!(out, "- **status**: {}", summary.status);
    let _ = writeln!(out, "- **bug found**: {}", summary.bug_found);
    let _ = writeln!(out, "- **iterations run**: {}", summary.iterations_run);
    let _ = writeln!(out, "- **coverage hits**: {}", summary.coverage_hits);
    let _ = writeln!(out, "- **counterexample lines**: {}", summary.counterexample_line_count);
    let _ = writeln!(out, "- **unsat core lines**: {}", summary.unsat_core_line_count);
    let _ = writeln!(out, "- **artifacts collected**: {}", summary.artifact_count);
    let _ = writeln!(out, "- **total duration (s)**: {:.2}", summary.total_duration_s);
    let _ = writeln!(out);

    if summary.unique_failed_properties.is_empty() {
        let _ = writeln!(out, "No failed properties.");
    } else {
        let _ = writeln!(out, "## Failed properties");
        for name in &summary.unique_failed_properties {
            let _ = writeln!(out, "- `{name}`");
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Gate verdict: {}", if gate.passed { "PASS" } else { "FAIL" });
    let _ = writeln!(out, "| check | passed | detail |");
    let _ = writeln!(out, "|---|---|---|");
    for check in &gate.checks {
        let _ = writeln!(out, "| {} | {} | {} |", check.name, check.passed, check.detail);
    }
    out
}
