//! Renders a candidate list as a SystemVerilog Assertions property file.

use crate::model::PropertyCandidate;
use std::fmt::Write as _;

/// Emit the full `.sv` property file, wrapped in `` `ifdef FORMAL``.
#[must_use]
pub fn emit_sva_file(candidates: &[PropertyCandidate]) -> String {
    let mut out = String::new();
    out.push_str("`ifdef FORMAL\n\n");
    for candidate in candidates {
        write_candidate(&mut out, candidate);
    }
    out.push_str("`endif\n");
    out
}

fn write_candidate(out: &mut String, candidate: &PropertyCandidate) {
    let _ = writeln!(out, "// FC_ID: {}", candidate.prop_id);
    if let Some(source) = &candidate.source_clause {
        let _ = writeln!(out, "// SOURCE: {source}");
    }
    if !candidate.notes.is_empty() {
        let _ = writeln!(out, "// NOTE: {}", candidate.notes);
    }
    let _ = writeln!(out, "property {};", candidate.name);
    let _ = writeln!(out, "  {}", candidate.body);
    out.push_str("endproperty\n");
    let _ = writeln!(
        out,
        "{} property ({});",
        candidate.kind.as_sv_keyword(),
        candidate.name
    );
    out.push('\n');
}
