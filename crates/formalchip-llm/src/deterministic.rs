//! The deterministic backend: `propose` delegates to synthesis verbatim,
//! `repair` applies a fixed rewrite heuristic to the properties the engine
//! named as failed.

use crate::backend::LlmBackend;
use crate::error::LlmError;
use formalchip_clauses::SpecClause;
use formalchip_runstate::IterationFeedback;
use formalchip_synthesis::{LibraryPattern, PropertyCandidate, PropertyKind, SynthesisInputs};
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Default, Clone, Copy)]
pub struct DeterministicLlm;

static BOUND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"##\[0:(\d+)\]").unwrap());

fn rewrite_body(body: &str) -> String {
    if let Some(caps) = BOUND_RE.captures(body) {
        let n: u32 = caps[1].parse().unwrap_or(0);
        return BOUND_RE.replace(body, format!("##[0:{}]", n + 2)).into_owned();
    }
    if body.contains("|=>") {
        return body.replacen("|=>", "|-> ##[0:1]", 1);
    }
    body.to_string()
}

fn reset_oscillation_guard(inputs: &SynthesisInputs) -> PropertyCandidate {
    PropertyCandidate {
        prop_id: "llm_repair_guard".to_string(),
        name: "llm_reset_oscillation_guard".to_string(),
        body: format!(
            "@({}) $changed({}) |-> ##1 $stable({});",
            inputs.clocking_expr(),
            inputs.reset,
            inputs.reset
        ),
        kind: PropertyKind::Assume,
        source_clause: None,
        notes: "Constrains pathological reset oscillation seen in CEX".to_string(),
    }
}

impl LlmBackend for DeterministicLlm {
    fn propose(
        &self,
        clauses: &[SpecClause],
        libraries: &[LibraryPattern],
        inputs: &SynthesisInputs,
    ) -> Result<Vec<PropertyCandidate>, LlmError> {
        Ok(formalchip_synthesis::synthesize(clauses, libraries, inputs))
    }

    fn repair(
        &self,
        current: &[PropertyCandidate],
        feedback: &IterationFeedback,
        _clauses: &[SpecClause],
        _libraries: &[LibraryPattern],
        inputs: &SynthesisInputs,
    ) -> Result<Vec<PropertyCandidate>, LlmError> {
        let mut repaired: Vec<PropertyCandidate> = current
            .iter()
            .cloned()
            .map(|mut candidate| {
                if feedback.failed_properties.contains(&candidate.name) {
                    candidate.body = rewrite_body(&candidate.body);
                    if !candidate.notes.is_empty() {
                        candidate.notes.push_str("; ");
                    }
                    candidate
                        .notes
                        .push_str(&format!("Repaired after: {}", feedback.summary));
                }
                candidate
            })
            .collect();

        if !feedback.failed_properties.is_empty() {
            repaired.push(reset_oscillation_guard(inputs));
        }

        Ok(repaired)
    }
}
