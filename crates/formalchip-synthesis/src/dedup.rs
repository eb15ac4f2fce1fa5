//! Missing-signal placeholder enforcement, name dedup, and the final
//! `optimize_candidates` pass.

use crate::helpers::extract_identifiers;
use crate::model::{PropertyCandidate, SynthesisInputs};
use std::collections::HashMap;

/// Replace any candidate that references a signal outside `known_signals`
/// with the trivial placeholder body, leaving everything else untouched.
///
/// An empty `known_signals` set disables the check entirely (no catalogue
/// was available to validate against).
pub fn apply_missing_signal_policy(
    candidates: Vec<PropertyCandidate>,
    inputs: &SynthesisInputs,
) -> Vec<PropertyCandidate> {
    if inputs.known_signals.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .map(|mut candidate| {
            if candidate.is_placeholder() {
                return candidate;
            }
            let referenced = extract_identifiers(&candidate.body);
            let missing: Vec<&String> = referenced
                .iter()
                .filter(|id| !inputs.known_signals.contains(*id))
                .collect();
            if !missing.is_empty() {
                let names: Vec<String> = missing.iter().map(|s| s.to_string()).collect();
                candidate.body = format!("{};", inputs.wrap("1'b1 |-> 1'b1"));
                candidate.notes = format!("missing signals: {}", names.join(", "));
            }
            candidate
        })
        .collect()
}

/// Resolve name collisions by appending `_2`, `_3`, … in encounter order.
pub fn dedupe_names(mut candidates: Vec<PropertyCandidate>) -> Vec<PropertyCandidate> {
    let mut seen: HashMap<String, u32> = HashMap::new();
    for candidate in &mut candidates {
        let count = seen.entry(candidate.name.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            candidate.name = format!("{}_{}", candidate.name, count);
        }
    }
    candidates
}

/// Collapse runs of whitespace to a single space so bodies that differ
/// only in incidental spacing compare equal.
fn normalize_body(body: &str) -> String {
    body.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep the first occurrence of each `(kind, normalized body)` signature,
/// and cap the number of placeholders kept at `max_placeholders`,
/// preserving the earliest ones.
pub fn optimize_candidates(
    candidates: Vec<PropertyCandidate>,
    max_placeholders: usize,
) -> Vec<PropertyCandidate> {
    let mut seen_signatures: std::collections::HashSet<(String, String)> =
        std::collections::HashSet::new();
    let mut deduped = Vec::new();
    for candidate in candidates {
        let signature = (format!("{:?}", candidate.kind), normalize_body(&candidate.body));
        if seen_signatures.insert(signature) {
            deduped.push(candidate);
        }
    }

    let mut placeholder_budget = max_placeholders;
    let mut result = Vec::with_capacity(deduped.len());
    for candidate in deduped {
        if candidate.is_placeholder() {
            if placeholder_budget == 0 {
                continue;
            }
            placeholder_budget -= 1;
        }
        result.push(candidate);
    }
    result
}
