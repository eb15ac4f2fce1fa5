//! Library pattern -> candidate rules.

use crate::model::{
    Canonical10Options, FifoSafetyOptions, HandshakeOptions, InlineOptions, LibraryPattern,
    PropertyCandidate, PropertyKind, ResetSequenceOptions, SynthesisInputs,
};

fn candidate(
    prop_id: &str,
    name: &str,
    inner: &str,
    kind: PropertyKind,
    inputs: &SynthesisInputs,
    notes: &str,
) -> PropertyCandidate {
    PropertyCandidate {
        prop_id: prop_id.to_string(),
        name: name.to_string(),
        body: format!("{};", inputs.wrap(inner)),
        kind,
        source_clause: None,
        notes: notes.to_string(),
    }
}

fn handshake(prop_id: &str, opts: &HandshakeOptions, inputs: &SynthesisInputs) -> Vec<PropertyCandidate> {
    vec![candidate(
        prop_id,
        &format!("{prop_id}_ack_within_bound"),
        &format!("{} |-> ##[0:{}] {};", opts.req, opts.bound, opts.ack),
        PropertyKind::Assert,
        inputs,
        "",
    )]
}

fn fifo_safety(
    prop_id: &str,
    opts: &FifoSafetyOptions,
    inputs: &SynthesisInputs,
) -> Vec<PropertyCandidate> {
    vec![
        candidate(
            prop_id,
            &format!("{prop_id}_no_push_on_full"),
            &format!("!({} && {});", opts.full, opts.push),
            PropertyKind::Assert,
            inputs,
            "",
        ),
        candidate(
            prop_id,
            &format!("{prop_id}_no_pop_on_empty"),
            &format!("!({} && {});", opts.empty, opts.pop),
            PropertyKind::Assert,
            inputs,
            "",
        ),
    ]
}

fn reset_sequence(
    prop_id: &str,
    opts: &ResetSequenceOptions,
    inputs: &SynthesisInputs,
) -> Vec<PropertyCandidate> {
    vec![candidate(
        prop_id,
        &format!("{prop_id}_reset_sequence"),
        &format!(
            "{} |=> ##[{}:{}] ({} == {});",
            inputs.reset_asserted_expr(),
            opts.latency,
            opts.latency,
            opts.signal,
            opts.value
        ),
        PropertyKind::Assert,
        inputs,
        "",
    )]
}

fn inline(prop_id: &str, opts: &InlineOptions, inputs: &SynthesisInputs) -> Vec<PropertyCandidate> {
    let inner = match &opts.when {
        Some(when) => format!("({when}) |-> ({});", opts.expr),
        None => format!("({});", opts.expr),
    };
    let name = crate::helpers::sanitize_id(&opts.name);
    vec![candidate(
        prop_id,
        &name,
        inner.trim_end_matches(';'),
        opts.property_kind,
        inputs,
        opts.note.as_deref().unwrap_or(""),
    )]
}

/// The ten fixed properties every `canonical_10` library emits.
fn canonical_10(
    prop_id: &str,
    o: &Canonical10Options,
    inputs: &SynthesisInputs,
) -> Vec<PropertyCandidate> {
    let level_eq = |v: String| format!("{level_width}'d{v}", level_width = o.level_width, v = v);
    vec![
        candidate(
            prop_id,
            "c10_01_req_ack_within_bound",
            &format!("{} |-> ##[0:{}] {};", o.req, o.bound, o.ack),
            PropertyKind::Assert,
            inputs,
            "",
        ),
        candidate(
            prop_id,
            "c10_02_ack_has_req",
            &format!("{} |-> ({} || $past({}));", o.ack, o.req, o.req),
            PropertyKind::Assert,
            inputs,
            "",
        ),
        candidate(
            prop_id,
            "c10_03_req_held_until_ack",
            &format!("{} |-> ({} throughout ##[0:{}] {});", o.req, o.req, o.bound, o.ack),
            PropertyKind::Assert,
            inputs,
            "",
        ),
        candidate(
            prop_id,
            "c10_04_no_simultaneous_push_pop_on_empty",
            &format!("!({} && {} && {});", o.push, o.pop, o.empty),
            PropertyKind::Assert,
            inputs,
            "",
        ),
        candidate(
            prop_id,
            "c10_05_no_overflow",
            &format!("!({} && {} && !{});", o.full, o.push, o.pop),
            PropertyKind::Assert,
            inputs,
            "",
        ),
        candidate(
            prop_id,
            "c10_06_no_underflow",
            &format!("!({} && {} && !{});", o.empty, o.pop, o.push),
            PropertyKind::Assert,
            inputs,
            "",
        ),
        candidate(
            prop_id,
            "c10_07_empty_implies_level_zero",
            &format!("{} |-> ({} == {});", o.empty, o.level, level_eq("0".to_string())),
            PropertyKind::Assert,
            inputs,
            "",
        ),
        candidate(
            prop_id,
            "c10_08_full_implies_level_max",
            &format!(
                "{} |-> ({} == {});",
                o.full,
                o.level,
                level_eq(o.level_max.to_string())
            ),
            PropertyKind::Assert,
            inputs,
            "",
        ),
        candidate(
            prop_id,
            "c10_09_reset_implies_valid_zero",
            &format!("{} |=> ({} == 1'b0);", inputs.reset_asserted_expr(), o.valid),
            PropertyKind::Assert,
            inputs,
            "",
        ),
        candidate(
            prop_id,
            "c10_10_cover_req_ack_cycle",
            &format!("{} ##[1:{}] {};", o.req, o.bound, o.ack),
            PropertyKind::Cover,
            inputs,
            "",
        ),
    ]
}

/// Expand one library pattern into its candidates, in declaration order.
/// `Unknown` patterns expand to nothing (a warning is logged when they are
/// parsed, per the forward-compatibility policy in [`LibraryPattern`]).
pub fn candidates_for_library(
    prop_id: &str,
    pattern: &LibraryPattern,
    inputs: &SynthesisInputs,
) -> Vec<PropertyCandidate> {
    match pattern {
        LibraryPattern::Handshake(opts) => handshake(prop_id, opts, inputs),
        LibraryPattern::FifoSafety(opts) => fifo_safety(prop_id, opts, inputs),
        LibraryPattern::ResetSequence(opts) => reset_sequence(prop_id, opts, inputs),
        LibraryPattern::Inline(opts) => inline(prop_id, opts, inputs),
        LibraryPattern::Canonical10(opts) => canonical_10(prop_id, opts, inputs),
        LibraryPattern::Unknown { .. } => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn inputs() -> SynthesisInputs {
        SynthesisInputs {
            clock: "clk".to_string(),
            reset: "rst".to_string(),
            reset_active_low: false,
            known_signals: BTreeSet::new(),
            signal_aliases: BTreeMap::new(),
        }
    }

    #[test]
    fn handshake_emits_single_bound_property() {
        let opts = HandshakeOptions {
            req: "req".to_string(),
            ack: "ack".to_string(),
            bound: 8,
        };
        let candidates = handshake("lib1", &opts, &inputs());
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].body.contains("req |-> ##[0:8] ack;"));
    }

    #[test]
    fn fifo_safety_emits_two_properties() {
        let opts = FifoSafetyOptions {
            full: "full".to_string(),
            empty: "empty".to_string(),
            push: "push".to_string(),
            pop: "pop".to_string(),
        };
        let candidates = fifo_safety("lib1", &opts, &inputs());
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn canonical_10_emits_exactly_ten_with_only_last_as_cover() {
        let opts = Canonical10Options {
            req: "req".to_string(),
            ack: "ack".to_string(),
            push: "push".to_string(),
            pop: "pop".to_string(),
            full: "full".to_string(),
            empty: "empty".to_string(),
            level: "level".to_string(),
            level_width: 4,
            level_max: 15,
            valid: "valid".to_string(),
            bound: 8,
        };
        let candidates = canonical_10("lib1", &opts, &inputs());
        assert_eq!(candidates.len(), 10);
        assert_eq!(candidates[0].name, "c10_01_req_ack_within_bound");
        assert_eq!(candidates[9].name, "c10_10_cover_req_ack_cycle");
        for c in &candidates[..9] {
            assert_eq!(c.kind, PropertyKind::Assert);
        }
        assert_eq!(candidates[9].kind, PropertyKind::Cover);
    }

    #[test]
    fn unknown_pattern_expands_to_nothing() {
        let pattern = LibraryPattern::Unknown {
            kind: "future".to_string(),
            raw: serde_json::Map::new(),
        };
        assert!(candidates_for_library("lib1", &pattern, &inputs()).is_empty());
    }
}
