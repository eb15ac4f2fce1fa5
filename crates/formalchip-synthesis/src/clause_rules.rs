//! Clause -> candidate rules: text (via the pattern matcher), register, and
//! rule-table clauses each become one or more [`PropertyCandidate`].

use crate::helpers::{apply_aliases, const_sv, const_sv_address};
use crate::model::{PropertyCandidate, PropertyKind, SynthesisInputs};
use crate::pattern::{ClauseMatch, ClausePatternMatcher};
use formalchip_clauses::SpecClause;

fn placeholder(clause: &SpecClause, inputs: &SynthesisInputs, note: String) -> PropertyCandidate {
    PropertyCandidate {
        prop_id: clause.clause_id.clone(),
        name: clause.clause_id.clone(),
        body: format!("{};", inputs.wrap("1'b1 |-> 1'b1")),
        kind: PropertyKind::Assert,
        source_clause: Some(clause.clause_id.clone()),
        notes: note,
    }
}

pub fn candidates_for_text_clause(
    clause: &SpecClause,
    inputs: &SynthesisInputs,
    matcher: &dyn ClausePatternMatcher,
) -> PropertyCandidate {
    let lowercased = clause.text.to_ascii_lowercase();
    let matched = matcher.match_clause(&lowercased);

    let body_and_kind = match matched {
        Some(ClauseMatch::IfThenNextCycle {
            antecedent,
            consequent,
        }) => Some((
            format!(
                "{} |=> {};",
                apply_aliases(&antecedent, &inputs.signal_aliases),
                apply_aliases(&consequent, &inputs.signal_aliases)
            ),
            PropertyKind::Assert,
        )),
        Some(ClauseMatch::NeverBoth { left, right }) => Some((
            format!(
                "!({} && {});",
                apply_aliases(&left, &inputs.signal_aliases),
                apply_aliases(&right, &inputs.signal_aliases)
            ),
            PropertyKind::Assert,
        )),
        Some(ClauseMatch::WithinCycles {
            antecedent,
            cycles,
            consequent,
        }) => Some((
            format!(
                "{} |-> ##[0:{cycles}] {};",
                apply_aliases(&antecedent, &inputs.signal_aliases),
                apply_aliases(&consequent, &inputs.signal_aliases)
            ),
            PropertyKind::Assert,
        )),
        Some(ClauseMatch::LevelAfterReset { signal, high }) => Some((
            format!(
                "{} |=> ({} == 1'b{});",
                inputs.reset_asserted_expr(),
                apply_aliases(&signal, &inputs.signal_aliases),
                if high { 1 } else { 0 }
            ),
            PropertyKind::Assert,
        )),
        None => None,
    };

    match body_and_kind {
        Some((inner, kind)) => PropertyCandidate {
            prop_id: clause.clause_id.clone(),
            name: clause.clause_id.clone(),
            body: format!("{};", inputs.wrap(&inner)),
            kind,
            source_clause: Some(clause.clause_id.clone()),
            notes: String::new(),
        },
        None => placeholder(
            clause,
            inputs,
            format!("Unable to derive strict logic from clause: {}", clause.text),
        ),
    }
}

pub fn candidates_for_register_clause(
    clause: &SpecClause,
    inputs: &SynthesisInputs,
) -> PropertyCandidate {
    if clause.has_tag("reset") {
        let signal = clause.metadata_str("signal").unwrap_or("");
        let reset = clause.metadata_str("reset").unwrap_or("0");
        let width = clause
            .metadata
            .get("width")
            .and_then(|v| v.as_u64())
            .unwrap_or(32) as u32;
        let inner = format!(
            "{} |=> {} == {};",
            inputs.reset_asserted_expr(),
            apply_aliases(signal, &inputs.signal_aliases),
            const_sv(reset, width)
        );
        return PropertyCandidate {
            prop_id: clause.clause_id.clone(),
            name: clause.clause_id.clone(),
            body: format!("{};", inputs.wrap(&inner)),
            kind: PropertyKind::Assert,
            source_clause: Some(clause.clause_id.clone()),
            notes: String::new(),
        };
    }

    if clause.has_tag("read_only") {
        let signal = clause.metadata_str("signal");
        let sw_we = clause.metadata_str("sw_we_signal");
        let sw_addr = clause.metadata_str("sw_addr_signal");
        let address_int = clause.metadata.get("address_int").and_then(|v| v.as_i64());

        if let (Some(signal), Some(sw_we), Some(sw_addr), Some(address_int)) =
            (signal, sw_we, sw_addr, address_int)
        {
            let addr_width: u32 = clause
                .metadata_str("sw_addr_width")
                .and_then(|w| w.trim().parse().ok())
                .unwrap_or(32);
            let addr_const = const_sv_address(address_int, addr_width);
            let inner = format!(
                "({sw_we} && ({sw_addr} == {addr_const})) |-> $stable({signal});",
                sw_we = apply_aliases(sw_we, &inputs.signal_aliases),
                sw_addr = apply_aliases(sw_addr, &inputs.signal_aliases),
                signal = apply_aliases(signal, &inputs.signal_aliases),
            );
            return PropertyCandidate {
                prop_id: clause.clause_id.clone(),
                name: clause.clause_id.clone(),
                body: format!("{};", inputs.wrap(&inner)),
                kind: PropertyKind::Assert,
                source_clause: Some(clause.clause_id.clone()),
                notes: String::new(),
            };
        }
        return placeholder(
            clause,
            inputs,
            "missing signals: sw_we_signal, sw_addr_signal, or address not configured for this register (placeholder)"
                .to_string(),
        );
    }

    placeholder(
        clause,
        inputs,
        format!("Unrecognised register clause tags (placeholder): {:?}", clause.tags),
    )
}

pub fn candidates_for_rule_table_clause(
    clause: &SpecClause,
    inputs: &SynthesisInputs,
) -> PropertyCandidate {
    let condition = clause.metadata_str("condition").unwrap_or("").trim();
    let guarantee = clause.metadata_str("guarantee").unwrap_or("").trim();

    if condition.is_empty() || guarantee.is_empty() {
        return placeholder(
            clause,
            inputs,
            "missing condition or guarantee field (placeholder)".to_string(),
        );
    }

    let inner = format!(
        "({}) |-> ({});",
        apply_aliases(condition, &inputs.signal_aliases),
        apply_aliases(guarantee, &inputs.signal_aliases)
    );
    PropertyCandidate {
        prop_id: clause.clause_id.clone(),
        name: clause.clause_id.clone(),
        body: format!("{};", inputs.wrap(&inner)),
        kind: PropertyKind::Assert,
        source_clause: Some(clause.clause_id.clone()),
        notes: String::new(),
    }
}

/// Dispatch a single clause to the rule matching its tags.
pub fn candidate_for_clause(
    clause: &SpecClause,
    inputs: &SynthesisInputs,
    matcher: &dyn ClausePatternMatcher,
) -> PropertyCandidate {
    if clause.has_tag("rule_table") {
        candidates_for_rule_table_clause(clause, inputs)
    } else if clause.has_tag("register") || clause.has_tag("ipxact") {
        candidates_for_register_clause(clause, inputs)
    } else {
        candidates_for_text_clause(clause, inputs, matcher)
    }
}
