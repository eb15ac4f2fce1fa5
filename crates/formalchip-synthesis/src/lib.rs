//! Synthesises SVA property candidates from spec clauses and library
//! patterns, given a catalogue of known RTL signal names.

pub mod clause_rules;
pub mod dedup;
pub mod helpers;
pub mod library_rules;
pub mod model;
pub mod pattern;
pub mod serialize;

pub use model::{
    Canonical10Options, FifoSafetyOptions, HandshakeOptions, InlineOptions, LibraryPattern,
    PropertyCandidate, PropertyKind, ResetSequenceOptions, SynthesisInputs,
};
pub use pattern::{ClauseMatch, ClausePatternMatcher, RegexPatternMatcher};
pub use serialize::emit_sva_file;

use formalchip_clauses::SpecClause;

/// Placeholders are capped at this count per run unless a caller overrides
/// it (mirrors the synthesiser's hard-coded default).
pub const DEFAULT_MAX_PLACEHOLDERS: usize = 3;

/// Run the full synthesis pipeline: clause rules, then library rules, then
/// the missing-signal policy, name dedup, and the final optimize pass.
///
/// Clauses are processed in their given order, followed by libraries in
/// their given order, matching the ordering invariant candidates rely on
/// for stable naming.
#[must_use]
pub fn synthesize(
    clauses: &[SpecClause],
    libraries: &[LibraryPattern],
    inputs: &SynthesisInputs,
) -> Vec<PropertyCandidate> {
    synthesize_with(
        clauses,
        libraries,
        inputs,
        &RegexPatternMatcher,
        DEFAULT_MAX_PLACEHOLDERS,
    )
}

/// The same pipeline as [`synthesize`], but with the pattern matcher and
/// placeholder budget made explicit for testing and configuration.
#[must_use]
pub fn synthesize_with(
    clauses: &[SpecClause],
    libraries: &[LibraryPattern],
    inputs: &SynthesisInputs,
    matcher: &dyn ClausePatternMatcher,
    max_placeholders: usize,
) -> Vec<PropertyCandidate> {
    let mut candidates = Vec::new();

    for clause in clauses {
        candidates.push(clause_rules::candidate_for_clause(clause, inputs, matcher));
    }

    for (idx, library) in libraries.iter().enumerate() {
        let prop_id = format!("lib_{idx:03}");
        candidates.extend(library_rules::candidates_for_library(&prop_id, library, inputs));
    }

    let candidates = dedup::apply_missing_signal_policy(candidates, inputs);
    let candidates = dedup::dedupe_names(candidates);
    dedup::optimize_candidates(candidates, max_placeholders)
}
