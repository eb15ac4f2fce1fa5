//! `LlmBackend`: the capability object every propose/repair implementation
//! satisfies, modelled as a trait rather than a runtime string tag so new
//! backends are added by implementing it, not by branching on a kind field.

use crate::error::LlmError;
use formalchip_clauses::SpecClause;
use formalchip_runstate::IterationFeedback;
use formalchip_synthesis::{LibraryPattern, PropertyCandidate, SynthesisInputs};

pub trait LlmBackend {
    fn propose(
        &self,
        clauses: &[SpecClause],
        libraries: &[LibraryPattern],
        inputs: &SynthesisInputs,
    ) -> Result<Vec<PropertyCandidate>, LlmError>;

    fn repair(
        &self,
        current: &[PropertyCandidate],
        feedback: &IterationFeedback,
        clauses: &[SpecClause],
        libraries: &[LibraryPattern],
        inputs: &SynthesisInputs,
    ) -> Result<Vec<PropertyCandidate>, LlmError>;
}
