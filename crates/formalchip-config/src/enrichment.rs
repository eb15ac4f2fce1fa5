//! Turns config-level context into the inputs the synthesis/ingestion
//! pipeline actually consumes: structured `[constraints]` become synthetic
//! `inline` libraries, and the known-signal catalogue is enriched with
//! `clock`/`reset` so they never trigger a missing-signal placeholder.

use crate::model::{ConstraintEntry, FormalChipConfig};
use formalchip_synthesis::{InlineOptions, LibraryPattern, PropertyKind, SynthesisInputs};
use std::collections::BTreeSet;

fn inline_library(entry: &ConstraintEntry, kind: PropertyKind, default_note: &str) -> LibraryPattern {
    LibraryPattern::Inline(InlineOptions {
        name: entry.name.clone(),
        expr: entry.expr.clone(),
        when: entry.when.clone(),
        property_kind: kind,
        note: Some(
            entry
                .note
                .clone()
                .unwrap_or_else(|| default_note.to_string()),
        ),
    })
}

impl FormalChipConfig {
    /// The config's declared `[[libraries]]`, plus one synthetic `inline`
    /// library per `[constraints]` entry, in that order.
    #[must_use]
    pub fn effective_libraries(&self) -> Vec<LibraryPattern> {
        let mut libraries = self.libraries.clone();
        for assumption in &self.constraints.assumptions {
            libraries.push(inline_library(
                assumption,
                PropertyKind::Assume,
                "Structured environment assumption",
            ));
        }
        for cover in &self.constraints.covers {
            libraries.push(inline_library(
                cover,
                PropertyKind::Cover,
                "Structured coverage objective",
            ));
        }
        libraries
    }

    /// Build [`SynthesisInputs`] from the project config and a discovered
    /// RTL signal catalogue, unioning in `clock`/`reset` so the pipeline
    /// invariant (`clock, reset ∈ known_signals`) always holds.
    #[must_use]
    pub fn synthesis_inputs(&self, mut known_signals: BTreeSet<String>) -> SynthesisInputs {
        known_signals.insert(self.project.clock.clone());
        known_signals.insert(self.project.reset.clone());
        SynthesisInputs {
            clock: self.project.clock.clone(),
            reset: self.project.reset.clone(),
            reset_active_low: self.project.reset_active_low,
            known_signals,
            signal_aliases: self.project.signal_aliases.clone(),
        }
    }
}
