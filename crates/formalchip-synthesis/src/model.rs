//! The synthesis data model: inputs, library patterns, and the candidates
//! they and the clause rules produce.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The SVA property kind a candidate (or library-pattern option) carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Assert,
    Assume,
    Cover,
}

impl PropertyKind {
    #[must_use]
    pub fn as_sv_keyword(self) -> &'static str {
        match self {
            PropertyKind::Assert => "assert",
            PropertyKind::Assume => "assume",
            PropertyKind::Cover => "cover",
        }
    }
}

impl Default for PropertyKind {
    fn default() -> Self {
        PropertyKind::Assert
    }
}

fn default_bound() -> u32 {
    8
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandshakeOptions {
    pub req: String,
    pub ack: String,
    #[serde(default = "default_bound")]
    pub bound: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FifoSafetyOptions {
    pub full: String,
    pub empty: String,
    pub push: String,
    pub pop: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetSequenceOptions {
    pub signal: String,
    pub value: String,
    pub latency: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineOptions {
    pub name: String,
    pub expr: String,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub property_kind: PropertyKind,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Canonical10Options {
    pub req: String,
    pub ack: String,
    pub push: String,
    pub pop: String,
    pub full: String,
    pub empty: String,
    pub level: String,
    pub level_width: u32,
    pub level_max: u64,
    pub valid: String,
    #[serde(default = "default_bound")]
    pub bound: u32,
}

/// A reusable property template, one variant per recognised `kind`.
///
/// `Unknown` is the forward-compatibility catch-all: a config-declared
/// library kind the synthesiser does not recognise (or whose options fail
/// to match the known shape) downgrades here rather than failing the run.
#[derive(Debug, Clone)]
pub enum LibraryPattern {
    Handshake(HandshakeOptions),
    FifoSafety(FifoSafetyOptions),
    ResetSequence(ResetSequenceOptions),
    Inline(InlineOptions),
    Canonical10(Canonical10Options),
    Unknown {
        kind: String,
        raw: serde_json::Map<String, serde_json::Value>,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct RawLibraryPattern {
    kind: String,
    #[serde(flatten)]
    options: serde_json::Map<String, serde_json::Value>,
}

impl From<RawLibraryPattern> for LibraryPattern {
    fn from(raw: RawLibraryPattern) -> Self {
        let value = serde_json::Value::Object(raw.options.clone());
        let downgrade = |kind: &str, err: serde_json::Error| -> LibraryPattern {
            tracing::warn!(kind, %err, "library pattern options do not match kind; treating as unknown");
            LibraryPattern::Unknown {
                kind: kind.to_string(),
                raw: raw.options.clone(),
            }
        };
        match raw.kind.as_str() {
            "handshake" => serde_json::from_value(value)
                .map(LibraryPattern::Handshake)
                .unwrap_or_else(|e| downgrade(&raw.kind, e)),
            "fifo_safety" => serde_json::from_value(value)
                .map(LibraryPattern::FifoSafety)
                .unwrap_or_else(|e| downgrade(&raw.kind, e)),
            "reset_sequence" => serde_json::from_value(value)
                .map(LibraryPattern::ResetSequence)
                .unwrap_or_else(|e| downgrade(&raw.kind, e)),
            "inline" => serde_json::from_value(value)
                .map(LibraryPattern::Inline)
                .unwrap_or_else(|e| downgrade(&raw.kind, e)),
            "canonical_10" => serde_json::from_value(value)
                .map(LibraryPattern::Canonical10)
                .unwrap_or_else(|e| downgrade(&raw.kind, e)),
            other => LibraryPattern::Unknown {
                kind: other.to_string(),
                raw: raw.options,
            },
        }
    }
}

impl<'de> Deserialize<'de> for LibraryPattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        RawLibraryPattern::deserialize(deserializer).map(LibraryPattern::from)
    }
}

impl Serialize for LibraryPattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let (kind, value) = match self {
            LibraryPattern::Handshake(o) => ("handshake", serde_json::to_value(o)),
            LibraryPattern::FifoSafety(o) => ("fifo_safety", serde_json::to_value(o)),
            LibraryPattern::ResetSequence(o) => ("reset_sequence", serde_json::to_value(o)),
            LibraryPattern::Inline(o) => ("inline", serde_json::to_value(o)),
            LibraryPattern::Canonical10(o) => ("canonical_10", serde_json::to_value(o)),
            LibraryPattern::Unknown { kind, raw } => {
                (kind.as_str(), Ok(serde_json::Value::Object(raw.clone())))
            }
        };
        let mut value = value.map_err(serde::ser::Error::custom)?;
        if let serde_json::Value::Object(obj) = &mut value {
            obj.insert("kind".to_string(), serde_json::Value::String(kind.to_string()));
        }
        value.serialize(serializer)
    }
}

/// The synthesis context: clocking, reset polarity, and the known-signal
/// catalogue used by the missing-signal placeholder policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisInputs {
    pub clock: String,
    pub reset: String,
    pub reset_active_low: bool,
    pub known_signals: BTreeSet<String>,
    pub signal_aliases: BTreeMap<String, String>,
}

impl SynthesisInputs {
    #[must_use]
    pub fn clocking_expr(&self) -> String {
        crate::helpers::clocking(&self.clock)
    }

    #[must_use]
    pub fn reset_disable_expr(&self) -> String {
        crate::helpers::reset_disable(&self.reset, self.reset_active_low)
    }

    #[must_use]
    pub fn reset_asserted_expr(&self) -> String {
        crate::helpers::reset_asserted(&self.reset, self.reset_active_low)
    }

    /// Wrap a bare SVA statement with this run's clocking and reset-disable
    /// prefix, e.g. `@(posedge clk) disable iff(rst) req |=> ack;`.
    #[must_use]
    pub fn wrap(&self, inner: &str) -> String {
        format!(
            "@({}) {} {inner}",
            self.clocking_expr(),
            self.reset_disable_expr()
        )
    }
}

/// A synthesised SVA property candidate.
///
/// `body` is the complete property statement, including the clocking and
/// `disable iff` prefix; nothing downstream re-wraps it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyCandidate {
    pub prop_id: String,
    pub name: String,
    pub body: String,
    pub kind: PropertyKind,
    #[serde(default)]
    pub source_clause: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl PropertyCandidate {
    /// A candidate is a placeholder if its notes call it out, or its body
    /// degenerates to the trivial `1'b1 |-> 1'b1` statement the
    /// missing-signal policy falls back to.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.notes.to_ascii_lowercase().contains("placeholder") || self.body.contains("1'b1 |-> 1'b1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_downgrades_without_error() {
        let json = serde_json::json!({"kind": "future_pattern", "foo": "bar"});
        let pattern: LibraryPattern = serde_json::from_value(json).unwrap();
        match pattern {
            LibraryPattern::Unknown { kind, raw } => {
                assert_eq!(kind, "future_pattern");
                assert_eq!(raw.get("foo").and_then(|v| v.as_str()), Some("bar"));
            }
            _ => panic!("expected Unknown variant"),
        }
    }

    #[test]
    fn known_kind_with_missing_fields_downgrades_to_unknown() {
        let json = serde_json::json!({"kind": "handshake"});
        let pattern: LibraryPattern = serde_json::from_value(json).unwrap();
        assert!(matches!(pattern, LibraryPattern::Unknown { .. }));
    }

    #[test]
    fn handshake_options_default_bound_is_eight() {
        let json = serde_json::json!({"kind": "handshake", "req": "req", "ack": "ack"});
        let pattern: LibraryPattern = serde_json::from_value(json).unwrap();
        match pattern {
            LibraryPattern::Handshake(opts) => assert_eq!(opts.bound, 8),
            _ => panic!("expected Handshake variant"),
        }
    }

    #[test]
    fn handshake_pattern_serializes_with_kind_and_round_trips() {
        let pattern = LibraryPattern::Handshake(HandshakeOptions {
            req: "req".to_string(),
            ack: "ack".to_string(),
            bound: 8,
        });
        let value = serde_json::to_value(&pattern).unwrap();
        assert_eq!(value.get("kind").and_then(|v| v.as_str()), Some("handshake"));
        let round_tripped: LibraryPattern = serde_json::from_value(value).unwrap();
        assert!(matches!(round_tripped, LibraryPattern::Handshake(_)));
    }

    #[test]
    fn is_placeholder_detects_trivial_body() {
        let candidate = PropertyCandidate {
            prop_id: "p1".to_string(),
            name: "p1".to_string(),
            body: "@(posedge clk) 1'b1 |-> 1'b1;".to_string(),
            kind: PropertyKind::Assert,
            source_clause: None,
            notes: String::new(),
        };
        assert!(candidate.is_placeholder());
    }

    #[test]
    fn is_placeholder_detects_notes_marker() {
        let candidate = PropertyCandidate {
            prop_id: "p2".to_string(),
            name: "p2".to_string(),
            body: "@(posedge clk) req |-> ack;".to_string(),
            kind: PropertyKind::Assert,
            source_clause: None,
            notes: "missing signals: placeholder".to_string(),
        };
        assert!(candidate.is_placeholder());
    }
}
