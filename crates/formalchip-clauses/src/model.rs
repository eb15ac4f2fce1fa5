//! The `SpecClause` data model: a normalised unit of verification intent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A value carried in a clause's `metadata` map.
///
/// Kept untyped (mirroring the source's dynamic metadata dict) because each
/// ingestor populates a different, small set of keys; the synthesis engine
/// reads specific keys by name per clause tag.
pub type ClauseMetadata = BTreeMap<String, serde_json::Value>;

/// A normalised verification intent produced by one of the spec ingestors.
///
/// Immutable once constructed. `clause_id` must be unique within a run; this
/// is enforced by each ingestor's own counters/row indices rather than by a
/// runtime check, since clauses from different ingestors never collide by
/// construction (each uses a distinct id prefix).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecClause {
    pub clause_id: String,
    pub text: String,
    pub source: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: ClauseMetadata,
}

impl SpecClause {
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(|v| v.as_str())
    }
}
