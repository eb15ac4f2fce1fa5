//! The config-level declaration of a spec source, and the dispatcher that
//! turns a list of them into clauses.

use crate::error::IngestError;
use crate::ingest::{ipxact, register_csv, rule_table, text_spec};
use crate::model::SpecClause;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One `[[specs]]` entry from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecInput {
    pub kind: String,
    pub path: Utf8PathBuf,
    #[serde(default)]
    pub options: BTreeMap<String, serde_json::Value>,
}

/// Dispatch every `SpecInput` to its ingestor and flatten the result.
///
/// Unknown kinds are a fatal construction error (§4.2): there is no
/// placeholder fallback for an ingestor, unlike missing RTL signals inside
/// the synthesis engine.
pub fn load_spec_clauses(specs: &[SpecInput]) -> Result<Vec<SpecClause>, IngestError> {
    let mut clauses = Vec::new();
    for spec in specs {
        let mut produced = match spec.kind.as_str() {
            "text" => text_spec::parse_text_spec(&spec.path)?,
            "register_csv" => register_csv::parse_register_csv(&spec.path, &spec.options)?,
            "ipxact" => ipxact::parse_ipxact(&spec.path)?,
            "rule_table_csv" => rule_table::parse_rule_table_csv(&spec.path)?,
            other => {
                return Err(IngestError::UnsupportedKind {
                    kind: other.to_string(),
                });
            }
        };
        clauses.append(&mut produced);
    }
    Ok(clauses)
}
