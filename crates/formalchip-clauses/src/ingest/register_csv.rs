//! Register-table CSV ingestor.
//!
//! Columns are resolved via tolerant aliases so both `name,address,width,
//! reset,access` and common spreadsheet variants (`register`, `addr`,
//! `reset_value`, `sw_access`, `bits`) work unmodified.

use crate::error::IngestError;
use crate::model::{ClauseMetadata, SpecClause};
use camino::Utf8Path;
use std::collections::BTreeMap;

const READ_ONLY_VALUES: &[&str] = &["ro", "read-only", "r"];

pub fn parse_register_csv(
    path: &Utf8Path,
    options: &BTreeMap<String, serde_json::Value>,
) -> Result<Vec<SpecClause>, IngestError> {
    let signal_template = options
        .get("signal_template")
        .and_then(|v| v.as_str())
        .unwrap_or("{name_lower}_q")
        .to_string();
    let sw_we_signal = options.get("sw_we_signal").and_then(|v| v.as_str());
    let sw_addr_signal = options.get("sw_addr_signal").and_then(|v| v.as_str());
    let sw_addr_width = options.get("sw_addr_width").and_then(|v| v.as_str());

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_std_path())
        .map_err(|e| IngestError::ReadFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

    let headers = reader
        .headers()
        .map_err(|e| IngestError::Malformed {
            format: "register CSV",
            path: path.to_string(),
            reason: e.to_string(),
        })?
        .clone();

    let col = |names: &[&str]| -> Option<usize> {
        headers.iter().position(|h| {
            let lower = h.to_ascii_lowercase();
            names.contains(&lower.as_str())
        })
    };

    let name_col = col(&["name", "register"]).ok_or_else(|| IngestError::MissingColumn {
        row: 0,
        column: "name".to_string(),
    })?;
    let address_col = col(&["address", "addr"]);
    let reset_col = col(&["reset", "reset_value"]);
    let access_col = col(&["access", "sw_access"]);
    let width_col = col(&["width", "bits"]);

    let mut clauses = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IngestError::Malformed {
            format: "register CSV",
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        let name = record
            .get(name_col)
            .ok_or(IngestError::MissingColumn {
                row: idx,
                column: "name".to_string(),
            })?
            .to_string();
        let address = address_col.and_then(|c| record.get(c)).unwrap_or("");
        let reset = reset_col.and_then(|c| record.get(c)).unwrap_or("0");
        let access = access_col.and_then(|c| record.get(c)).unwrap_or("");
        let width = width_col
            .and_then(|c| record.get(c))
            .and_then(|w| parse_int(w))
            .unwrap_or(32);

        let name_lower = name.to_ascii_lowercase();
        let name_upper = name.to_ascii_uppercase();
        let signal = render_signal_template(&signal_template, &name, &name_lower, &name_upper);

        let mut reset_metadata = ClauseMetadata::new();
        reset_metadata.insert("register".to_string(), serde_json::json!(name));
        reset_metadata.insert("address".to_string(), serde_json::json!(address));
        if let Some(addr_int) = parse_int(address) {
            reset_metadata.insert("address_int".to_string(), serde_json::json!(addr_int));
        }
        reset_metadata.insert("reset".to_string(), serde_json::json!(reset));
        reset_metadata.insert("access".to_string(), serde_json::json!(access));
        reset_metadata.insert("width".to_string(), serde_json::json!(width));
        reset_metadata.insert("signal".to_string(), serde_json::json!(signal));
        if let Some(we) = sw_we_signal {
            reset_metadata.insert("sw_we_signal".to_string(), serde_json::json!(we));
        }
        if let Some(addr_sig) = sw_addr_signal {
            reset_metadata.insert("sw_addr_signal".to_string(), serde_json::json!(addr_sig));
        }
        if let Some(addr_w) = sw_addr_width {
            reset_metadata.insert("sw_addr_width".to_string(), serde_json::json!(addr_w));
        }

        clauses.push(SpecClause {
            clause_id: format!("reg_{idx:03}_reset"),
            text: format!("{name} resets to {reset}"),
            source: path.to_string(),
            tags: vec!["register".to_string(), "reset".to_string()],
            metadata: reset_metadata,
        });

        if READ_ONLY_VALUES.contains(&access.to_ascii_lowercase().as_str()) {
            let mut ro_metadata = ClauseMetadata::new();
            ro_metadata.insert("register".to_string(), serde_json::json!(name));
            ro_metadata.insert("address".to_string(), serde_json::json!(address));
            if let Some(addr_int) = parse_int(address) {
                ro_metadata.insert("address_int".to_string(), serde_json::json!(addr_int));
            }
            ro_metadata.insert("access".to_string(), serde_json::json!(access));
            ro_metadata.insert("signal".to_string(), serde_json::json!(signal));
            if let Some(we) = sw_we_signal {
                ro_metadata.insert("sw_we_signal".to_string(), serde_json::json!(we));
            }
            if let Some(addr_sig) = sw_addr_signal {
                ro_metadata.insert("sw_addr_signal".to_string(), serde_json::json!(addr_sig));
            }
            if let Some(addr_w) = sw_addr_width {
                ro_metadata.insert("sw_addr_width".to_string(), serde_json::json!(addr_w));
            }

            clauses.push(SpecClause {
                clause_id: format!("reg_{idx:03}_ro"),
                text: format!("{name} is read-only"),
                source: path.to_string(),
                tags: vec![
                    "register".to_string(),
                    "access".to_string(),
                    "read_only".to_string(),
                ],
                metadata: ro_metadata,
            });
        }
    }

    Ok(clauses)
}

fn render_signal_template(template: &str, name: &str, name_lower: &str, name_upper: &str) -> String {
    template
        .replace("{name_lower}", name_lower)
        .replace("{name_upper}", name_upper)
        .replace("{name}", name)
}

fn parse_int(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }
    trimmed.parse::<i64>().ok()
}
