//! Protocol rule-table CSV ingestor: `rule_id,condition,guarantee` rows.

use crate::error::IngestError;
use crate::model::{ClauseMetadata, SpecClause};
use camino::Utf8Path;

pub fn parse_rule_table_csv(path: &Utf8Path) -> Result<Vec<SpecClause>, IngestError> {
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
            format: "rule-table CSV",
            path: path.to_string(),
            reason: e.to_string(),
        })?
        .clone();

    let col = |names: &[&str]| -> Option<usize> {
        headers
            .iter()
            .position(|h| names.contains(&h.to_ascii_lowercase().as_str()))
    };

    let rule_id_col = col(&["rule_id"]).ok_or_else(|| IngestError::MissingColumn {
        row: 0,
        column: "rule_id".to_string(),
    })?;
    let condition_col =
        col(&["condition", "if"]).ok_or_else(|| IngestError::MissingColumn {
            row: 0,
            column: "condition".to_string(),
        })?;
    let guarantee_col =
        col(&["guarantee", "then"]).ok_or_else(|| IngestError::MissingColumn {
            row: 0,
            column: "guarantee".to_string(),
        })?;

    let mut clauses = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IngestError::Malformed {
            format: "rule-table CSV",
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let rule_id = record.get(rule_id_col).unwrap_or("").to_string();
        let condition = record.get(condition_col).unwrap_or("").to_string();
        let guarantee = record.get(guarantee_col).unwrap_or("").to_string();

        let mut metadata = ClauseMetadata::new();
        metadata.insert("condition".to_string(), serde_json::json!(condition));
        metadata.insert("guarantee".to_string(), serde_json::json!(guarantee));
        metadata.insert("rule_id".to_string(), serde_json::json!(rule_id));

        let rule_id_for_id = if rule_id.is_empty() {
            format!("row{idx}")
        } else {
            rule_id.clone()
        };

        clauses.push(SpecClause {
            clause_id: format!("tbl_{rule_id_for_id}"),
            text: format!("if {condition} then {guarantee}"),
            source: path.to_string(),
            tags: vec!["rule_table".to_string()],
            metadata,
        });
    }
    Ok(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> (NamedTempFile, camino::Utf8PathBuf) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(file.path().to_path_buf()).unwrap();
        (file, path)
    }

    #[test]
    fn parses_condition_guarantee_rows() {
        let (_f, path) =
            write_csv("rule_id,condition,guarantee\nR1,req && valid,ack\n");
        let clauses = parse_rule_table_csv(&path).unwrap();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].clause_id, "tbl_R1");
        assert_eq!(clauses[0].metadata_str("condition"), Some("req && valid"));
        assert_eq!(clauses[0].metadata_str("guarantee"), Some("ack"));
        assert!(clauses[0].has_tag("rule_table"));
    }

    #[test]
    fn accepts_if_then_header_aliases() {
        let (_f, path) = write_csv("rule_id,if,then\nR2,a,b\n");
        let clauses = parse_rule_table_csv(&path).unwrap();
        assert_eq!(clauses[0].metadata_str("condition"), Some("a"));
        assert_eq!(clauses[0].metadata_str("guarantee"), Some("b"));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let (_f, path) = write_csv("rule_id,condition\nR1,a\n");
        let err = parse_rule_table_csv(&path).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { .. }));
    }
}
