//! Free-text spec ingestor: every non-blank, non-comment line is one clause.

use crate::error::IngestError;
use crate::model::{ClauseMetadata, SpecClause};
use camino::Utf8Path;

pub fn parse_text_spec(path: &Utf8Path) -> Result<Vec<SpecClause>, IngestError> {
    let content =
        std::fs::read_to_string(path.as_std_path()).map_err(|e| IngestError::ReadFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

    let mut clauses = Vec::new();
    let mut counter = 0usize;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        counter += 1;
        let text = trimmed.strip_prefix('-').map_or(trimmed, str::trim).trim();
        clauses.push(SpecClause {
            clause_id: format!("text_{counter:03}"),
            text: text.to_string(),
            source: path.to_string(),
            tags: vec!["text".to_string()],
            metadata: ClauseMetadata::new(),
        });
    }
    Ok(clauses)
}
