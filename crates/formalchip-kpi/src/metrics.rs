//! Counting properties and placeholders out of a serialized `.sv` property file,
//! and timing the first iteration whose property file has a meaningful one.

use camino::Utf8Path;
use chrono::{DateTime, Utc};
use formalchip_runstate::RunState;

use crate::error::KpiError;

const PLACEHOLDER_MARKERS: &[&str] = &["missing signals", "unable to derive strict logic"];

/// `(property_count, placeholder_count)` for one serialized `.sv` property file.
///
/// A `// NOTE:` line is treated as flagging its property a placeholder when
/// it mentions one of [`PLACEHOLDER_MARKERS`]; a trivial `1'b1 |-> 1'b1` body
/// is a placeholder too, independent of its note text.
#[must_use]
pub fn first_iteration_property_metrics(content: &str) -> (u32, u32) {
    let mut property_count = 0u32;
    let mut placeholder_count = 0u32;
    let mut pending_placeholder = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(note) = trimmed.strip_prefix("// NOTE:") {
            let lower = note.to_ascii_lowercase();
            if PLACEHOLDER_MARKERS.iter().any(|marker| lower.contains(marker)) {
                pending_placeholder = true;
            }
        } else if trimmed.starts_with("property ") {
            property_count += 1;
        } else if trimmed.contains("1'b1 |-> 1'b1") {
            pending_placeholder = true;
        } else if trimmed == "endproperty" {
            if pending_placeholder {
                placeholder_count += 1;
            }
            pending_placeholder = false;
        }
    }

    (property_count, placeholder_count)
}

/// Minutes from run start to completion of the first iteration whose
/// property file has at least one non-placeholder property, or `None` if no
/// such iteration exists (or a timestamp fails to parse).
pub fn time_to_first_meaningful_properties_min(
    run_dir: &Utf8Path,
    state: &RunState,
) -> Result<Option<f64>, KpiError> {
    let Some(started_at) = parse_rfc3339(&state.started_at) else {
        return Ok(None);
    };

    for iteration in &state.iterations {
        let property_file = run_dir.join(&iteration.property_file);
        let content = std::fs::read_to_string(&property_file).map_err(|e| KpiError::ReadFailed {
            path: property_file.to_string(),
            reason: e.to_string(),
        })?;
        let (property_count, placeholder_count) = first_iteration_property_metrics(&content);
        let meaningful = property_count.saturating_sub(placeholder_count);
        if meaningful > 0 {
            let Some(completed_at) = parse_rfc3339(&iteration.completed_at) else {
                return Ok(None);
            };
            let minutes = (completed_at - started_at).num_seconds() as f64 / 60.0;
            return Ok(Some(minutes.max(0.0)));
        }
    }

    Ok(None)
}

fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_properties_and_placeholders() {
        let sv = "`ifdef FORMAL\n\n\
            // FC_ID: p1\n\
            property p1;\n  @(posedge clk) a |-> b;\nendproperty\n\
            assert property (p1);\n\n\
            // FC_ID: p2\n\
            // NOTE: missing signals: clk\n\
            property p2;\n  1'b1 |-> 1'b1;\nendproperty\n\
            assert property (p2);\n\n\
            `endif\n";
        let (properties, placeholders) = first_iteration_property_metrics(sv);
        assert_eq!(properties, 2);
        assert_eq!(placeholders, 1);
    }

    #[test]
    fn trivial_body_counts_as_placeholder_even_without_note() {
        let sv = "property p1;\n  1'b1 |-> 1'b1;\nendproperty\n";
        let (properties, placeholders) = first_iteration_property_metrics(sv);
        assert_eq!(properties, 1);
        assert_eq!(placeholders, 1);
    }

    #[test]
    fn empty_file_has_no_properties() {
        assert_eq!(first_iteration_property_metrics(""), (0, 0));
    }
}
