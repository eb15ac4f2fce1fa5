//! Baseline-study CSV diff: average `((baseline − formalchip) / baseline) * 100`
//! across every row with a positive baseline, rounded to three decimals.

use camino::Utf8Path;

use crate::error::KpiError;

/// Compute the average time-reduction percentage from a baseline-study CSV,
/// or `None` if no row has a positive baseline minutes value.
///
/// Column names are matched case-insensitively by prefix, so
/// `baseline_minutes`, `baseline_minutes_case1`, and similar spreadsheet
/// variants all resolve, as do their `formalchip_minutes…` counterparts.
pub fn baseline_reduction_percent(path: &Utf8Path) -> Result<Option<f64>, KpiError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_std_path())
        .map_err(|e| KpiError::ReadFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

    let headers = reader
        .headers()
        .map_err(|e| KpiError::MalformedBaseline {
            path: path.to_string(),
            reason: e.to_string(),
        })?
        .clone();

    let find = |prefix: &str| -> Option<usize> {
        headers
            .iter()
            .position(|h| h.to_ascii_lowercase().starts_with(prefix))
    };

    let baseline_col = find("baseline_minutes").ok_or_else(|| KpiError::MissingColumn {
        path: path.to_string(),
        column: "baseline_minutes*".to_string(),
    })?;
    let formalchip_col = find("formalchip_minutes").ok_or_else(|| KpiError::MissingColumn {
        path: path.to_string(),
        column: "formalchip_minutes*".to_string(),
    })?;

    let mut total = 0.0f64;
    let mut rows = 0u32;

    for record in reader.records() {
        let record = record.map_err(|e| KpiError::MalformedBaseline {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let baseline: f64 = record.get(baseline_col).and_then(|v| v.parse().ok()).unwrap_or(0.0);
        let formalchip: f64 = record.get(formalchip_col).and_then(|v| v.parse().ok()).unwrap_or(0.0);
        if baseline > 0.0 {
            total += ((baseline - formalchip) / baseline) * 100.0;
            rows += 1;
        }
    }

    if rows == 0 {
        return Ok(None);
    }

    let avg = total / f64::from(rows);
    Ok(Some((avg * 1000.0).round() / 1000.0))
}
