//! Derives a uniform [`IterationFeedback`] from a raw engine log.
//!
//! Engine adapters supply the combined stdout/stderr they captured; this
//! crate never shells out or touches the filesystem, so it is reused
//! identically by the Mock, SymbiYosys, and Scripted adapters.

use formalchip_runstate::{IterationFeedback, Status};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

const ERROR_MARKERS: &[&str] = &["status: error", " done (error", "sby error"];
const FAIL_MARKERS: &[&str] = &["status: failed", " done (fail", "counterexample", "assert failed"];
const PASS_MARKERS: &[&str] = &["status: passed", " done (pass", "all properties proven", "success"];
const UNKNOWN_MARKERS: &[&str] = &["status: unknown", " done (unknown"];

const MAX_CAPTURED_LINES: usize = 30;

static FAILED_PROPERTY_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"assert(?:ion)?\s+(\w+)\s+failed").unwrap(),
        Regex::new(r"property\s+(\w+)\s+failed").unwrap(),
        Regex::new(r"failed\s+property\s*[:=]\s*(\w+)").unwrap(),
        Regex::new(r"assertion\s+failed\s*[:=]\s*(\w+)").unwrap(),
        Regex::new(r"fail(?:ed|ure)\s*:\s*(\w+)").unwrap(),
    ]
});

/// Parse a full engine log into an [`IterationFeedback`]. `artifact_files`
/// is always empty here: the engine adapter fills it in after walking the
/// iteration directory for witness artifacts.
#[must_use]
pub fn parse_engine_log(log_text: &str) -> IterationFeedback {
    let lowercased = log_text.to_ascii_lowercase();
    let (status, summary) = classify_status(&lowercased);

    IterationFeedback {
        status,
        summary,
        failed_properties: extract_failed_properties(&lowercased),
        counterexamples: capture_lines(log_text, &["counterexample", "trace", "witness"]),
        unsat_cores: capture_lines(log_text, &["unsat", "core"]),
        coverage_hits: count_coverage_hits(&lowercased),
        artifact_files: Vec::new(),
    }
}

fn classify_status(lowercased: &str) -> (Status, String) {
    if let Some(marker) = ERROR_MARKERS.iter().find(|m| lowercased.contains(**m)) {
        return (Status::Error, format!("matched error marker: {marker}"));
    }
    if let Some(marker) = FAIL_MARKERS.iter().find(|m| lowercased.contains(**m)) {
        return (Status::Fail, format!("matched fail marker: {marker}"));
    }
    if let Some(marker) = PASS_MARKERS.iter().find(|m| lowercased.contains(**m)) {
        return (Status::Pass, format!("matched pass marker: {marker}"));
    }
    if let Some(marker) = UNKNOWN_MARKERS.iter().find(|m| lowercased.contains(**m)) {
        return (Status::Unknown, format!("matched unknown marker: {marker}"));
    }

    // Conservative fallback: scan for lone status tokens, most severe wins.
    if lowercased.contains("error") {
        return (Status::Error, "fallback token scan matched 'error'".to_string());
    }
    if lowercased.contains("fail") {
        return (Status::Fail, "fallback token scan matched 'fail'".to_string());
    }
    if lowercased.contains("pass") {
        return (Status::Pass, "fallback token scan matched 'pass'".to_string());
    }
    (Status::Unknown, "no status marker found in engine log".to_string())
}

fn extract_failed_properties(lowercased: &str) -> Vec<String> {
    let mut names: BTreeSet<String> = BTreeSet::new();
    for re in FAILED_PROPERTY_RES.iter() {
        for caps in re.captures_iter(lowercased) {
            names.insert(caps[1].to_string());
        }
    }
    names.into_iter().collect()
}

fn capture_lines(log_text: &str, markers: &[&str]) -> Vec<String> {
    log_text
        .lines()
        .filter(|line| {
            let lower = line.to_ascii_lowercase();
            markers.iter().any(|m| lower.contains(m))
        })
        .take(MAX_CAPTURED_LINES)
        .map(str::to_string)
        .collect()
}

fn count_coverage_hits(lowercased: &str) -> u32 {
    const REACH_MARKERS: &[&str] = &["reached", "passed", "triggered", "hit"];
    lowercased
        .lines()
        .filter(|line| line.contains("cover") && REACH_MARKERS.iter().any(|m| line.contains(m)))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_marker_takes_precedence_over_everything_else() {
        let log = "STATUS: PASSED\nSby error: solver crashed\n";
        let fb = parse_engine_log(log);
        assert_eq!(fb.status, Status::Error);
    }

    #[test]
    fn fail_marker_beats_pass_marker() {
        let log = "all properties proven\ncounterexample found for p1\n";
        let fb = parse_engine_log(log);
        assert_eq!(fb.status, Status::Fail);
    }

    #[test]
    fn pass_marker_recognised() {
        let log = "DONE (PASS)\nAll properties proven.\n";
        let fb = parse_engine_log(log);
        assert_eq!(fb.status, Status::Pass);
    }

    #[test]
    fn fallback_token_scan_when_no_explicit_marker() {
        let fb = parse_engine_log("something went wrong, error in solver init");
        assert_eq!(fb.status, Status::Error);
    }

    #[test]
    fn no_markers_at_all_is_unknown() {
        let fb = parse_engine_log("engine produced no recognisable output");
        assert_eq!(fb.status, Status::Unknown);
    }

    #[test]
    fn failed_property_names_are_deduplicated_and_sorted() {
        let log = "assertion req_ack failed\nassert req_ack failed\nproperty fifo_ok failed\n";
        let fb = parse_engine_log(log);
        assert_eq!(fb.failed_properties, vec!["fifo_ok", "req_ack"]);
    }

    #[test]
    fn all_five_failed_property_patterns_match() {
        let log = "\
            assert p1 failed\n\
            assertion p2 failed\n\
            property p3 failed\n\
            failed property: p4\n\
            assertion failed: p5\n\
            failure: p6\n";
        let fb = parse_engine_log(log);
        assert_eq!(
            fb.failed_properties,
            vec!["p1", "p2", "p3", "p4", "p5", "p6"]
        );
    }

    #[test]
    fn counterexample_lines_cap_at_thirty() {
        let log = (0..50)
            .map(|i| format!("counterexample line {i}\n"))
            .collect::<String>();
        let fb = parse_engine_log(&log);
        assert_eq!(fb.counterexamples.len(), 30);
    }

    #[test]
    fn coverage_hits_count_matching_lines_only() {
        let log = "cover point reached\ncover point untouched\ncover triggered ok\nirrelevant line\n";
        let fb = parse_engine_log(log);
        assert_eq!(fb.coverage_hits, 2);
    }
}
