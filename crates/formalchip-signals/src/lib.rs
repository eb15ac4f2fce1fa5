//! Best-effort RTL signal declaration scanner.
//!
//! Deliberately lightweight: false positives are acceptable, false negatives
//! are the critical failure mode because they drive the synthesis engine's
//! missing-signal placeholder policy.

use anyhow::{Context, Result};
use camino::Utf8Path;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

const DECL_KEYWORDS: &[&str] = &["input", "output", "inout", "wire", "logic", "reg"];

static DECL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(input|output|inout|wire|logic|reg)\b\s*(?:signed|unsigned)?\s*(?:\[[^\]]*\])?\s*([^;]+);",
    )
    .expect("DECL_RE is a valid regex")
});

static LINE_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"//.*$").expect("valid regex"));

static BRACKET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("valid regex"));

/// Collect the set of declared identifiers across the given RTL files.
///
/// Unreadable files are skipped with an error only if none of the files can
/// be read at all is not enforced here; callers (doctor, the pipeline) decide
/// whether a missing RTL file is fatal.
pub fn collect_signals(rtl_files: &[impl AsRef<Utf8Path>]) -> Result<BTreeSet<String>> {
    let mut signals = BTreeSet::new();
    for path in rtl_files {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("failed to read RTL file: {path}"))?;
        collect_signals_from_source(&content, &mut signals);
    }
    Ok(signals)
}

fn collect_signals_from_source(content: &str, signals: &mut BTreeSet<String>) {
    let stripped: String = content
        .lines()
        .map(|line| LINE_COMMENT_RE.replace(line, "").into_owned())
        .collect::<Vec<_>>()
        .join("\n");

    for caps in DECL_RE.captures_iter(&stripped) {
        let declarator_list = &caps[2];
        for item in declarator_list.split(',') {
            if let Some(name) = last_identifier(item) {
                signals.insert(name);
            }
        }
    }
}

/// Extract the last identifier token of a single declarator, stripping any
/// `[..]` packed-array dimension (wherever it falls, not just a trailing
/// one — `reg [7:0] q` has the width *before* the name) and filtering
/// declaration keywords.
fn last_identifier(item: &str) -> Option<String> {
    let without_brackets = BRACKET_RE.replace_all(item, " ");
    without_brackets
        .split_whitespace()
        .filter(|tok| !DECL_KEYWORDS.contains(&tok.to_ascii_lowercase().as_str()))
        .filter(|tok| tok != &"signed" && tok != &"unsigned")
        .next_back()
        .map(|s| s.trim_matches(|c: char| !c.is_alphanumeric() && c != '_').to_string())
        .filter(|s| !s.is_empty())
}
