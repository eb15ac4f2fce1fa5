//! Run-id generation and timestamp helpers.

use chrono::{SecondsFormat, SubsecRound, Utc};
use rand::Rng;

/// Current UTC time, second precision, RFC 3339 with a literal `Z` suffix.
pub fn utc_now_iso() -> String {
    Utc::now()
        .trunc_subsecs(0)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Build a run id: `sanitize(project_name)-<compact UTC timestamp>-<4 digit nonce>`.
///
/// The nonce is for collision-avoidance when two runs of the same project
/// start within the same second; it is not a security token.
pub fn new_run_id(project_name: &str) -> String {
    let sanitized = sanitize_run_id_component(project_name);
    let timestamp = Utc::now().format("%Y%m%dT%H%M%S").to_string();
    let nonce: u16 = rand::rng().random_range(0..10_000);
    format!("{sanitized}-{timestamp}-{nonce:04}")
}

fn sanitize_run_id_component(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-').to_string();
    if trimmed.is_empty() {
        "run".to_string()
    } else {
        trimmed
    }
}
