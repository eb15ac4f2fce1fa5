//! Universal SVA-text helpers shared by every clause and library rule.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

#[must_use]
pub fn clocking(clk: &str) -> String {
    format!("posedge {clk}")
}

#[must_use]
pub fn reset_disable(reset: &str, active_low: bool) -> String {
    if active_low {
        format!("disable iff(!{reset})")
    } else {
        format!("disable iff({reset})")
    }
}

#[must_use]
pub fn reset_asserted(reset: &str, active_low: bool) -> String {
    if active_low {
        format!("!{reset}")
    } else {
        reset.to_string()
    }
}

/// Render a literal as a sized SystemVerilog constant: `0x…` becomes
/// `W'h…`, a bare decimal becomes `W'd…`, and anything already containing
/// `'` (already sized) passes through untouched.
#[must_use]
pub fn const_sv(value: &str, width: u32) -> String {
    let trimmed = value.trim();
    if trimmed.contains('\'') {
        return trimmed.to_string();
    }
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        return format!("{width}'h{hex}");
    }
    format!("{width}'d{trimmed}")
}

/// Render a register address as a zero-padded sized hex constant, e.g.
/// address `0` at `sw_addr_width=32` becomes `32'h00000000`. Unlike
/// [`const_sv`] (which passes a literal's own digit count through
/// unchanged), address comparisons always render the full bus width so
/// the comparison reads unambiguously regardless of how few digits the
/// source address happened to be written with.
#[must_use]
pub fn const_sv_address(value: i64, width: u32) -> String {
    let nibbles = width.div_ceil(4) as usize;
    format!("{width}'h{value:0nibbles$x}")
}

/// Sanitise a free-form string into a legal SV identifier.
#[must_use]
pub fn sanitize_id(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let trimmed = replaced.trim_matches('_');
    if trimmed.is_empty() {
        return "unnamed".to_string();
    }
    let prefixed = if trimmed.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("p_{trimmed}")
    } else {
        trimmed.to_string()
    };
    prefixed.to_ascii_lowercase()
}

static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").unwrap());

/// Substitute every identifier token in `expr` with its alias, if one is
/// configured. Lookup order is exact, then lowercase, then uppercase.
#[must_use]
pub fn apply_aliases(expr: &str, aliases: &BTreeMap<String, String>) -> String {
    IDENTIFIER_RE
        .replace_all(expr, |caps: &regex::Captures| {
            let token = &caps[0];
            resolve_alias(token, aliases).unwrap_or_else(|| token.to_string())
        })
        .into_owned()
}

fn resolve_alias(token: &str, aliases: &BTreeMap<String, String>) -> Option<String> {
    if let Some(v) = aliases.get(token) {
        return Some(v.clone());
    }
    let lower = token.to_ascii_lowercase();
    if let Some(v) = aliases.get(&lower) {
        return Some(v.clone());
    }
    let upper = token.to_ascii_uppercase();
    aliases.get(&upper).cloned()
}

const SV_KEYWORDS: &[&str] = &[
    "module", "endmodule", "input", "output", "inout", "wire", "reg", "logic", "assign",
    "always", "always_ff", "always_comb", "posedge", "negedge", "if", "else", "begin", "end",
    "property", "endproperty", "assert", "assume", "cover", "disable", "iff", "and", "or",
    "not", "xor", "within", "throughout", "until", "intersect", "first_match", "true", "false",
];

const SV_SYSTEM_FUNCS: &[&str] = &[
    "past", "rose", "fell", "stable", "changed", "sampled", "countones", "onehot", "onehot0",
    "isunknown",
];

static NUMERIC_TAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[dhbo][0-9a-fxz_]+$").unwrap());

/// Tokenise an expression into the set of real signal identifiers it
/// references, dropping SV keywords, system-task names, and the digit
/// tails of sized literals (e.g. the `h0f` in `8'h0f`).
#[must_use]
pub fn extract_identifiers(expr: &str) -> BTreeSet<String> {
    IDENTIFIER_RE
        .find_iter(expr)
        .map(|m| m.as_str())
        .filter(|tok| !SV_KEYWORDS.contains(tok))
        .filter(|tok| !SV_SYSTEM_FUNCS.contains(tok))
        .filter(|tok| !NUMERIC_TAIL_RE.is_match(tok))
        .map(str::to_string)
        .collect()
}
