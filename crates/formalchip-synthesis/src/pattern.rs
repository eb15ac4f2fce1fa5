//! The regex layer behind a trait, so a future grammar-based matcher can
//! replace it without touching candidate assembly, dedup, or serialisation.

use once_cell::sync::Lazy;
use regex::Regex;

/// A parsed text-clause match: what to assert and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseMatch {
    /// `if X then Y next cycle` -> `X |=> Y;`
    IfThenNextCycle { antecedent: String, consequent: String },
    /// `never X and Y` -> `!(X && Y);`
    NeverBoth { left: String, right: String },
    /// `X … within N cycles … Y` -> `X |-> ##[0:N] Y;`
    WithinCycles {
        antecedent: String,
        cycles: u32,
        consequent: String,
    },
    /// `X should be low|high right after reset`
    LevelAfterReset { signal: String, high: bool },
}

/// Matches lowercased clause text against the four recognised phrasings.
pub trait ClausePatternMatcher {
    fn match_clause(&self, lowercased_text: &str) -> Option<ClauseMatch>;
}

static IF_THEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^if (.+?) then (.+?) next cycle\.?$").unwrap());
static NEVER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^never (.+?) and (.+?)\.?$").unwrap());
static WITHIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s+within\s+(\d+)\s+cycles?\s*,?\s*(?:then\s+)?(.+?)\.?$").unwrap()
});
static AFTER_RESET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s+should be (low|high) right after reset\.?$").unwrap()
});

/// The default, regex-backed matcher.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexPatternMatcher;

impl ClausePatternMatcher for RegexPatternMatcher {
    fn match_clause(&self, lowercased_text: &str) -> Option<ClauseMatch> {
        if let Some(caps) = IF_THEN_RE.captures(lowercased_text) {
            return Some(ClauseMatch::IfThenNextCycle {
                antecedent: caps[1].trim().to_string(),
                consequent: caps[2].trim().to_string(),
            });
        }
        if let Some(caps) = NEVER_RE.captures(lowercased_text) {
            return Some(ClauseMatch::NeverBoth {
                left: caps[1].trim().to_string(),
                right: caps[2].trim().to_string(),
            });
        }
        if let Some(caps) = WITHIN_RE.captures(lowercased_text) {
            if let Ok(cycles) = caps[2].parse::<u32>() {
                return Some(ClauseMatch::WithinCycles {
                    antecedent: caps[1].trim().to_string(),
                    cycles,
                    consequent: caps[3].trim().to_string(),
                });
            }
        }
        if let Some(caps) = AFTER_RESET_RE.captures(lowercased_text) {
            return Some(ClauseMatch::LevelAfterReset {
                signal: caps[1].trim().to_string(),
                high: &caps[2] == "high",
            });
        }
        None
    }
}
