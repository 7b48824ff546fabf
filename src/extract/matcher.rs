//! Line-level allocation extraction.
//!
//! Each line of a scenario segment contributes at most one allocation: a
//! percentage literal plus the first catalog fund a matching strategy can
//! tie it to. Lines without a percentage, and percentages no strategy can
//! attribute, are dropped silently. Best-effort by contract.

use once_cell::sync::Lazy;
use regex::Regex;

use super::normalizer::simplified_name;
use super::scenario::ScenarioAllocation;
use crate::models::MpfFund;

/// Percentage literal like "40%" or "12.5%"
static PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)%").unwrap());

/// A line fragment counts as a name fragment only above this length, so
/// stray short tokens cannot reverse-match into long fund names.
const MIN_FRAGMENT_LEN: usize = 10;

/// Words of a fund name shorter than this are ignored by the keyword tier.
const MIN_KEYWORD_LEN: usize = 3;

/// Keywords that must appear in a line for the fuzzy tier to accept.
const MIN_KEYWORD_HITS: usize = 2;

// ============================================================================
// Matching strategies
// ============================================================================

/// The line quotes the full canonical fund name.
fn contains_full_name(line: &str, fund: &MpfFund) -> bool {
    line.contains(&fund.name)
}

/// The line is itself a truncated fragment of the fund name.
fn is_name_fragment(line: &str, fund: &MpfFund) -> bool {
    let trimmed = line.trim();
    trimmed.len() > MIN_FRAGMENT_LEN && fund.name.contains(trimmed)
}

/// At least two significant words of the fund name appear in the line.
fn has_keyword_overlap(line: &str, fund: &MpfFund) -> bool {
    fund.name
        .split_whitespace()
        .filter(|word| word.len() > MIN_KEYWORD_LEN && line.contains(word))
        .count()
        >= MIN_KEYWORD_HITS
}

/// The line quotes the simplified three-word key of the fund name.
fn contains_simplified_name(line: &str, fund: &MpfFund) -> bool {
    let key = simplified_name(&fund.name);
    !key.is_empty() && line.contains(&key)
}

/// Strategy chain in priority order. Strategies run strategy-major: a lower
/// tier is only consulted once no catalog fund satisfies any higher tier,
/// and within a tier the first fund in catalog order wins.
const STRATEGIES: [fn(&str, &MpfFund) -> bool; 4] = [
    contains_full_name,
    is_name_fragment,
    has_keyword_overlap,
    contains_simplified_name,
];

/// Resolve the fund a line refers to, if any.
pub(crate) fn resolve_fund<'a>(line: &str, funds: &'a [MpfFund]) -> Option<&'a MpfFund> {
    STRATEGIES
        .iter()
        .find_map(|strategy| funds.iter().find(|fund| strategy(line, fund)))
}

/// Extract the allocations mentioned in one scenario segment, in line order.
pub(crate) fn extract_allocations(segment: &str, funds: &[MpfFund]) -> Vec<ScenarioAllocation> {
    let mut allocations = Vec::new();

    for line in segment.lines() {
        let Some(caps) = PERCENT.captures(line) else {
            continue;
        };
        let Ok(percent) = caps[1].parse::<f64>() else {
            continue;
        };

        if let Some(fund) = resolve_fund(line, funds) {
            allocations.push(ScenarioAllocation::new(fund, percent));
        }
    }

    allocations
}
