//! Reduces canonical fund names to short comparison keys.

use once_cell::sync::Lazy;
use regex::Regex;

/// Boilerplate stripped from fund names before keying: the generic "MPF"
/// and "Fund" tokens plus parenthetical scheme annotations like "(DIS)".
static BOILERPLATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)MPF|Fund|\([^)]*\)").unwrap());

/// Build a short matchable key from a canonical fund name: strip
/// boilerplate, then keep the first three remaining words.
///
/// The key is a matching heuristic, not an identifier. Distinct funds can
/// collide on it, which is acceptable for its role as a last-resort
/// matching tier.
pub fn simplified_name(name: &str) -> String {
    let stripped = BOILERPLATE.replace_all(name, "");
    stripped
        .split_whitespace()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_mpf_and_fund_tokens() {
        assert_eq!(
            simplified_name("Manulife MPF Core Accumulation Fund"),
            "Manulife Core Accumulation"
        );
    }

    #[test]
    fn test_strips_parenthetical_annotations() {
        assert_eq!(
            simplified_name("BCT (Industry) Asian Equity Fund"),
            "BCT Asian Equity"
        );
    }

    #[test]
    fn test_truncates_to_three_words() {
        assert_eq!(
            simplified_name("Hong Kong and China Fund"),
            "Hong Kong and"
        );
    }

    #[test]
    fn test_short_names_survive_unchanged() {
        assert_eq!(simplified_name("American Fund"), "American");
    }

    #[test]
    fn test_all_boilerplate_yields_empty_key() {
        assert_eq!(simplified_name("MPF Fund (DIS)"), "");
    }
}
