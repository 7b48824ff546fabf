//! Splits an advisor reply into per-scenario text segments.

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker that opens a scenario block: "Scenario 1", "Option B", "方案 2",
/// case-insensitive, label and trailing separator optional.
static SCENARIO_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i:scenario|option|方案)\s*(?:\d+|[A-C])?\s*[:\-]?").unwrap());

/// Split a reply at every scenario marker, discarding the markers.
///
/// The returned vector always starts with the text preceding the first
/// marker (the intro prose, possibly empty); segment indices therefore line
/// up with the 1-based scenario numbering downstream. A marker at the very
/// end of the text still yields a trailing (empty) segment. Without any
/// marker the whole text comes back as a single intro segment.
pub fn split_into_segments(text: &str) -> Vec<String> {
    SCENARIO_MARKER.split(text).map(str::to_string).collect()
}
