//! Scenario extraction from advisor replies.
//!
//! The chat model is asked to present portfolio suggestions as marked
//! blocks ("Scenario 1", "Option B", "方案 2") with one fund and one
//! percentage per line, but nothing about its output is guaranteed. This
//! module recovers whatever structure is present: split on markers, scan
//! each block line by line for percentages, tie each percentage to a
//! catalog fund, and derive per-scenario metrics for the charts.
//!
//! The whole pipeline is a pure function of the reply text and the fund
//! catalog. It performs no I/O, keeps no state between calls and never
//! fails: unusable input just yields fewer scenarios.

mod matcher;
mod normalizer;
mod scenario;
mod segmenter;

pub use normalizer::simplified_name;
pub use scenario::{ExtractionResult, Scenario, ScenarioAllocation};

use crate::models::MpfFund;
use matcher::extract_allocations;
use segmenter::split_into_segments;

/// Extract the portfolio scenarios mentioned in an advisor reply.
///
/// Segment 0 (the prose before the first marker) never becomes a
/// scenario. Every later segment keeps its 1-based split index, so
/// scenario numbering matches the reply even when a block in the middle
/// yields no allocations and is dropped.
pub fn extract_scenarios(response_text: &str, funds: &[MpfFund]) -> ExtractionResult {
    let segments = split_into_segments(response_text);
    let mut scenarios = Vec::new();

    for (index, segment) in segments.iter().enumerate().skip(1) {
        let allocations = extract_allocations(segment, funds);
        if allocations.is_empty() {
            log::debug!("Segment {} yielded no allocations, dropping", index);
            continue;
        }
        scenarios.push(Scenario::from_segment(index, segment, allocations));
    }

    ExtractionResult {
        text: response_text.to_string(),
        scenarios,
    }
}
