//! Scenario records assembled from extracted allocations.

use serde::Serialize;

use crate::models::MpfFund;

/// Preview length in characters for the scenario excerpt
const PREVIEW_CHARS: usize = 150;

/// One (fund, percentage) pair inside a scenario.
///
/// Return and fee figures are copied out of the catalog record at
/// extraction time so a scenario stays self-contained even if the catalog
/// is reloaded later.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioAllocation {
    pub fund: MpfFund,
    /// Allocation in percent as stated by the model, not validated
    pub allocation: f64,
    pub return_1y: f64,
    pub return_5y: f64,
    pub fee_ratio: f64,
}

impl ScenarioAllocation {
    pub fn new(fund: &MpfFund, allocation: f64) -> Self {
        Self {
            fund: fund.clone(),
            allocation,
            return_1y: fund.return_1y,
            return_5y: fund.return_5y,
            fee_ratio: fund.fee_ratio,
        }
    }
}

/// One proposed portfolio extracted from a marked block of model output.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// 1-based position among all split segments, gaps allowed when
    /// intervening segments yielded no allocations
    pub index: usize,
    pub title: String,
    pub allocations: Vec<ScenarioAllocation>,
    /// Leading excerpt of the source segment, for chart tooltips
    pub preview: String,
    /// Allocation-weighted average fund expense ratio, percent
    pub weighted_fee_ratio: f64,
}

impl Scenario {
    /// Build a scenario from a segment and its non-empty allocation list.
    pub(crate) fn from_segment(
        index: usize,
        segment: &str,
        allocations: Vec<ScenarioAllocation>,
    ) -> Self {
        let weighted_fee_ratio = allocations
            .iter()
            .map(|a| a.fee_ratio * (a.allocation / 100.0))
            .sum();

        Self {
            index,
            title: format!("Scenario {}", index),
            preview: preview_of(segment),
            allocations,
            weighted_fee_ratio,
        }
    }
}

/// The scenarios found in one advisor reply, plus the reply verbatim.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub text: String,
    pub scenarios: Vec<Scenario>,
}

/// First 150 characters of the segment plus an ellipsis. Counted in chars,
/// not bytes, since segments routinely carry Chinese text.
fn preview_of(segment: &str) -> String {
    let mut preview: String = segment.chars().take(PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fund(name: &str, fee_ratio: f64) -> MpfFund {
        MpfFund {
            scheme_name: "Test Scheme".to_string(),
            name: name.to_string(),
            trustee: "Test".to_string(),
            fund_type: "Equity Fund".to_string(),
            launch_date: None,
            fund_size_m: 100.0,
            risk_class: 4,
            fee_ratio,
            return_1y: 5.0,
            return_3y: 12.0,
            return_5y: 20.0,
            return_2024: 4.0,
            return_2023: 3.0,
            return_2022: -8.0,
            return_2021: 2.0,
            return_2020: 6.0,
        }
    }

    #[test]
    fn test_allocation_snapshots_fund_figures() {
        let f = fund("Some Fund", 1.91);
        let allocation = ScenarioAllocation::new(&f, 35.0);

        assert_eq!(allocation.allocation, 35.0);
        assert_eq!(allocation.fee_ratio, 1.91);
        assert_eq!(allocation.return_1y, 5.0);
        assert_eq!(allocation.return_5y, 20.0);
    }

    #[test]
    fn test_weighted_fee_ratio() {
        let a = ScenarioAllocation::new(&fund("Fund A", 1.75), 40.0);
        let b = ScenarioAllocation::new(&fund("Fund B", 0.75), 60.0);

        let scenario = Scenario::from_segment(1, "some segment", vec![a, b]);

        // 0.4 * 1.75 + 0.6 * 0.75
        assert!((scenario.weighted_fee_ratio - 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_scenario_title_uses_index() {
        let a = ScenarioAllocation::new(&fund("Fund A", 1.0), 100.0);
        let scenario = Scenario::from_segment(3, "segment", vec![a]);

        assert_eq!(scenario.index, 3);
        assert_eq!(scenario.title, "Scenario 3");
    }

    #[test]
    fn test_preview_truncates_long_segments() {
        let segment = "x".repeat(400);
        let scenario = Scenario::from_segment(
            1,
            &segment,
            vec![ScenarioAllocation::new(&fund("Fund A", 1.0), 10.0)],
        );

        assert_eq!(scenario.preview.chars().count(), 153);
        assert!(scenario.preview.ends_with("..."));
    }

    #[test]
    fn test_preview_respects_multibyte_text() {
        let segment = "進取型組合：環球股票為主，長線增長。".repeat(20);
        let scenario = Scenario::from_segment(
            1,
            &segment,
            vec![ScenarioAllocation::new(&fund("Fund A", 1.0), 10.0)],
        );

        assert_eq!(scenario.preview.chars().count(), 153);
    }
}
