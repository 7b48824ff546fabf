//! System prompt construction for the MPF advisor chat.

use crate::models::MpfFund;

/// Number of catalog funds embedded in the system prompt
const CONTEXT_FUND_LIMIT: usize = 30;

/// Render the fund-context block: one compact line per fund.
fn build_fund_context(funds: &[MpfFund]) -> String {
    funds
        .iter()
        .take(CONTEXT_FUND_LIMIT)
        .map(|f| {
            format!(
                "{} ({}): 1Y={}%, 5Y={}%, FER={}%, Risk={}",
                f.name, f.trustee, f.return_1y, f.return_5y, f.fee_ratio, f.risk_class
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the advisor system prompt with the fund catalog as context.
///
/// The prompt asks for "Scenario N"-labelled portfolios with one fund and
/// one explicit percentage per line. That shape is what the extraction
/// engine is tuned for, but nothing downstream relies on the model
/// actually complying.
pub fn build_advisor_system_prompt(funds: &[MpfFund]) -> String {
    format!(
        r#"You are a professional Hong Kong MPF investment advisor.
Data provided:
{}

Instructions:
- Provide optimization recommendations.
- If recommending a portfolio, break it down into "Scenarios" (e.g., Scenario 1: Aggressive).
- For each scenario, list specific funds and their allocation percentages clearly (e.g., "Manulife MPF Core Accumulation Fund (40%)").
- Mention the expected 1Y return and FER for the scenario.
- Support English and Traditional Chinese."#,
        build_fund_context(funds)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fund(name: &str) -> MpfFund {
        MpfFund {
            scheme_name: "Scheme".to_string(),
            name: name.to_string(),
            trustee: "Trustee".to_string(),
            fund_type: "Equity Fund".to_string(),
            launch_date: None,
            fund_size_m: 100.0,
            risk_class: 5,
            fee_ratio: 0.75,
            return_1y: 9.5,
            return_3y: 35.0,
            return_5y: 65.0,
            return_2024: 5.9,
            return_2023: 14.8,
            return_2022: -12.5,
            return_2021: 8.2,
            return_2020: 10.5,
        }
    }

    #[test]
    fn test_fund_context_line_format() {
        let funds = vec![fund("Manulife MPF Core Accumulation Fund")];
        let context = build_fund_context(&funds);
        assert_eq!(
            context,
            "Manulife MPF Core Accumulation Fund (Trustee): 1Y=9.5%, 5Y=65%, FER=0.75%, Risk=5"
        );
    }

    #[test]
    fn test_fund_context_is_capped() {
        let funds: Vec<MpfFund> = (0..40).map(|i| fund(&format!("Fund {}", i))).collect();
        let context = build_fund_context(&funds);
        assert_eq!(context.lines().count(), CONTEXT_FUND_LIMIT);
    }

    #[test]
    fn test_system_prompt_mentions_scenario_format() {
        let prompt = build_advisor_system_prompt(&[fund("Some Fund")]);
        assert!(prompt.contains("Scenario 1: Aggressive"));
        assert!(prompt.contains("Some Fund"));
        assert!(prompt.contains("Traditional Chinese"));
    }
}
