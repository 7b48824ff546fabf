//! Check binary: run scenario extraction over a saved advisor reply.
//!
//! Run with: cargo run --bin extract_check [reply.txt]
//! Reads the reply from the given file, or from stdin when no file is given.

use anyhow::Result;
use std::io::Read;

use mpf_advisor::{catalog, extract_scenarios};

fn main() -> Result<()> {
    env_logger::init();

    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let funds = catalog::load_funds();
    println!("=== Scenario Extraction Check ===\n");
    println!("Catalog: {} funds", funds.len());
    println!("Reply: {} chars\n", text.chars().count());

    let result = extract_scenarios(&text, &funds);

    if result.scenarios.is_empty() {
        println!("No scenarios detected.");
        return Ok(());
    }

    for scenario in &result.scenarios {
        println!("{} (weighted FER {:.2}%)", scenario.title, scenario.weighted_fee_ratio);
        for allocation in &scenario.allocations {
            println!(
                "  {:5.1}%  {} (1Y {}%, 5Y {}%, FER {}%)",
                allocation.allocation,
                allocation.fund.name,
                allocation.return_1y,
                allocation.return_5y,
                allocation.fee_ratio
            );
        }
        println!();
    }

    println!("--- JSON ---");
    println!("{}", serde_json::to_string_pretty(&result.scenarios)?);

    Ok(())
}
