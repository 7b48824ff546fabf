//! Check binary: one-shot advisor chat against the Moonshot API.
//!
//! Run with: MOONSHOT_API_KEY=sk-... cargo run --bin advisor_chat "your question"

use anyhow::{anyhow, Result};

use mpf_advisor::ai::{moonshot, ChatMessage};
use mpf_advisor::{catalog, extract_scenarios};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let question = std::env::args().nth(1).unwrap_or_else(|| {
        "Suggest a growth-oriented MPF portfolio with low fees.".to_string()
    });
    let api_key = std::env::var("MOONSHOT_API_KEY")
        .map_err(|_| anyhow!("MOONSHOT_API_KEY is not set"))?;

    let funds = catalog::load_funds();
    let history = vec![ChatMessage::user(&question)];

    println!("=== Advisor Chat Check ===\n");
    println!("Question: {}\n", question);

    let reply = moonshot::chat(moonshot::DEFAULT_MODEL, &api_key, &history, &funds)
        .await
        .map_err(|e| anyhow!("{}", e))?;

    println!("{}\n", reply.response);
    if let Some(tokens) = reply.tokens_used {
        println!("({} tokens, model {})", tokens, reply.model);
    }

    let result = extract_scenarios(&reply.response, &funds);
    println!(
        "\nExtracted {} scenario(s): {}",
        result.scenarios.len(),
        result
            .scenarios
            .iter()
            .map(|s| s.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}
