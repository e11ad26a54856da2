use anyhow::Context;
use clap::Parser;
use college_finder::core::normalizer::{self, ValidationPolicy};
use college_finder::core::query::QueryBuilder;
use college_finder::core::ModelClient;
use college_finder::utils::{logger, validation::Validate};
use college_finder::{CliConfig, GeminiClient};

/// 送出單一 prompt 並顯示模型原始輸出與兩種整理策略的結果，用來檢查 prompt 是否仍有效
#[derive(Parser)]
#[command(name = "model-probe")]
#[command(about = "Send one college prompt to the model and inspect the raw output")]
struct Args {
    #[command(flatten)]
    cli: CliConfig,

    /// Send the short fallback prompt instead of the primary one
    #[arg(long)]
    fallback: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.cli.verbose);

    let config = args.cli.resolve()?;
    config.validate()?;

    let location = args
        .cli
        .location_request()?
        .context("pass a location to probe")?;

    let queries = QueryBuilder::new();
    let prompt = if args.fallback {
        queries.fallback_prompt(&location)
    } else {
        queries.primary_prompt(&location)
    };

    println!(
        "🚀 Probing {} with the {} prompt",
        config.model,
        if args.fallback { "fallback" } else { "primary" }
    );
    println!("📋 Prompt ({} chars):\n{}\n", prompt.len(), prompt);

    let client = GeminiClient::from_config(&config)?;
    client.ensure_ready()?;
    let raw = client.generate(&prompt).await?;
    println!("📥 Raw output ({} chars):\n{}\n", raw.len(), raw);

    match normalizer::extract_array(&raw) {
        Ok(items) => println!("✅ Extracted a JSON array with {} entries", items.len()),
        Err(e) => println!("❌ {}", e),
    }

    for policy in [ValidationPolicy::DropInvalid, ValidationPolicy::FillDefaults] {
        match normalizer::normalize(&raw, policy, &location) {
            Ok(colleges) => println!("📊 {:?}: {} colleges", policy, colleges.len()),
            Err(e) => println!("📊 {:?}: {}", policy, e),
        }
    }

    Ok(())
}
