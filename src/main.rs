//! CLI entry point.
//!
//! With a NIP argument that reduces to 10 digits: single-shot mode,
//! exactly one JSON line on stdout and a zero exit whatever happens —
//! the embedding caller inspects the payload, never the exit code.
//! Otherwise: interactive mode, prompting for a NIP and printing a
//! human-readable block per match.

use std::io::{self, Write};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use regon_lookup::{error_json, BestMatch, BirClient, BirConfig, BirError, NO_DATA_MESSAGE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so single-shot stdout stays one JSON line.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = BirConfig::from_env();

    if let Some(arg) = std::env::args().nth(1) {
        let digits: String = arg.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() == 10 {
            single_shot(config, &digits).await;
            return Ok(());
        }
    }

    interactive(config).await
}

/// Embedded mode: every outcome, errors included, becomes one JSON line
/// on stdout.
async fn single_shot(config: BirConfig, nip: &str) {
    let line = match query(config, nip).await {
        Ok(Some(best)) => serde_json::to_string(&best)
            .unwrap_or_else(|err| error_json(&err.to_string()).to_string()),
        Ok(None) => error_json(NO_DATA_MESSAGE).to_string(),
        Err(err) => error_json(&err.to_string()).to_string(),
    };
    println!("{line}");
}

async fn query(config: BirConfig, nip: &str) -> Result<Option<BestMatch>, BirError> {
    let client = BirClient::new(config)?;
    let entities = client.search_by_nip(nip).await?;
    Ok(entities.first().map(BestMatch::from_entity))
}

async fn interactive(config: BirConfig) -> anyhow::Result<()> {
    print!("Podaj NIP (bez kresek): ");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut raw = String::new();
    io::stdin()
        .read_line(&mut raw)
        .context("failed to read NIP from stdin")?;

    let client = BirClient::new(config)?;
    let entities = client.search_by_nip(raw.trim()).await?;

    if entities.is_empty() {
        println!("{NO_DATA_MESSAGE}");
        return Ok(());
    }

    println!("\nZnalezione podmioty:\n");
    for (i, entity) in entities.iter().enumerate() {
        println!("=== Podmiot {} ===", i + 1);
        println!("{}", indent(&entity.pretty()));
        println!();
    }

    Ok(())
}

/// Two-space indent for the interactive block layout.
fn indent(block: &str) -> String {
    block
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
