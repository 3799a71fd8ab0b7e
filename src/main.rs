use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use tipbot::config::BotConfig;
use tipbot::domain::asset::Asset;
use tipbot::domain::policy::{balance_warnings, check_limit};
use tipbot::domain::ports::ChainServiceBox;
use tipbot::infrastructure::rpc::estimate_transfer_fee;
use tipbot::infrastructure::simulated::SimulatedAssetHub;
use tipbot::interfaces::comment::CommentParser;

/// Dry-run a tip command against a simulated ledger.
///
/// Exercises the same parsing, limit and conversion path as the bot
/// without touching GitHub or the network. Useful for debugging command
/// syntax and limit configuration.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Full tip command, e.g. "@tipbot tip <address> <amount> <asset> [note]"
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if cli.command.is_empty() {
        return Err(miette!(
            "usage: tipbot \"@tipbot tip <address> <amount> <asset> [note]\""
        ));
    }
    let command = cli.command.join(" ");

    let config = BotConfig::from_env().into_diagnostic()?;

    let request = CommentParser::parse(&command).into_diagnostic()?;
    println!("Parsed tip command:");
    println!("  Recipient: {}", request.recipient);
    println!("  Amount:    {} {}", request.amount, request.asset);
    println!("  Note:      {}", request.note.as_deref().unwrap_or("none"));

    check_limit(&config.chain.limits, request.asset, request.amount).into_diagnostic()?;

    let fee = estimate_transfer_fee(request.asset);
    println!("Estimated fee: {fee} smallest units of {}", request.asset);

    // The live Asset Hub backend needs an external RPC capability, so the
    // CLI always injects the simulated ledger.
    let chain: ChainServiceBox = Box::new(SimulatedAssetHub::new());

    let snapshot = chain.check_balance().await;
    if snapshot.success {
        let dot = Asset::Dot.from_smallest_unit(snapshot.dot);
        let usdc = Asset::Usdc.from_smallest_unit(snapshot.usdc);
        println!("Wallet balance: {dot} DOT, {usdc} USDC");

        let available = match request.asset {
            Asset::Dot => dot,
            Asset::Usdc => usdc,
        };
        if available < request.amount {
            return Err(miette!(
                "insufficient {} balance: need {}, have {available}",
                request.asset,
                request.amount
            ));
        }
    }

    println!("Sending (simulated)...");
    let outcome = chain.send_tip(&request).await;

    if !outcome.success {
        chain.disconnect().await.into_diagnostic()?;
        return Err(miette!(
            "transaction failed: {}",
            outcome.error.unwrap_or_default()
        ));
    }

    println!("Tip sent successfully!");
    if let Some(hash) = &outcome.tx_hash {
        println!("  Transaction hash: {hash}");
    }
    if let Some(block) = &outcome.block_hash {
        println!("  Block hash:       {block}");
    }
    if let Some(url) = &outcome.explorer_url {
        println!("  Explorer:         {url}");
    }

    for warning in balance_warnings(&snapshot, &config.chain.limits) {
        eprintln!(
            "WARNING: {} balance {} is below the replenishment threshold of {}",
            warning.asset, warning.current_balance, warning.threshold
        );
    }

    chain.disconnect().await.into_diagnostic()?;
    Ok(())
}
