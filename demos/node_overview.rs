//! Example: Query a Cosmos node for an overview of its chain.
//!
//! Run with: cargo run --example node_overview [config.toml]
//!
//! Without a config file, a local node (REST on 1317, RPC on 26657) is queried.
//! Set `RUST_LOG=cosmos_query_client=debug` to see every request.

use std::path::Path;

use cosmos_query_client::{ClientConfig, CosmosQueryClient, ProposalStatus};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ClientConfig::load(Path::new(&path))?,
        None => ClientConfig::local("stake"),
    };
    let client = CosmosQueryClient::with_config(config);

    println!("=== Cosmos node overview ===\n");

    // 1. Node status
    println!("1. Fetching node status...");
    let status = client.status().await?;
    let result = &status["result"];
    println!("   Network: {}", result["node_info"]["network"]);
    println!("   Moniker: {}", result["node_info"]["moniker"]);
    println!(
        "   Latest block height: {}",
        result["sync_info"]["latest_block_height"]
    );
    println!("   Catching up: {}", result["sync_info"]["catching_up"]);
    println!();

    // 2. Supply of the default denomination
    println!("2. Fetching supply of the default denomination...");
    let supply = client.supply_by_denom(None).await?;
    println!(
        "   Supply: {} {}",
        supply["amount"]["amount"], supply["amount"]["denom"]
    );
    println!();

    // 3. Validators (all pages)
    println!("3. Fetching validators...");
    let validators = client.validators().await?;
    println!("   Validators: {}", validators.len());
    if let Some(first) = validators.first() {
        println!(
            "   First validator: {} (tokens: {})",
            first["description"]["moniker"], first["tokens"]
        );
    }
    println!();

    // 4. Proposals in voting period
    println!("4. Fetching proposals in voting period...");
    let proposals = client.proposals(Some(ProposalStatus::VotingPeriod)).await?;
    println!("   Proposals: {}", proposals.len());

    println!("\n=== Done! ===");
    Ok(())
}
