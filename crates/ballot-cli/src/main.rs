//! Ballot CLI - command-line client for ballot ledger nodes.
//!
//! Reads `RPC_ENDPOINT_URL` and `PRIVATE_KEY` from the environment or a
//! `.env` file in the working directory.

pub mod commands;
pub mod config;
pub mod output;
pub mod rpc_client;

#[cfg(test)]
mod tests;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = commands::Cli::parse();

    if let Err(e) = commands::execute(cli).await {
        output::print_error(&format!("Error: {}", e));
        std::process::exit(1);
    }

    Ok(())
}
