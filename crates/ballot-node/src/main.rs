//! Ballot Node - hosts ballot ledgers behind a JSON-RPC API.

pub mod config;
pub mod node;
pub mod telemetry;

use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "ballot-node")]
#[command(about = "Ballot ledger host with a JSON-RPC API")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Config file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// RPC listen address (overrides the config file)
    #[arg(long, value_name = "ADDR")]
    rpc_addr: Option<std::net::SocketAddr>,

    /// RPC HTTP port (overrides the config file)
    #[arg(long)]
    rpc_port: Option<u16>,

    /// Chain ID
    #[arg(long)]
    chain_id: Option<u64>,

    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,

    /// Log level
    #[arg(short, long, env = "BALLOT_LOG")]
    log_level: Option<String>,

    /// Emit JSON logs
    #[arg(long)]
    json_logs: bool,

    /// Append logs to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut config::NodeConfig) {
        if let Some(addr) = self.rpc_addr {
            config.rpc.http_addr = addr;
        }
        if let Some(port) = self.rpc_port {
            config.rpc.http_addr.set_port(port);
        }
        if let Some(chain_id) = self.chain_id {
            config.host.chain_id = chain_id;
        }
        if self.no_cors {
            config.rpc.cors = false;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.json_logs {
            config.logging.json = true;
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::NodeConfig::from_file(path)?,
        None => config::NodeConfig::default(),
    };
    args.apply(&mut config);

    telemetry::init(&config.logging)?;
    config.validate()?;

    if !config.logging.json && config.logging.file.is_none() {
        print_banner();
    }

    match &args.config {
        Some(path) => info!("Loaded configuration from: {:?}", path),
        None => info!("Using default configuration"),
    }
    info!("Configuration:");
    info!("  Chain ID: {}", config.host.chain_id);
    info!("  RPC address: {}", config.rpc.http_addr);
    info!("  CORS: {}", config.rpc.cors);

    let (mut node, _shutdown) = node::BallotNode::new(config);

    if let Err(e) = node.start().await {
        error!("Failed to start node: {}", e);
        return Err(e);
    }

    if let Err(e) = node.run().await {
        error!("Node error: {}", e);
        return Err(e);
    }

    info!("Ballot node shutdown complete");
    Ok(())
}

fn print_banner() {
    println!();
    println!("  ballot-node {}", env!("CARGO_PKG_VERSION"));
    println!("  weighted, delegable plurality voting");
    println!();
}
