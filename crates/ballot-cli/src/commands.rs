//! CLI command implementations.
//!
//! Each write command signs one ledger call with the configured key,
//! submits it and waits for its receipt. Read commands go straight to the
//! node's query methods.

use std::str::FromStr;
use std::time::Duration;

use ballot_crypto::Keypair;
use ballot_types::{Address, Hash, LedgerCall, ProposalName, Transaction, TransactionReceipt};
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::config::CliConfig;
use crate::output::*;
use crate::rpc_client::RpcClient;

/// Main CLI.
#[derive(Parser, Debug)]
#[command(name = "ballot")]
#[command(about = "Ballot ledger CLI")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// RPC endpoint URL
    #[arg(short, long, global = true, env = "RPC_ENDPOINT_URL")]
    pub rpc: Option<String>,

    /// Hex-encoded 32-byte signing key
    #[arg(long, global = true, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Chain ID to sign for
    #[arg(long, global = true)]
    pub chain_id: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy a new ballot with the given proposal names
    Deploy {
        /// Proposal names, in index order
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Give an account the right to vote (chairperson only)
    GiveRight {
        /// Ballot ledger address
        ledger: String,
        /// Voter address
        voter: String,
    },

    /// Delegate your vote to another account
    Delegate {
        /// Ballot ledger address
        ledger: String,
        /// Delegate address
        to: String,
    },

    /// Vote for a proposal by index
    Vote {
        /// Ballot ledger address
        ledger: String,
        /// Proposal index
        proposal: u32,
    },

    /// Show vote counts and the current winner
    Results {
        /// Ballot ledger address
        ledger: String,
    },

    /// Show a single proposal
    Proposal {
        /// Ballot ledger address
        ledger: String,
        /// Proposal index
        index: u32,
    },

    /// Show a voter's state
    Voter {
        /// Ballot ledger address
        ledger: String,
        /// Voter address
        address: String,
    },

    /// Show a transaction receipt
    Receipt {
        /// Transaction hash
        hash: String,
    },

    /// Show the signing account and its nonce
    Account,

    /// Generate a fresh signing key
    Keygen,

    /// Node status
    Status,

    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Config commands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Key (rpc_url, chain_id, confirm_timeout_secs)
        key: String,
        /// Value
        value: String,
    },
}

/// Execute a command with the configuration from `~/.ballot`.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load()?;
    run(cli, config).await
}

/// Execute a command against an explicit configuration.
pub async fn run(cli: Cli, config: CliConfig) -> anyhow::Result<()> {
    let rpc_url = cli.rpc.clone().unwrap_or_else(|| config.rpc_url.clone());
    let client = RpcClient::new(rpc_url);
    let signer = Signer {
        private_key: cli.private_key.clone(),
        chain_id: cli.chain_id.or(config.chain_id),
        timeout: Duration::from_secs(config.confirm_timeout_secs),
    };

    match cli.command {
        Commands::Deploy { names } => {
            deploy(&client, &signer, &names).await?;
        }
        Commands::GiveRight { ledger, voter } => {
            let ledger = parse_address(&ledger)?;
            let voter = parse_address(&voter)?;
            let receipt = signer
                .submit(&client, Some(ledger), LedgerCall::GiveRightToVote { voter })
                .await?;
            print_success(&format!("Gave {} the right to vote", voter));
            print_info(&format!("transaction hash {}", receipt.transaction_hash));
        }
        Commands::Delegate { ledger, to } => {
            let ledger = parse_address(&ledger)?;
            let to = parse_address(&to)?;
            let receipt = signer
                .submit(&client, Some(ledger), LedgerCall::Delegate { to })
                .await?;
            print_success(&format!("Delegated to {}", to));
            print_info(&format!("transaction hash {}", receipt.transaction_hash));
        }
        Commands::Vote { ledger, proposal } => {
            let ledger = parse_address(&ledger)?;
            let receipt = signer
                .submit(&client, Some(ledger), LedgerCall::Vote { proposal })
                .await?;
            print_success(&format!("Voted for proposal {}", proposal));
            print_info(&format!("transaction hash {}", receipt.transaction_hash));
        }
        Commands::Results { ledger } => {
            let ledger = parse_address(&ledger)?;
            let proposals = client.proposals(&ledger).await?;
            if proposals.is_empty() {
                print_warning("Ballot has no proposals");
                return Ok(());
            }
            let winner = client.winning_proposal(&ledger).await?;
            println!("{}", proposals_table(&proposals, Some(winner)));
            let name = client.winner_name(&ledger).await?;
            println!("Winner: {}", name.name.bright_green().bold());
        }
        Commands::Proposal { ledger, index } => {
            let ledger = parse_address(&ledger)?;
            let proposal = client.proposal(&ledger, index).await?;
            println!("Name:  {}", proposal.name.bright_cyan());
            println!("Hex:   {}", proposal.name_hex);
            println!("Votes: {}", proposal.vote_count.to_string().bright_green());
        }
        Commands::Voter { ledger, address } => {
            let ledger = parse_address(&ledger)?;
            let address = parse_address(&address)?;
            let voter = client.voter(&ledger, &address).await?;
            print_voter(&address, &voter);
        }
        Commands::Receipt { hash } => {
            let hash = Hash::from_str(&hash)
                .map_err(|e| anyhow::anyhow!("Invalid transaction hash: {}", e))?;
            match client.receipt(&hash).await? {
                Some(receipt) => print_transaction_receipt(&receipt),
                None => print_warning("Receipt not found"),
            }
        }
        Commands::Account => {
            let keypair = signer.keypair()?;
            let address = keypair.address();
            let nonce = client.nonce(&address).await?;
            println!("Address: {}", address.to_string().bright_cyan());
            println!("Nonce:   {}", nonce.to_string().bright_green());
        }
        Commands::Keygen => {
            let keypair = Keypair::generate();
            println!("Address:     {}", keypair.address().to_string().bright_cyan());
            println!("Private key: {}", hex::encode(keypair.to_bytes()));
            print_warning("Store the private key safely; anyone holding it can vote as this account");
        }
        Commands::Status => {
            let health = client.health().await?;
            let chain_id = client.chain_id().await?;
            println!("{}", "Node Status".bold());
            println!("{}", "=".repeat(50));
            println!("RPC:          {}", client.url().bright_cyan());
            println!("Chain ID:     {}", chain_id.to_string().bright_green());
            println!("Ledgers:      {}", health["ledgers"]);
            println!("Block Number: {}", health["blockNumber"]);
        }
        Commands::Config(cmd) => execute_config(cmd, config)?,
    }

    Ok(())
}

/// Signing context shared by the write commands.
struct Signer {
    private_key: Option<String>,
    chain_id: Option<u64>,
    timeout: Duration,
}

impl Signer {
    fn keypair(&self) -> anyhow::Result<Keypair> {
        let key = self.private_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!("No signing key: pass --private-key or set PRIVATE_KEY")
        })?;
        Ok(Keypair::from_hex(key)?)
    }

    async fn chain_id(&self, client: &RpcClient) -> anyhow::Result<u64> {
        match self.chain_id {
            Some(id) => Ok(id),
            None => client.chain_id().await,
        }
    }

    /// Sign, send and wait for the receipt of one ledger call.
    async fn submit(
        &self,
        client: &RpcClient,
        to: Option<Address>,
        call: LedgerCall,
    ) -> anyhow::Result<TransactionReceipt> {
        let keypair = self.keypair()?;
        let chain_id = self.chain_id(client).await?;
        let nonce = client.nonce(&keypair.address()).await?;

        let signed = keypair.sign_transaction(Transaction::new(chain_id, nonce, to, call));
        let hash = client.send_transaction(&signed).await?;
        client.wait_for_receipt(&hash, self.timeout).await
    }
}

async fn deploy(
    client: &RpcClient,
    signer: &Signer,
    names: &[String],
) -> anyhow::Result<Address> {
    let proposals = names
        .iter()
        .map(|name| ProposalName::encode(name))
        .collect::<Result<Vec<_>, _>>()?;

    let keypair = signer.keypair()?;
    println!("Deploying with address {}", keypair.address().to_string().bright_cyan());

    let receipt = signer
        .submit(client, None, LedgerCall::Deploy { proposals })
        .await?;
    let ledger = receipt
        .ledger_address
        .ok_or_else(|| anyhow::anyhow!("Receipt carries no ledger address"))?;

    print_success(&format!("contract deployed at address {}", ledger));
    print_info(&format!("transaction hash {}", receipt.transaction_hash));
    Ok(ledger)
}

fn execute_config(cmd: ConfigCommands, mut config: CliConfig) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let chain_id = config
                .chain_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "auto".to_string());
            println!("{}", "CLI Configuration".bold());
            println!("{}", "=".repeat(50));
            println!("RPC URL:         {}", config.rpc_url.bright_cyan());
            println!("Chain ID:        {}", chain_id.bright_green());
            println!("Confirm timeout: {}s", config.confirm_timeout_secs);
        }
        ConfigCommands::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            print_success(&format!("Set {} = {}", key, value));
        }
    }
    Ok(())
}

/// Parse a `0x` address argument.
pub fn parse_address(s: &str) -> anyhow::Result<Address> {
    Address::from_str(s).map_err(|e| anyhow::anyhow!("Invalid address '{}': {}", s, e))
}
