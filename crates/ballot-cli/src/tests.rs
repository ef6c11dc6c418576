//! CLI tests against a live node.

use std::sync::Arc;

use ballot_crypto::Keypair;
use ballot_rpc::{LedgerHost, RpcServer, RpcServerConfig};
use ballot_types::Address;
use clap::Parser;

use crate::commands::{run, Cli};
use crate::config::CliConfig;
use crate::rpc_client::RpcClient;

const CHAIN_ID: u64 = 1337;

async fn start_node() -> (RpcServer, Arc<LedgerHost>, CliConfig) {
    let host = Arc::new(LedgerHost::new(CHAIN_ID));
    let config = RpcServerConfig {
        http_addr: "127.0.0.1:0".parse().unwrap(),
        ..RpcServerConfig::default()
    };
    let mut server = RpcServer::new(config, host.clone());
    let addr = server.start().await.unwrap();
    let cli_config = CliConfig {
        rpc_url: format!("http://{}", addr),
        chain_id: None,
        confirm_timeout_secs: 5,
    };
    (server, host, cli_config)
}

fn key(n: u8) -> String {
    hex::encode([n; 32])
}

async fn ballot(config: &CliConfig, signer: u8, args: &[&str]) -> anyhow::Result<()> {
    let key = key(signer);
    let mut argv = vec![
        "ballot",
        "--rpc",
        config.rpc_url.as_str(),
        "--private-key",
        key.as_str(),
    ];
    argv.extend_from_slice(args);
    run(Cli::try_parse_from(argv)?, config.clone()).await
}

#[tokio::test]
async fn test_ballot_flow_through_cli() {
    let (mut server, host, config) = start_node().await;
    let chair = Keypair::from_seed(&[1u8; 32]);
    let voter = Keypair::from_seed(&[2u8; 32]);

    ballot(&config, 1, &["deploy", "P1", "P2"]).await.unwrap();
    let ledger = Address::for_deployment(&chair.address(), 0);
    let ledger_arg = ledger.to_string();
    assert_eq!(host.chairperson(&ledger).unwrap(), chair.address());

    let voter_arg = voter.address().to_string();
    ballot(&config, 1, &["give-right", &ledger_arg, &voter_arg]).await.unwrap();
    ballot(&config, 2, &["vote", &ledger_arg, "1"]).await.unwrap();
    ballot(&config, 1, &["delegate", &ledger_arg, &voter_arg]).await.unwrap();

    assert_eq!(host.proposal(&ledger, 1).unwrap().vote_count, 2);
    assert_eq!(host.winning_proposal(&ledger).unwrap(), 1);

    ballot(&config, 1, &["results", &ledger_arg]).await.unwrap();
    ballot(&config, 1, &["voter", &ledger_arg, &voter_arg]).await.unwrap();

    server.stop();
}

#[tokio::test]
async fn test_rejected_call_surfaces_node_message() {
    let (mut server, _host, config) = start_node().await;
    let chair = Keypair::from_seed(&[1u8; 32]);

    ballot(&config, 1, &["deploy", "A"]).await.unwrap();
    let ledger = Address::for_deployment(&chair.address(), 0).to_string();

    let err = ballot(&config, 3, &["vote", &ledger, "0"]).await.unwrap_err();
    assert!(err.to_string().contains("Has no right to vote"), "{}", err);

    server.stop();
}

#[tokio::test]
async fn test_client_reads() {
    let (mut server, _host, config) = start_node().await;
    let client = RpcClient::new(config.rpc_url.clone());
    let chair = Keypair::from_seed(&[1u8; 32]);

    assert_eq!(client.chain_id().await.unwrap(), CHAIN_ID);
    assert_eq!(client.nonce(&chair.address()).await.unwrap(), 0);

    ballot(&config, 1, &["deploy", "Alpha", "Beta"]).await.unwrap();
    let ledger = Address::for_deployment(&chair.address(), 0);

    assert_eq!(client.nonce(&chair.address()).await.unwrap(), 1);
    assert_eq!(client.chairperson(&ledger).await.unwrap(), chair.address());
    assert_eq!(client.proposal_count(&ledger).await.unwrap(), 2);

    let proposals = client.proposals(&ledger).await.unwrap();
    assert_eq!(proposals[1].name, "Beta");
    assert_eq!(client.winner_name(&ledger).await.unwrap().name, "Alpha");

    let voter = client.voter(&ledger, &chair.address()).await.unwrap();
    assert_eq!(voter.weight, 1);
    assert!(!voter.voted);

    assert!(client.proposal(&ledger, 5).await.is_err());

    server.stop();
}

#[tokio::test]
async fn test_signing_requires_key() {
    let (mut server, _host, config) = start_node().await;
    let cli = Cli::try_parse_from(["ballot", "--rpc", config.rpc_url.as_str(), "deploy", "A"]).unwrap();
    let cli = Cli { private_key: None, ..cli };

    let err = run(cli, config).await.unwrap_err();
    assert!(err.to_string().contains("No signing key"));

    server.stop();
}
