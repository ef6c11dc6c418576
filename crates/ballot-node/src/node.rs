//! The ballot node: one ledger host behind one RPC server.

use std::net::SocketAddr;
use std::sync::Arc;

use ballot_rpc::{LedgerHost, RpcServer};
use tokio::sync::mpsc;
use tracing::info;

use crate::config::NodeConfig;

pub struct BallotNode {
    pub config: NodeConfig,
    pub host: Arc<LedgerHost>,
    rpc_server: Option<RpcServer>,
    shutdown: mpsc::Receiver<()>,
}

impl BallotNode {
    /// Create a node and the sender that stops it.
    pub fn new(config: NodeConfig) -> (Self, mpsc::Sender<()>) {
        let host = Arc::new(LedgerHost::new(config.host.chain_id));
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let node = Self {
            config,
            host,
            rpc_server: None,
            shutdown: shutdown_rx,
        };
        (node, shutdown_tx)
    }

    /// Start the RPC server.
    pub async fn start(&mut self) -> anyhow::Result<SocketAddr> {
        info!("Starting ballot node (Chain ID: {})", self.config.host.chain_id);

        let mut server = RpcServer::new(self.config.rpc_server_config(), self.host.clone());
        let addr = server.start().await?;
        self.rpc_server = Some(server);

        Ok(addr)
    }

    /// Serve until Ctrl+C or the shutdown sender fires.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        info!("Node is running. Press Ctrl+C to shutdown.");

        tokio::select! {
            _ = self.shutdown.recv() => {
                info!("Shutdown signal received");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received");
            }
        }

        self.stop();
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(mut rpc) = self.rpc_server.take() {
            rpc.stop();
        }
        info!(
            ledgers = self.host.ledger_count(),
            transactions = self.host.block_number(),
            "Ballot node stopped"
        );
    }

    pub fn is_running(&self) -> bool {
        self.rpc_server.as_ref().map_or(false, |s| s.is_running())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> NodeConfig {
        let mut config = NodeConfig::default();
        config.rpc.http_addr = "127.0.0.1:0".parse().unwrap();
        config.host.chain_id = 99;
        config
    }

    #[tokio::test]
    async fn test_node_creation() {
        let (node, _shutdown) = BallotNode::new(test_config());
        assert_eq!(node.host.chain_id(), 99);
        assert!(!node.is_running());
    }

    #[tokio::test]
    async fn test_node_start_and_shutdown() {
        let (mut node, shutdown) = BallotNode::new(test_config());
        let addr = node.start().await.unwrap();
        assert_ne!(addr.port(), 0);
        assert!(node.is_running());

        shutdown.send(()).await.unwrap();
        node.run().await.unwrap();
        assert!(!node.is_running());
    }
}
