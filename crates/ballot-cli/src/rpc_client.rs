//! RPC client for CLI operations.
//!
//! HTTP client for the node's `ballot_*` JSON-RPC methods.

use std::str::FromStr;
use std::time::Duration;

use ballot_ledger::Voter;
use ballot_types::{Address, Hash, SignedTransaction, TransactionReceipt};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// RPC client.
#[derive(Debug, Clone)]
pub struct RpcClient {
    url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i32,
    message: String,
}

/// Proposal as returned by `ballot_proposal(s)`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalInfo {
    pub name: String,
    pub name_hex: String,
    pub vote_count: u64,
}

/// Winner name as returned by `ballot_winnerName`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerName {
    pub name: String,
    pub name_hex: String,
}

impl RpcClient {
    /// Create a new RPC client.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Make an RPC call; a JSON `null` result comes back as `Value::Null`.
    pub async fn call_value(&self, method: &str, params: Value) -> anyhow::Result<Value> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Could not reach {}: {}", self.url, e))?;

        let rpc_response: RpcResponse = response.json().await?;

        if let Some(error) = rpc_response.error {
            anyhow::bail!("RPC error {}: {}", error.code, error.message);
        }

        Ok(rpc_response.result.unwrap_or(Value::Null))
    }

    /// Make an RPC call and decode its result.
    pub async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> anyhow::Result<T> {
        let value = self.call_value(method, params).await?;
        if value.is_null() {
            anyhow::bail!("Empty result from {}", method);
        }
        Ok(serde_json::from_value(value)?)
    }

    // ============ Host ============

    pub async fn chain_id(&self) -> anyhow::Result<u64> {
        let hex: String = self.call("ballot_chainId", json!([])).await?;
        parse_hex_u64(&hex)
    }

    pub async fn health(&self) -> anyhow::Result<Value> {
        self.call("ballot_health", json!([])).await
    }

    pub async fn nonce(&self, address: &Address) -> anyhow::Result<u64> {
        let hex: String = self
            .call("ballot_getNonce", json!([address.to_string()]))
            .await?;
        parse_hex_u64(&hex)
    }

    /// Submit a signed transaction; returns its hash.
    pub async fn send_transaction(&self, signed: &SignedTransaction) -> anyhow::Result<Hash> {
        let raw = format!("0x{}", hex::encode(borsh::to_vec(signed)?));
        let hash: String = self.call("ballot_sendTransaction", json!([raw])).await?;
        Hash::from_str(&hash).map_err(|e| anyhow::anyhow!("Invalid hash from node: {}", e))
    }

    pub async fn receipt(&self, hash: &Hash) -> anyhow::Result<Option<TransactionReceipt>> {
        let value = self
            .call_value("ballot_getReceipt", json!([hash.to_string()]))
            .await?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    /// Poll for a receipt until `timeout` elapses.
    pub async fn wait_for_receipt(
        &self,
        hash: &Hash,
        timeout: Duration,
    ) -> anyhow::Result<TransactionReceipt> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Some(receipt) = self.receipt(hash).await? {
                return Ok(receipt);
            }
            if tokio::time::Instant::now() >= deadline {
                anyhow::bail!("Timed out waiting for receipt of {}", hash);
            }
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
    }

    // ============ Ledger reads ============

    pub async fn chairperson(&self, ledger: &Address) -> anyhow::Result<Address> {
        let addr: String = self
            .call("ballot_chairperson", json!([ledger.to_string()]))
            .await?;
        Address::from_str(&addr).map_err(|e| anyhow::anyhow!("Invalid address from node: {}", e))
    }

    pub async fn proposal_count(&self, ledger: &Address) -> anyhow::Result<u32> {
        self.call("ballot_proposalCount", json!([ledger.to_string()]))
            .await
    }

    pub async fn proposal(&self, ledger: &Address, index: u32) -> anyhow::Result<ProposalInfo> {
        self.call("ballot_proposal", json!([ledger.to_string(), index]))
            .await
    }

    pub async fn proposals(&self, ledger: &Address) -> anyhow::Result<Vec<ProposalInfo>> {
        self.call("ballot_proposals", json!([ledger.to_string()]))
            .await
    }

    pub async fn voter(&self, ledger: &Address, voter: &Address) -> anyhow::Result<Voter> {
        self.call("ballot_voter", json!([ledger.to_string(), voter.to_string()]))
            .await
    }

    pub async fn winning_proposal(&self, ledger: &Address) -> anyhow::Result<u32> {
        self.call("ballot_winningProposal", json!([ledger.to_string()]))
            .await
    }

    pub async fn winner_name(&self, ledger: &Address) -> anyhow::Result<WinnerName> {
        self.call("ballot_winnerName", json!([ledger.to_string()]))
            .await
    }
}

/// Parse hex u64.
pub fn parse_hex_u64(hex: &str) -> anyhow::Result<u64> {
    let hex = hex.trim_start_matches("0x");
    u64::from_str_radix(hex, 16).map_err(|e| anyhow::anyhow!("Invalid hex: {}", e))
}
