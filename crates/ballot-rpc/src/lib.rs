//! Ballot RPC - ledger host and JSON-RPC 2.0 API.
//!
//! `LedgerHost` executes signed ledger calls; `RpcServer` exposes it over
//! HTTP with the `ballot_*` methods.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod error;
pub mod handlers;
pub mod host;
pub mod server;

pub use error::{error_codes, JsonRpcError, RpcError, RpcResult};
pub use handlers::handle_method;
pub use host::{HostError, LedgerHost};
pub use server::RpcServer;

/// RPC configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub http_addr: SocketAddr,
    /// Answer preflight requests and attach CORS headers
    pub cors: bool,
    /// Max request body size in bytes
    pub max_body_size: u32,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([127, 0, 0, 1], 8545)),
            cors: true,
            max_body_size: 1024 * 1024,
        }
    }
}

/// JSON-RPC Request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Vec<Value>,
    pub id: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Vec<Value>, id: u64) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params,
            id: Some(Value::from(id)),
        }
    }
}

/// JSON-RPC Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn failure(id: Option<Value>, err: &RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(err.into()),
            id,
        }
    }
}
