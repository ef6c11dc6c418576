//! RPC error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::host::HostError;

/// JSON-RPC error codes.
pub mod error_codes {
    /// Parse error
    pub const PARSE_ERROR: i32 = -32700;
    /// Invalid request
    pub const INVALID_REQUEST: i32 = -32600;
    /// Method not found
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid params
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error
    pub const INTERNAL_ERROR: i32 = -32603;
    /// Ledger or proposal not found
    pub const RESOURCE_NOT_FOUND: i32 = -32001;
    /// Transaction rejected
    pub const TRANSACTION_REJECTED: i32 = -32003;
    /// Request body too large
    pub const LIMIT_EXCEEDED: i32 = -32005;
}

/// RPC errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RpcError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Message is the refusal reason as-is so clients see the ledger's text
    #[error("{0}")]
    TransactionRejected(String),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
}

impl RpcError {
    /// Get the error code.
    pub fn code(&self) -> i32 {
        match self {
            RpcError::ParseError(_) => error_codes::PARSE_ERROR,
            RpcError::InvalidRequest(_) => error_codes::INVALID_REQUEST,
            RpcError::MethodNotFound(_) => error_codes::METHOD_NOT_FOUND,
            RpcError::InvalidParams(_) => error_codes::INVALID_PARAMS,
            RpcError::InternalError(_) => error_codes::INTERNAL_ERROR,
            RpcError::ResourceNotFound(_) => error_codes::RESOURCE_NOT_FOUND,
            RpcError::TransactionRejected(_) => error_codes::TRANSACTION_REJECTED,
            RpcError::LimitExceeded(_) => error_codes::LIMIT_EXCEEDED,
        }
    }

    /// Refusal of a submitted transaction, whatever the stage.
    pub fn rejected(err: HostError) -> Self {
        RpcError::TransactionRejected(err.to_string())
    }
}

/// Failures of read queries.
impl From<HostError> for RpcError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::UnknownLedger(_) => RpcError::ResourceNotFound(err.to_string()),
            HostError::Rejected(ballot_ledger::BallotError::InvalidProposal(_)) => {
                RpcError::ResourceNotFound(err.to_string())
            }
            other => RpcError::InternalError(other.to_string()),
        }
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl From<&RpcError> for JsonRpcError {
    fn from(err: &RpcError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Standard RPC result type.
pub type RpcResult<T> = Result<T, RpcError>;
