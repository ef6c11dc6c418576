//! `ballot_*` method dispatch.

use std::str::FromStr;

use ballot_ledger::Proposal;
use ballot_types::{Address, Hash, ProposalName, SignedTransaction};
use serde_json::{json, Value};

use crate::error::{RpcError, RpcResult};
use crate::host::LedgerHost;
use crate::{JsonRpcRequest, JsonRpcResponse};

/// Execute one request against the host.
pub fn handle_method(req: &JsonRpcRequest, host: &LedgerHost) -> JsonRpcResponse {
    match dispatch(req, host) {
        Ok(result) => JsonRpcResponse::success(req.id.clone(), result),
        Err(e) => {
            tracing::debug!(method = %req.method, error = %e, "RPC call failed");
            JsonRpcResponse::failure(req.id.clone(), &e)
        }
    }
}

fn dispatch(req: &JsonRpcRequest, host: &LedgerHost) -> RpcResult<Value> {
    match req.method.as_str() {
        // === Host ===
        "ballot_chainId" => Ok(json!(format!("0x{:x}", host.chain_id()))),

        "ballot_health" => Ok(json!({
            "status": "ok",
            "ledgers": host.ledger_count(),
            "blockNumber": host.block_number(),
        })),

        "ballot_getNonce" => {
            let address = parse_address(param_str(req, 0)?)?;
            Ok(json!(format!("0x{:x}", host.nonce(&address))))
        }

        "ballot_sendTransaction" => {
            let signed = parse_signed_transaction(param_str(req, 0)?)?;
            let receipt = host.submit(signed).map_err(RpcError::rejected)?;
            Ok(json!(receipt.transaction_hash.to_string()))
        }

        "ballot_getReceipt" => {
            let hash = parse_hash(param_str(req, 0)?)?;
            match host.receipt(&hash) {
                Some(receipt) => serde_json::to_value(receipt)
                    .map_err(|e| RpcError::InternalError(e.to_string())),
                None => Ok(Value::Null),
            }
        }

        // === Ledger reads ===
        "ballot_chairperson" => {
            let ledger = parse_address(param_str(req, 0)?)?;
            Ok(json!(host.chairperson(&ledger)?.to_string()))
        }

        "ballot_proposalCount" => {
            let ledger = parse_address(param_str(req, 0)?)?;
            Ok(json!(host.proposal_count(&ledger)?))
        }

        "ballot_proposal" => {
            let ledger = parse_address(param_str(req, 0)?)?;
            let index = param_u32(req, 1)?;
            Ok(proposal_json(&host.proposal(&ledger, index)?))
        }

        "ballot_proposals" => {
            let ledger = parse_address(param_str(req, 0)?)?;
            let proposals: Vec<Value> = host.proposals(&ledger)?.iter().map(proposal_json).collect();
            Ok(Value::Array(proposals))
        }

        "ballot_voter" => {
            let ledger = parse_address(param_str(req, 0)?)?;
            let voter = parse_address(param_str(req, 1)?)?;
            serde_json::to_value(host.voter(&ledger, &voter)?)
                .map_err(|e| RpcError::InternalError(e.to_string()))
        }

        "ballot_winningProposal" => {
            let ledger = parse_address(param_str(req, 0)?)?;
            Ok(json!(host.winning_proposal(&ledger)?))
        }

        "ballot_winnerName" => {
            let ledger = parse_address(param_str(req, 0)?)?;
            Ok(name_json(&host.winner_name(&ledger)?))
        }

        other => Err(RpcError::MethodNotFound(other.to_string())),
    }
}

fn name_json(name: &ProposalName) -> Value {
    json!({
        "name": name.to_string(),
        "nameHex": name.to_hex(),
    })
}

fn proposal_json(proposal: &Proposal) -> Value {
    json!({
        "name": proposal.name.to_string(),
        "nameHex": proposal.name.to_hex(),
        "voteCount": proposal.vote_count,
    })
}

fn param_str(req: &JsonRpcRequest, index: usize) -> RpcResult<&str> {
    req.params
        .get(index)
        .and_then(|v| v.as_str())
        .ok_or_else(|| RpcError::InvalidParams(format!("expected string at position {}", index)))
}

/// Accepts a JSON number or a decimal/hex string.
fn param_u32(req: &JsonRpcRequest, index: usize) -> RpcResult<u32> {
    let value = match req.params.get(index) {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => parse_u64(s).ok(),
        _ => None,
    };
    value
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| RpcError::InvalidParams(format!("expected index at position {}", index)))
}

fn parse_address(s: &str) -> RpcResult<Address> {
    Address::from_str(s).map_err(|e| RpcError::InvalidParams(format!("invalid address: {}", e)))
}

fn parse_hash(s: &str) -> RpcResult<Hash> {
    Hash::from_str(s).map_err(|e| RpcError::InvalidParams(format!("invalid hash: {}", e)))
}

fn parse_u64(s: &str) -> Result<u64, ()> {
    if s.starts_with("0x") || s.starts_with("0X") {
        let hex_part = &s[2..];
        if hex_part.is_empty() {
            return Err(());
        }
        u64::from_str_radix(hex_part, 16).map_err(|_| ())
    } else {
        s.parse().map_err(|_| ())
    }
}

/// Decode a `0x`-prefixed hex string holding a borsh `SignedTransaction`.
fn parse_signed_transaction(s: &str) -> RpcResult<SignedTransaction> {
    let raw = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(raw)
        .map_err(|e| RpcError::InvalidParams(format!("invalid transaction hex: {}", e)))?;
    borsh::from_slice(&bytes)
        .map_err(|e| RpcError::InvalidParams(format!("invalid transaction encoding: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_codes;

    fn call(host: &LedgerHost, method: &str, params: Vec<Value>) -> JsonRpcResponse {
        handle_method(&JsonRpcRequest::new(method, params, 1), host)
    }

    #[test]
    fn test_chain_id() {
        let host = LedgerHost::new(0x539);
        let response = call(&host, "ballot_chainId", vec![]);
        assert_eq!(response.result, Some(json!("0x539")));
        assert_eq!(response.id, Some(json!(1)));
    }

    #[test]
    fn test_unknown_method() {
        let host = LedgerHost::new(1);
        let response = call(&host, "eth_blockNumber", vec![]);
        assert_eq!(response.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
    }

    #[test]
    fn test_missing_param() {
        let host = LedgerHost::new(1);
        let response = call(&host, "ballot_getNonce", vec![]);
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[test]
    fn test_unknown_ledger_is_not_found() {
        let host = LedgerHost::new(1);
        let ledger = Address::from_bytes([3u8; 20]).to_string();
        let response = call(&host, "ballot_winningProposal", vec![json!(ledger)]);
        assert_eq!(response.error.unwrap().code, error_codes::RESOURCE_NOT_FOUND);
    }

    #[test]
    fn test_garbage_transaction() {
        let host = LedgerHost::new(1);
        let response = call(&host, "ballot_sendTransaction", vec![json!("0xdeadbeef")]);
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("0xFF"), Ok(255));
        assert_eq!(parse_u64("1000"), Ok(1000));
        assert!(parse_u64("0x").is_err());
        assert!(parse_u64("invalid").is_err());
    }

    #[test]
    fn test_param_u32_forms() {
        let req = JsonRpcRequest::new("x", vec![json!(2), json!("0x3"), json!("7"), json!(-1)], 1);
        assert_eq!(param_u32(&req, 0), Ok(2));
        assert_eq!(param_u32(&req, 1), Ok(3));
        assert_eq!(param_u32(&req, 2), Ok(7));
        assert!(param_u32(&req, 3).is_err());
        assert!(param_u32(&req, 4).is_err());
    }
}
