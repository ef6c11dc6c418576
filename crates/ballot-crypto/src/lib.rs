//! Ballot Crypto - Signing primitives for ballot transactions.
//!
//! This crate provides:
//! - Ed25519 keypairs (sign ledger calls, derive account addresses)
//! - Signature verification for signed transactions

pub mod ed25519;
pub mod error;

pub use ed25519::{Keypair, verify as ed25519_verify, verify_transaction};
pub use error::CryptoError;
