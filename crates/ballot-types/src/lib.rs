//! Ballot Types - Core type definitions shared by the ledger, host and clients.
//!
//! This crate provides:
//! - Addresses (20-byte, `0x` hex encoded)
//! - Hashes (32-byte, blake3 digests)
//! - Proposal names (fixed-width bytes32 strings)
//! - Ed25519 keys and signatures
//! - Transactions carrying ledger calls, and their receipts

pub mod address;
pub mod hash;
pub mod name;
pub mod signature;
pub mod transaction;
pub mod receipt;
pub mod error;

#[cfg(any(feature = "serde", feature = "borsh"))]
mod serialization;

pub use address::Address;
pub use hash::Hash;
pub use name::ProposalName;
pub use signature::{Ed25519PublicKey, Ed25519Signature};
pub use transaction::{LedgerCall, SignedTransaction, Transaction};
pub use receipt::{Log, TransactionReceipt};
pub use error::TypesError;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Address, Hash, ProposalName,
        Ed25519PublicKey, Ed25519Signature,
        LedgerCall, SignedTransaction, Transaction,
        Log, TransactionReceipt, TypesError,
    };
}
