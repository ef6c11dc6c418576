//! Ballot Ledger - Weighted, delegable plurality voting.
//!
//! This crate provides:
//! - A fixed set of proposals chosen at creation
//! - Voting rights granted by a single chairperson
//! - Transitive delegation with cycle rejection
//! - Plurality tally with earliest-index tie break

pub mod ballot;
pub mod delegation;
pub mod error;
pub mod event;
pub mod proposal;
pub mod voter;

pub use ballot::Ballot;
pub use delegation::resolve_delegate;
pub use error::BallotError;
pub use event::BallotEvent;
pub use proposal::Proposal;
pub use voter::Voter;

/// Ledger version
pub const LEDGER_VERSION: &str = env!("CARGO_PKG_VERSION");
