//! Proposal records.

use ballot_types::ProposalName;
use serde::{Deserialize, Serialize};

/// A named option with its running vote count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// Fixed-width name
    pub name: ProposalName,
    /// Accumulated weight of votes cast for this proposal
    pub vote_count: u64,
}

impl Proposal {
    /// Create a proposal with no votes.
    pub fn new(name: ProposalName) -> Self {
        Self { name, vote_count: 0 }
    }
}
