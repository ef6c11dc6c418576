//! Voter records.

use ballot_types::Address;
use serde::{Deserialize, Serialize};

/// Per-account voting state.
///
/// Accounts that were never touched read as `Voter::default()`: no weight,
/// not voted, no delegate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// Voting weight; 0 means no right to vote
    pub weight: u64,
    /// True once the voter has voted or delegated
    pub voted: bool,
    /// Final delegate this voter handed its weight to
    pub delegate: Option<Address>,
    /// Index of the proposal voted for (meaningful only after a direct vote)
    pub vote: u32,
}

impl Voter {
    /// Whether this voter may still vote or delegate
    pub fn can_act(&self) -> bool {
        self.weight != 0 && !self.voted
    }

    /// Whether the voter's weight went through a delegate
    pub fn has_delegated(&self) -> bool {
        self.voted && self.delegate.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_voter() {
        let voter = Voter::default();
        assert_eq!(voter.weight, 0);
        assert!(!voter.voted);
        assert!(voter.delegate.is_none());
        assert!(!voter.can_act());
    }

    #[test]
    fn test_can_act() {
        let mut voter = Voter { weight: 1, ..Voter::default() };
        assert!(voter.can_act());
        voter.voted = true;
        assert!(!voter.can_act());
        assert!(!voter.has_delegated());
        voter.delegate = Some(Address::from_bytes([1u8; 20]));
        assert!(voter.has_delegated());
    }
}
