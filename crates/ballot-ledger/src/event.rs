//! Events emitted by successful ballot operations.

use ballot_types::{Address, Log};
use serde::{Deserialize, Serialize};

/// What a committed ballot operation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum BallotEvent {
    /// A ballot was created
    Created {
        chairperson: Address,
        proposals: u32,
    },
    /// The chairperson enfranchised a voter
    RightGranted { voter: Address },
    /// A voter handed its weight to a delegate
    Delegated {
        delegator: Address,
        /// End of the delegation chain
        delegate: Address,
        weight: u64,
        /// Set when the delegate had already voted and the weight was counted
        proposal: Option<u32>,
    },
    /// A voter cast its weight directly
    Voted {
        voter: Address,
        proposal: u32,
        weight: u64,
    },
}

impl BallotEvent {
    /// Event name
    pub fn name(&self) -> &'static str {
        match self {
            BallotEvent::Created { .. } => "Created",
            BallotEvent::RightGranted { .. } => "RightGranted",
            BallotEvent::Delegated { .. } => "Delegated",
            BallotEvent::Voted { .. } => "Voted",
        }
    }

    /// Render as a receipt log emitted by `ledger`.
    pub fn to_log(&self, ledger: Address) -> Log {
        let log = Log::new(ledger, self.name());
        match self {
            BallotEvent::Created { chairperson, proposals } => log
                .param("chairperson", chairperson)
                .param("proposals", proposals),
            BallotEvent::RightGranted { voter } => log.param("voter", voter),
            BallotEvent::Delegated { delegator, delegate, weight, proposal } => {
                let log = log
                    .param("delegator", delegator)
                    .param("delegate", delegate)
                    .param("weight", weight);
                match proposal {
                    Some(p) => log.param("proposal", p),
                    None => log,
                }
            }
            BallotEvent::Voted { voter, proposal, weight } => log
                .param("voter", voter)
                .param("proposal", proposal)
                .param("weight", weight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voted_log() {
        let ledger = Address::from_bytes([9u8; 20]);
        let voter = Address::from_bytes([1u8; 20]);
        let log = BallotEvent::Voted { voter, proposal: 2, weight: 3 }.to_log(ledger);

        assert_eq!(log.address, ledger);
        assert_eq!(log.event, "Voted");
        assert_eq!(log.get("voter"), Some(voter.to_string().as_str()));
        assert_eq!(log.get("proposal"), Some("2"));
        assert_eq!(log.get("weight"), Some("3"));
    }

    #[test]
    fn test_delegated_log_omits_pending_proposal() {
        let ledger = Address::ZERO;
        let event = BallotEvent::Delegated {
            delegator: Address::from_bytes([1u8; 20]),
            delegate: Address::from_bytes([2u8; 20]),
            weight: 1,
            proposal: None,
        };
        let log = event.to_log(ledger);
        assert_eq!(log.get("proposal"), None);
        assert_eq!(log.get("weight"), Some("1"));
    }
}
