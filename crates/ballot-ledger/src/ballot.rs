//! Ballot ledger
//!
//! A single set of proposals voted on by accounts the chairperson
//! enfranchised. Features:
//! - Voting rights granted one account at a time by the chairperson
//! - Transitive delegation; weight follows the chain to its end
//! - Delegating into a voter who already voted counts immediately
//! - Plurality winner, earliest proposal wins ties

use std::collections::BTreeMap;

use ballot_types::{Address, ProposalName};
use tracing::debug;

use crate::delegation::resolve_delegate;
use crate::error::BallotError;
use crate::event::BallotEvent;
use crate::proposal::Proposal;
use crate::voter::Voter;

/// Ballot state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    /// Account allowed to grant voting rights, fixed at creation
    chairperson: Address,
    /// Proposals in creation order
    proposals: Vec<Proposal>,
    /// Voter records, created on first write
    voters: BTreeMap<Address, Voter>,
}

impl Ballot {
    /// Create a ballot; `chairperson` receives weight 1.
    pub fn new(chairperson: Address, names: Vec<ProposalName>) -> Self {
        let proposals = names.into_iter().map(Proposal::new).collect();

        let mut voters = BTreeMap::new();
        voters.insert(
            chairperson,
            Voter {
                weight: 1,
                ..Voter::default()
            },
        );

        Self {
            chairperson,
            proposals,
            voters,
        }
    }

    /// Event describing this ballot's creation
    pub fn creation_event(&self) -> BallotEvent {
        BallotEvent::Created {
            chairperson: self.chairperson,
            proposals: self.proposals.len() as u32,
        }
    }

    /// Give `voter` the right to vote. Only the chairperson may call this.
    pub fn give_right_to_vote(
        &mut self,
        caller: Address,
        voter: Address,
    ) -> Result<BallotEvent, BallotError> {
        if caller != self.chairperson {
            return Err(BallotError::Unauthorized);
        }

        let record = self.voter(&voter);
        if record.voted {
            return Err(BallotError::AlreadyVoted);
        }
        if record.weight != 0 {
            return Err(BallotError::AlreadyEnfranchised);
        }

        self.voters.entry(voter).or_default().weight = 1;
        debug!(voter = %voter, "Voting right granted");

        Ok(BallotEvent::RightGranted { voter })
    }

    /// Delegate the caller's vote to `to`.
    ///
    /// The weight lands at the end of `to`'s delegation chain: added to the
    /// final delegate's weight, or straight to its proposal if it already
    /// voted.
    pub fn delegate(
        &mut self,
        caller: Address,
        to: Address,
    ) -> Result<BallotEvent, BallotError> {
        let sender = self.voter(&caller);
        if sender.weight == 0 {
            return Err(BallotError::NoRight);
        }
        if sender.voted {
            return Err(BallotError::AlreadyVoted);
        }
        if caller == to {
            return Err(BallotError::SelfDelegation);
        }

        let delegate = resolve_delegate(&self.voters, caller, to)?;
        let delegate_record = self.voter(&delegate);

        let counted_for = if delegate_record.voted {
            let index = delegate_record.vote;
            let proposal = self
                .proposals
                .get_mut(index as usize)
                .ok_or(BallotError::InvalidProposal(index))?;
            proposal.vote_count = proposal
                .vote_count
                .checked_add(sender.weight)
                .ok_or(BallotError::Overflow)?;
            Some(index)
        } else {
            let new_weight = delegate_record
                .weight
                .checked_add(sender.weight)
                .ok_or(BallotError::Overflow)?;
            self.voters.entry(delegate).or_default().weight = new_weight;
            None
        };

        let record = self.voters.entry(caller).or_default();
        record.voted = true;
        record.delegate = Some(delegate);

        debug!(
            delegator = %caller,
            delegate = %delegate,
            weight = sender.weight,
            counted_for = ?counted_for,
            "Vote delegated"
        );

        Ok(BallotEvent::Delegated {
            delegator: caller,
            delegate,
            weight: sender.weight,
            proposal: counted_for,
        })
    }

    /// Cast the caller's full weight for `proposal`.
    pub fn vote(&mut self, caller: Address, proposal: u32) -> Result<BallotEvent, BallotError> {
        let sender = self.voter(&caller);
        if sender.weight == 0 {
            return Err(BallotError::NoRight);
        }
        if sender.voted {
            return Err(BallotError::AlreadyVoted);
        }

        let target = self
            .proposals
            .get_mut(proposal as usize)
            .ok_or(BallotError::InvalidProposal(proposal))?;
        target.vote_count = target
            .vote_count
            .checked_add(sender.weight)
            .ok_or(BallotError::Overflow)?;

        let record = self.voters.entry(caller).or_default();
        record.voted = true;
        record.vote = proposal;

        debug!(voter = %caller, proposal, weight = sender.weight, "Vote cast");

        Ok(BallotEvent::Voted {
            voter: caller,
            proposal,
            weight: sender.weight,
        })
    }

    /// Index of the proposal with the most votes.
    ///
    /// Only a strictly greater count replaces the current leader, so ties go
    /// to the lowest index and an all-zero tally yields 0.
    pub fn winning_proposal(&self) -> u32 {
        let mut winning_vote_count = 0;
        let mut winner = 0;
        for (index, proposal) in self.proposals.iter().enumerate() {
            if proposal.vote_count > winning_vote_count {
                winning_vote_count = proposal.vote_count;
                winner = index as u32;
            }
        }
        winner
    }

    /// Name of the winning proposal.
    pub fn winner_name(&self) -> Result<ProposalName, BallotError> {
        let index = self.winning_proposal();
        self.proposal(index)
            .map(|p| p.name)
            .ok_or(BallotError::InvalidProposal(index))
    }

    /// The chairperson
    pub fn chairperson(&self) -> Address {
        self.chairperson
    }

    /// Proposal at `index`
    pub fn proposal(&self, index: u32) -> Option<&Proposal> {
        self.proposals.get(index as usize)
    }

    /// All proposals in order
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Number of proposals
    pub fn proposal_count(&self) -> u32 {
        self.proposals.len() as u32
    }

    /// Voter record for `address`; untouched accounts read as the default.
    pub fn voter(&self, address: &Address) -> Voter {
        self.voters.get(address).copied().unwrap_or_default()
    }

    /// Sum of all proposal vote counts
    pub fn total_votes(&self) -> u64 {
        self.proposals.iter().map(|p| p.vote_count).sum()
    }
}
