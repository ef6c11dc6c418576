//! Property tests for ballot operations
//!
//! Random sequences of grants, delegations and votes from a small pool of
//! accounts, checked against the ledger's conservation and atomicity rules.

use ballot_ledger::{Ballot, BallotError, BallotEvent};
use ballot_types::{Address, ProposalName};
use proptest::prelude::*;

const ACCOUNTS: u8 = 6;
const PROPOSALS: u32 = 3;

#[derive(Debug, Clone)]
enum Op {
    Grant { caller: u8, voter: u8 },
    Delegate { caller: u8, to: u8 },
    Vote { caller: u8, proposal: u32 },
}

fn account(n: u8) -> Address {
    Address::from_bytes([n; 20])
}

fn new_ballot() -> Ballot {
    let names = (0..PROPOSALS)
        .map(|i| ProposalName::encode(&format!("Proposal {}", i + 1)).unwrap())
        .collect();
    Ballot::new(account(0), names)
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        // Mostly from the chairperson so grants actually land
        (prop_oneof![Just(0u8), 0..ACCOUNTS], 0..ACCOUNTS)
            .prop_map(|(caller, voter)| Op::Grant { caller, voter }),
        (0..ACCOUNTS, 0..ACCOUNTS).prop_map(|(caller, to)| Op::Delegate { caller, to }),
        // One past the end to exercise InvalidProposal
        (0..ACCOUNTS, 0..=PROPOSALS).prop_map(|(caller, proposal)| Op::Vote { caller, proposal }),
    ]
}

fn apply(ballot: &mut Ballot, op: &Op) -> Result<BallotEvent, BallotError> {
    match *op {
        Op::Grant { caller, voter } => ballot.give_right_to_vote(account(caller), account(voter)),
        Op::Delegate { caller, to } => ballot.delegate(account(caller), account(to)),
        Op::Vote { caller, proposal } => ballot.vote(account(caller), proposal),
    }
}

/// Weight still held by voters who have not voted or delegated
fn unspent_weight(ballot: &Ballot) -> u64 {
    (0..ACCOUNTS)
        .map(|n| ballot.voter(&account(n)))
        .filter(|v| !v.voted)
        .map(|v| v.weight)
        .sum()
}

proptest! {
    #[test]
    fn test_failed_operations_leave_ballot_unchanged(
        ops in prop::collection::vec(arb_op(), 0..64),
    ) {
        let mut ballot = new_ballot();
        for op in &ops {
            let before = ballot.clone();
            if apply(&mut ballot, op).is_err() {
                prop_assert_eq!(&ballot, &before);
            }
        }
    }

    #[test]
    fn test_weight_is_conserved(
        ops in prop::collection::vec(arb_op(), 0..64),
    ) {
        let mut ballot = new_ballot();
        // The chairperson starts with one unit
        let mut issued = 1u64;

        for op in &ops {
            if let Ok(BallotEvent::RightGranted { .. }) = apply(&mut ballot, op) {
                issued += 1;
            }
            prop_assert_eq!(ballot.total_votes() + unspent_weight(&ballot), issued);
        }
    }

    #[test]
    fn test_counts_never_decrease(
        ops in prop::collection::vec(arb_op(), 0..64),
    ) {
        let mut ballot = new_ballot();
        for op in &ops {
            let before: Vec<u64> = ballot.proposals().iter().map(|p| p.vote_count).collect();
            let _ = apply(&mut ballot, op);
            for (old, new) in before.iter().zip(ballot.proposals()) {
                prop_assert!(new.vote_count >= *old);
            }
        }
    }

    #[test]
    fn test_voted_accounts_stay_voted(
        ops in prop::collection::vec(arb_op(), 0..64),
    ) {
        let mut ballot = new_ballot();
        for op in &ops {
            let voted_before: Vec<bool> =
                (0..ACCOUNTS).map(|n| ballot.voter(&account(n)).voted).collect();
            let _ = apply(&mut ballot, op);
            for (n, was_voted) in voted_before.into_iter().enumerate() {
                if was_voted {
                    prop_assert!(ballot.voter(&account(n as u8)).voted);
                }
            }
        }
    }

    #[test]
    fn test_winner_is_earliest_maximum(
        ops in prop::collection::vec(arb_op(), 0..64),
    ) {
        let mut ballot = new_ballot();
        for op in &ops {
            let _ = apply(&mut ballot, op);
        }

        let counts: Vec<u64> = ballot.proposals().iter().map(|p| p.vote_count).collect();
        let max = counts.iter().copied().max().unwrap_or(0);
        let expected = counts.iter().position(|&c| c == max).unwrap_or(0) as u32;

        prop_assert_eq!(ballot.winning_proposal(), expected);
        prop_assert_eq!(
            ballot.winner_name().unwrap(),
            ballot.proposal(expected).unwrap().name
        );
    }

    #[test]
    fn test_only_chairperson_grants(
        caller in 1..ACCOUNTS,
        voter in 0..ACCOUNTS,
    ) {
        let mut ballot = new_ballot();
        prop_assert_eq!(
            ballot.give_right_to_vote(account(caller), account(voter)),
            Err(BallotError::Unauthorized)
        );
    }
}

#[test]
fn test_delegation_then_vote_scenario() {
    let mut ballot = new_ballot();
    for n in 1..ACCOUNTS {
        ballot.give_right_to_vote(account(0), account(n)).unwrap();
    }

    // 1 -> 2 -> 3, 3 votes, then 4 delegates into the spent chain
    ballot.delegate(account(1), account(2)).unwrap();
    ballot.delegate(account(2), account(3)).unwrap();
    ballot.vote(account(3), 1).unwrap();
    let event = ballot.delegate(account(4), account(1)).unwrap();

    assert_eq!(
        event,
        BallotEvent::Delegated {
            delegator: account(4),
            delegate: account(3),
            weight: 1,
            proposal: Some(1),
        }
    );
    assert_eq!(ballot.proposal(1).unwrap().vote_count, 4);
    assert_eq!(ballot.winning_proposal(), 1);
    assert_eq!(ballot.winner_name().unwrap().decode().unwrap(), "Proposal 2");
}
