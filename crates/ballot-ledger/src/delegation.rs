//! Delegation chain resolution.
//!
//! A voter who delegates records the end of the chain it delegated into.
//! Following `delegate` links from any voter therefore reaches a voter with
//! no delegate, the one who actually holds (or has cast) the weight.

use std::collections::{BTreeMap, HashSet};

use ballot_types::Address;

use crate::error::BallotError;
use crate::voter::Voter;

/// Follow `target`'s delegate chain on behalf of `delegator`.
///
/// Returns the last address in the chain. Fails with
/// [`BallotError::DelegationCycle`] if the walk comes back to `delegator`
/// or revisits any address, so the loop always terminates.
pub fn resolve_delegate(
    voters: &BTreeMap<Address, Voter>,
    delegator: Address,
    target: Address,
) -> Result<Address, BallotError> {
    let mut visited = HashSet::new();
    visited.insert(delegator);

    let mut current = target;
    loop {
        if !visited.insert(current) {
            return Err(BallotError::DelegationCycle);
        }

        match voters.get(&current).and_then(|v| v.delegate) {
            Some(next) => current = next,
            None => return Ok(current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_address(n: u8) -> Address {
        let mut addr = [0u8; 20];
        addr[19] = n;
        Address::from_bytes(addr)
    }

    fn delegated_to(to: Address) -> Voter {
        Voter {
            weight: 1,
            voted: true,
            delegate: Some(to),
            vote: 0,
        }
    }

    #[test]
    fn test_resolve_without_chain() {
        let voters = BTreeMap::new();
        let alice = test_address(1);
        let bob = test_address(2);

        assert_eq!(resolve_delegate(&voters, alice, bob), Ok(bob));
    }

    #[test]
    fn test_resolve_follows_chain() {
        let alice = test_address(1);
        let bob = test_address(2);
        let charlie = test_address(3);
        let dave = test_address(4);

        // Bob -> Charlie -> Dave
        let mut voters = BTreeMap::new();
        voters.insert(bob, delegated_to(charlie));
        voters.insert(charlie, delegated_to(dave));

        assert_eq!(resolve_delegate(&voters, alice, bob), Ok(dave));
        assert_eq!(resolve_delegate(&voters, alice, charlie), Ok(dave));
    }

    #[test]
    fn test_chain_back_to_delegator_is_cycle() {
        let alice = test_address(1);
        let bob = test_address(2);
        let charlie = test_address(3);

        // Bob -> Charlie -> Alice; Alice delegating to Bob closes the loop
        let mut voters = BTreeMap::new();
        voters.insert(bob, delegated_to(charlie));
        voters.insert(charlie, delegated_to(alice));

        assert_eq!(
            resolve_delegate(&voters, alice, bob),
            Err(BallotError::DelegationCycle)
        );
    }

    #[test]
    fn test_corrupt_loop_terminates() {
        let alice = test_address(1);
        let bob = test_address(2);
        let charlie = test_address(3);

        // Bob <-> Charlie never reaches an end
        let mut voters = BTreeMap::new();
        voters.insert(bob, delegated_to(charlie));
        voters.insert(charlie, delegated_to(bob));

        assert_eq!(
            resolve_delegate(&voters, alice, bob),
            Err(BallotError::DelegationCycle)
        );
    }
}
