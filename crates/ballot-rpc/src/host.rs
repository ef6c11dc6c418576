//! Ledger host.
//!
//! Owns every deployed ballot together with account nonces and receipts.
//! Signed transactions are admitted and executed one at a time under a
//! single lock, so each call either commits completely or leaves no trace.

use std::collections::HashMap;

use ballot_crypto::verify_transaction;
use ballot_ledger::{Ballot, BallotError, BallotEvent, Proposal, Voter};
use ballot_types::{
    Address, Hash, LedgerCall, ProposalName, SignedTransaction, TransactionReceipt,
};
use parking_lot::Mutex;
use thiserror::Error;

/// Why a transaction or query was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Invalid chain id: expected {expected}, got {got}")]
    InvalidChainId { expected: u64, got: u64 },

    #[error("Invalid nonce: expected {expected}, got {got}")]
    InvalidNonce { expected: u64, got: u64 },

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Unknown ledger: {0}")]
    UnknownLedger(Address),

    #[error("Invalid target: {0}")]
    InvalidTarget(&'static str),

    #[error(transparent)]
    Rejected(#[from] BallotError),
}

#[derive(Debug, Default)]
struct HostState {
    ledgers: HashMap<Address, Ballot>,
    nonces: HashMap<Address, u64>,
    receipts: HashMap<Hash, TransactionReceipt>,
    block_number: u64,
}

impl HostState {
    fn nonce(&self, address: &Address) -> u64 {
        self.nonces.get(address).copied().unwrap_or(0)
    }

    fn ledger(&self, address: &Address) -> Result<&Ballot, HostError> {
        self.ledgers
            .get(address)
            .ok_or(HostError::UnknownLedger(*address))
    }
}

/// Executes signed ledger calls in a total order.
#[derive(Debug)]
pub struct LedgerHost {
    chain_id: u64,
    state: Mutex<HostState>,
}

impl LedgerHost {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            state: Mutex::new(HostState::default()),
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Admit and execute a signed transaction.
    ///
    /// Admission checks run in order: chain id, nonce, signature, target.
    /// A ledger error rejects the transaction without consuming the nonce.
    pub fn submit(&self, signed: SignedTransaction) -> Result<TransactionReceipt, HostError> {
        let mut state = self.state.lock();

        let tx = &signed.transaction;
        let sender = signed.sender();

        if tx.chain_id != self.chain_id {
            return Err(HostError::InvalidChainId {
                expected: self.chain_id,
                got: tx.chain_id,
            });
        }

        let expected_nonce = state.nonce(&sender);
        if tx.nonce != expected_nonce {
            return Err(HostError::InvalidNonce {
                expected: expected_nonce,
                got: tx.nonce,
            });
        }

        verify_transaction(&signed).map_err(|e| HostError::InvalidSignature(e.to_string()))?;

        let tx_hash = signed.hash();
        let (ledger_address, events) = match (&tx.call, tx.to) {
            (LedgerCall::Deploy { proposals }, None) => {
                let address = Address::for_deployment(&sender, tx.nonce);
                let ballot = Ballot::new(sender, proposals.clone());
                let event = ballot.creation_event();
                state.ledgers.insert(address, ballot);
                (address, vec![event])
            }
            (LedgerCall::Deploy { .. }, Some(_)) => {
                return Err(HostError::InvalidTarget("deployment must not name a ledger"));
            }
            (_, None) => {
                return Err(HostError::InvalidTarget("call must name a ledger"));
            }
            (call, Some(to)) => {
                let ballot = state
                    .ledgers
                    .get_mut(&to)
                    .ok_or(HostError::UnknownLedger(to))?;
                match execute(ballot, sender, call) {
                    Ok(event) => (to, vec![event]),
                    Err(e) => {
                        tracing::warn!(
                            tx = %tx_hash,
                            from = %sender,
                            call = %call,
                            error = %e,
                            "Transaction rejected"
                        );
                        return Err(e);
                    }
                }
            }
        };

        state.nonces.insert(sender, expected_nonce + 1);
        state.block_number += 1;

        let mut receipt = TransactionReceipt::new(tx_hash, state.block_number, sender, tx.to);
        if tx.is_create() {
            receipt = receipt.with_ledger_address(ledger_address);
        }
        for event in &events {
            receipt = receipt.with_log(event.to_log(ledger_address));
        }
        state.receipts.insert(tx_hash, receipt.clone());

        tracing::info!(
            tx = %tx_hash,
            block = state.block_number,
            from = %sender,
            ledger = %ledger_address,
            call = tx.call.method_name(),
            "Transaction committed"
        );

        Ok(receipt)
    }

    /// Next nonce expected from `address`
    pub fn nonce(&self, address: &Address) -> u64 {
        self.state.lock().nonce(address)
    }

    pub fn receipt(&self, hash: &Hash) -> Option<TransactionReceipt> {
        self.state.lock().receipts.get(hash).cloned()
    }

    /// Number of committed transactions
    pub fn block_number(&self) -> u64 {
        self.state.lock().block_number
    }

    pub fn ledger_count(&self) -> usize {
        self.state.lock().ledgers.len()
    }

    pub fn chairperson(&self, ledger: &Address) -> Result<Address, HostError> {
        self.read(ledger, |b| Ok(b.chairperson()))
    }

    pub fn proposal_count(&self, ledger: &Address) -> Result<u32, HostError> {
        self.read(ledger, |b| Ok(b.proposal_count()))
    }

    pub fn proposal(&self, ledger: &Address, index: u32) -> Result<Proposal, HostError> {
        self.read(ledger, |b| {
            b.proposal(index)
                .copied()
                .ok_or(BallotError::InvalidProposal(index))
        })
    }

    pub fn proposals(&self, ledger: &Address) -> Result<Vec<Proposal>, HostError> {
        self.read(ledger, |b| Ok(b.proposals().to_vec()))
    }

    pub fn voter(&self, ledger: &Address, voter: &Address) -> Result<Voter, HostError> {
        self.read(ledger, |b| Ok(b.voter(voter)))
    }

    pub fn winning_proposal(&self, ledger: &Address) -> Result<u32, HostError> {
        self.read(ledger, |b| Ok(b.winning_proposal()))
    }

    pub fn winner_name(&self, ledger: &Address) -> Result<ProposalName, HostError> {
        self.read(ledger, |b| b.winner_name())
    }

    fn read<T>(
        &self,
        ledger: &Address,
        f: impl FnOnce(&Ballot) -> Result<T, BallotError>,
    ) -> Result<T, HostError> {
        let state = self.state.lock();
        Ok(f(state.ledger(ledger)?)?)
    }
}

fn execute(
    ballot: &mut Ballot,
    sender: Address,
    call: &LedgerCall,
) -> Result<BallotEvent, HostError> {
    let event = match call {
        LedgerCall::GiveRightToVote { voter } => ballot.give_right_to_vote(sender, *voter)?,
        LedgerCall::Delegate { to } => ballot.delegate(sender, *to)?,
        LedgerCall::Vote { proposal } => ballot.vote(sender, *proposal)?,
        LedgerCall::Deploy { .. } => {
            return Err(HostError::InvalidTarget("deployment must not name a ledger"))
        }
    };
    Ok(event)
}
