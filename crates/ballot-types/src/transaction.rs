use crate::address::Address;
use crate::hash::Hash;
use crate::name::ProposalName;
use crate::signature::{Ed25519PublicKey, Ed25519Signature};
use std::fmt;

/// A state-changing call against the ledger host.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum LedgerCall {
    /// Create a new ballot; the sender becomes its chairperson
    Deploy { proposals: Vec<ProposalName> },
    /// Chairperson grants one vote to `voter`
    GiveRightToVote { voter: Address },
    /// Hand the sender's weight to `to`
    Delegate { to: Address },
    /// Cast the sender's weight for a proposal index
    Vote { proposal: u32 },
}

impl LedgerCall {
    /// Tag byte used in the signing encoding
    fn tag(&self) -> u8 {
        match self {
            LedgerCall::Deploy { .. } => 0,
            LedgerCall::GiveRightToVote { .. } => 1,
            LedgerCall::Delegate { .. } => 2,
            LedgerCall::Vote { .. } => 3,
        }
    }

    /// Method name as exposed over the wire
    pub fn method_name(&self) -> &'static str {
        match self {
            LedgerCall::Deploy { .. } => "deploy",
            LedgerCall::GiveRightToVote { .. } => "giveRightToVote",
            LedgerCall::Delegate { .. } => "delegate",
            LedgerCall::Vote { .. } => "vote",
        }
    }

    fn encode_into(&self, data: &mut Vec<u8>) {
        data.push(self.tag());
        match self {
            LedgerCall::Deploy { proposals } => {
                data.extend_from_slice(&(proposals.len() as u32).to_le_bytes());
                for name in proposals {
                    data.extend_from_slice(name.as_bytes());
                }
            }
            LedgerCall::GiveRightToVote { voter } => data.extend_from_slice(voter.as_bytes()),
            LedgerCall::Delegate { to } => data.extend_from_slice(to.as_bytes()),
            LedgerCall::Vote { proposal } => data.extend_from_slice(&proposal.to_le_bytes()),
        }
    }
}

impl fmt::Display for LedgerCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerCall::Deploy { proposals } => {
                let names: Vec<String> = proposals.iter().map(|p| p.to_string()).collect();
                write!(f, "deploy([{}])", names.join(", "))
            }
            LedgerCall::GiveRightToVote { voter } => write!(f, "giveRightToVote({})", voter),
            LedgerCall::Delegate { to } => write!(f, "delegate({})", to),
            LedgerCall::Vote { proposal } => write!(f, "vote({})", proposal),
        }
    }
}

/// Unsigned transaction data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct Transaction {
    /// Chain ID (replay protection)
    pub chain_id: u64,
    /// Sender's nonce (increments with each accepted TX)
    pub nonce: u64,
    /// Target ledger (None = deployment)
    pub to: Option<Address>,
    /// The ledger call
    pub call: LedgerCall,
}

impl Transaction {
    pub fn new(chain_id: u64, nonce: u64, to: Option<Address>, call: LedgerCall) -> Self {
        Self { chain_id, nonce, to, call }
    }

    /// Deployment transaction for a new ballot
    pub fn deploy(chain_id: u64, nonce: u64, proposals: Vec<ProposalName>) -> Self {
        Self::new(chain_id, nonce, None, LedgerCall::Deploy { proposals })
    }

    /// Check if this is a ledger creation transaction
    pub fn is_create(&self) -> bool {
        self.to.is_none()
    }

    /// Compute the hash that should be signed
    pub fn signing_hash(&self) -> Hash {
        let mut data = Vec::with_capacity(64);
        data.extend_from_slice(&self.chain_id.to_le_bytes());
        data.extend_from_slice(&self.nonce.to_le_bytes());
        match self.to {
            Some(to) => {
                data.push(1);
                data.extend_from_slice(to.as_bytes());
            }
            None => data.push(0),
        }
        self.call.encode_into(&mut data);
        Hash::compute(&data)
    }
}

/// Transaction with signature attached.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: Ed25519Signature,
    pub public_key: Ed25519PublicKey,
}

impl SignedTransaction {
    pub fn new(
        transaction: Transaction,
        signature: Ed25519Signature,
        public_key: Ed25519PublicKey,
    ) -> Self {
        Self { transaction, signature, public_key }
    }

    /// Sender address, derived from the attached public key
    pub fn sender(&self) -> Address {
        self.public_key.to_address()
    }

    /// Transaction hash: covers the signed payload and the signature
    pub fn hash(&self) -> Hash {
        let signing_hash = self.transaction.signing_hash();
        Hash::compute_multi(&[signing_hash.as_bytes(), self.signature.as_bytes()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote_tx(nonce: u64, proposal: u32) -> Transaction {
        Transaction::new(
            1337,
            nonce,
            Some(Address::from_bytes([1u8; 20])),
            LedgerCall::Vote { proposal },
        )
    }

    #[test]
    fn test_signing_hash_covers_every_field() {
        let base = vote_tx(0, 1);
        assert_eq!(base.signing_hash(), vote_tx(0, 1).signing_hash());
        assert_ne!(base.signing_hash(), vote_tx(1, 1).signing_hash());
        assert_ne!(base.signing_hash(), vote_tx(0, 2).signing_hash());

        let mut other_chain = base.clone();
        other_chain.chain_id = 1;
        assert_ne!(base.signing_hash(), other_chain.signing_hash());

        let mut other_target = base.clone();
        other_target.to = Some(Address::from_bytes([2u8; 20]));
        assert_ne!(base.signing_hash(), other_target.signing_hash());
    }

    #[test]
    fn test_calls_with_same_payload_bytes_differ() {
        let voter = Address::from_bytes([5u8; 20]);
        let grant = Transaction::new(1, 0, Some(voter), LedgerCall::GiveRightToVote { voter });
        let delegate = Transaction::new(1, 0, Some(voter), LedgerCall::Delegate { to: voter });
        assert_ne!(grant.signing_hash(), delegate.signing_hash());
    }

    #[test]
    fn test_deploy_is_create() {
        let names = vec![ProposalName::encode("P1").unwrap()];
        let tx = Transaction::deploy(1337, 0, names);
        assert!(tx.is_create());
        assert!(!vote_tx(0, 0).is_create());
    }

    #[test]
    fn test_signed_hash_depends_on_signature() {
        let tx = vote_tx(0, 0);
        let key = Ed25519PublicKey::from_bytes([3u8; 32]);
        let a = SignedTransaction::new(tx.clone(), Ed25519Signature::from_bytes([1u8; 64]), key);
        let b = SignedTransaction::new(tx, Ed25519Signature::from_bytes([2u8; 64]), key);
        assert_ne!(a.hash(), b.hash());
        assert_eq!(a.sender(), key.to_address());
    }

    #[test]
    fn test_call_display() {
        assert_eq!(LedgerCall::Vote { proposal: 2 }.to_string(), "vote(2)");
        let call = LedgerCall::Deploy {
            proposals: vec![
                ProposalName::encode("P1").unwrap(),
                ProposalName::encode("P2").unwrap(),
            ],
        };
        assert_eq!(call.to_string(), "deploy([P1, P2])");
        assert_eq!(call.method_name(), "deploy");
    }
}
