use crate::error::CryptoError;
use ballot_types::{Address, Ed25519PublicKey, Ed25519Signature, SignedTransaction, Transaction};
use ed25519_dalek::{Signer, Verifier};
use rand::rngs::OsRng;
use std::fmt;
use zeroize::Zeroize;

/// Ed25519 keypair for transaction signing.
pub struct Keypair {
    signing_key: ed25519_dalek::SigningKey,
}

impl Keypair {
    /// Generate a new random keypair
    pub fn generate() -> Self {
        let mut csprng = OsRng;
        let signing_key = ed25519_dalek::SigningKey::generate(&mut csprng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = ed25519_dalek::SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Parse a hex-encoded 32-byte seed, with or without `0x`.
    pub fn from_hex(hex_seed: &str) -> Result<Self, CryptoError> {
        let digits = hex_seed.trim();
        let digits = digits.strip_prefix("0x").unwrap_or(digits);
        let mut bytes = hex::decode(digits)
            .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;

        if bytes.len() != 32 {
            let len = bytes.len();
            bytes.zeroize();
            return Err(CryptoError::InvalidSeedLength(len));
        }

        let mut seed = [0u8; 32];
        seed.copy_from_slice(&bytes);
        bytes.zeroize();
        let keypair = Self::from_seed(&seed);
        seed.zeroize();
        Ok(keypair)
    }

    /// Get the public key
    pub fn public_key(&self) -> Ed25519PublicKey {
        let bytes = self.signing_key.verifying_key().to_bytes();
        Ed25519PublicKey::from_bytes(bytes)
    }

    /// Get the address derived from this keypair
    pub fn address(&self) -> Address {
        self.public_key().to_address()
    }

    /// Sign a message
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        let signature = self.signing_key.sign(message);
        Ed25519Signature::from_bytes(signature.to_bytes())
    }

    /// Sign a transaction's signing hash and attach the public key
    pub fn sign_transaction(&self, tx: Transaction) -> SignedTransaction {
        let hash = tx.signing_hash();
        let signature = self.sign(hash.as_bytes());
        SignedTransaction::new(tx, signature, self.public_key())
    }

    /// Export private key bytes (CAUTION: sensitive)
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({})", self.address())
    }
}

impl Clone for Keypair {
    fn clone(&self) -> Self {
        let mut seed = self.to_bytes();
        let keypair = Self::from_seed(&seed);
        seed.zeroize();
        keypair
    }
}

/// Verify an ed25519 signature.
pub fn verify(
    public_key: &Ed25519PublicKey,
    message: &[u8],
    signature: &Ed25519Signature,
) -> Result<(), CryptoError> {
    let pk = ed25519_dalek::VerifyingKey::from_bytes(public_key.as_bytes())
        .map_err(|_| CryptoError::InvalidPublicKey)?;
    let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    pk.verify(message, &sig)
        .map_err(|_| CryptoError::VerificationFailed)
}

/// Verify that a signed transaction was signed by the key it carries.
pub fn verify_transaction(signed: &SignedTransaction) -> Result<(), CryptoError> {
    let hash = signed.transaction.signing_hash();
    verify(&signed.public_key, hash.as_bytes(), &signed.signature)
}
