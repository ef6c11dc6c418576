//! Fixed-width proposal names.
//!
//! Names travel as 32-byte strings: the UTF-8 bytes of the name followed by
//! zero padding. Callers encode human-readable text before deployment and
//! decode it back when reading results.

use crate::error::TypesError;
use std::fmt;
use std::str::FromStr;

/// A proposal name stored as a zero-padded 32-byte string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct ProposalName([u8; 32]);

impl ProposalName {
    pub const LEN: usize = 32;

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Encode a text name into its fixed-width form.
    pub fn encode(name: &str) -> Result<Self, TypesError> {
        let raw = name.as_bytes();
        if raw.len() > Self::LEN {
            return Err(TypesError::NameTooLong(raw.len()));
        }
        let mut bytes = [0u8; 32];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
    }

    /// Decode back to text, dropping the zero padding.
    pub fn decode(&self) -> Result<String, TypesError> {
        let end = self.0.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        std::str::from_utf8(&self.0[..end])
            .map(str::to_owned)
            .map_err(|_| TypesError::InvalidNameEncoding)
    }

    /// Hex form of the full 32 bytes, `0x` prefixed.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse the `0x`-prefixed hex form produced by [`ProposalName::to_hex`].
    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)?;
        if bytes.len() != Self::LEN {
            return Err(TypesError::Serialization(format!(
                "bytes32 expected, got {} bytes",
                bytes.len()
            )));
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl fmt::Display for ProposalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decode() {
            Ok(name) => f.write_str(&name),
            Err(_) => f.write_str(&self.to_hex()),
        }
    }
}

impl fmt::Debug for ProposalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProposalName({:?})", self.to_string())
    }
}

impl FromStr for ProposalName {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::encode(s)
    }
}
