//! Serialization implementations for ballot-types
//!
//! Text forms (serde) are `0x` hex strings; binary forms (borsh) are the raw
//! fixed-width bytes.

use crate::*;

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    fn strip_0x(s: &str) -> &str {
        s.strip_prefix("0x").unwrap_or(s)
    }

    // Hash
    impl Serialize for Hash {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.to_string().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Hash {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Hash::from_str(&s).map_err(serde::de::Error::custom)
        }
    }

    // Address
    impl Serialize for Address {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.to_string().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Address {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Address::from_str(&s).map_err(serde::de::Error::custom)
        }
    }

    // ProposalName travels as its bytes32 hex form
    impl Serialize for ProposalName {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.to_hex().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for ProposalName {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            ProposalName::from_hex(&s).map_err(serde::de::Error::custom)
        }
    }

    // Ed25519Signature
    impl Serialize for Ed25519Signature {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            format!("0x{}", hex::encode(self.as_bytes())).serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Ed25519Signature {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            let bytes = hex::decode(strip_0x(&s)).map_err(serde::de::Error::custom)?;
            Ed25519Signature::from_slice(&bytes).map_err(serde::de::Error::custom)
        }
    }

    // Ed25519PublicKey
    impl Serialize for Ed25519PublicKey {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            format!("0x{}", hex::encode(self.as_bytes())).serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Ed25519PublicKey {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            let bytes = hex::decode(strip_0x(&s)).map_err(serde::de::Error::custom)?;
            Ed25519PublicKey::from_slice(&bytes).map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(feature = "borsh")]
mod borsh_impls {
    use super::*;
    use borsh::{BorshDeserialize, BorshSerialize};

    // Hash
    impl BorshSerialize for Hash {
        fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
            writer.write_all(self.as_bytes())
        }
    }

    impl BorshDeserialize for Hash {
        fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
            let mut bytes = [0u8; 32];
            reader.read_exact(&mut bytes)?;
            Ok(Hash::from_bytes(bytes))
        }
    }

    // Address
    impl BorshSerialize for Address {
        fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
            writer.write_all(self.as_bytes())
        }
    }

    impl BorshDeserialize for Address {
        fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
            let mut bytes = [0u8; 20];
            reader.read_exact(&mut bytes)?;
            Ok(Address::from_bytes(bytes))
        }
    }

    // Ed25519Signature
    impl BorshSerialize for Ed25519Signature {
        fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
            writer.write_all(self.as_bytes())
        }
    }

    impl BorshDeserialize for Ed25519Signature {
        fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
            let mut bytes = [0u8; 64];
            reader.read_exact(&mut bytes)?;
            Ok(Ed25519Signature::from_bytes(bytes))
        }
    }

    // Ed25519PublicKey
    impl BorshSerialize for Ed25519PublicKey {
        fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
            writer.write_all(self.as_bytes())
        }
    }

    impl BorshDeserialize for Ed25519PublicKey {
        fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
            let mut bytes = [0u8; 32];
            reader.read_exact(&mut bytes)?;
            Ok(Ed25519PublicKey::from_bytes(bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(feature = "serde")]
    fn test_address_serde_is_hex_string() {
        let addr = Address::from_bytes([0x11u8; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "11".repeat(20)));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_call_serde_shape() {
        let call = LedgerCall::Vote { proposal: 1 };
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["type"], "vote");
        assert_eq!(json["proposal"], 1);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_receipt_json_field_names() {
        let receipt = TransactionReceipt::new(Hash::compute(b"x"), 7, Address::ZERO, None);
        let json = serde_json::to_value(&receipt).unwrap();
        assert!(json.get("transactionHash").is_some());
        assert_eq!(json["blockNumber"], 7);
        assert!(json["ledgerAddress"].is_null());
    }

    #[test]
    #[cfg(feature = "borsh")]
    fn test_signed_transaction_wire_format() {
        let tx = Transaction::deploy(
            1337,
            4,
            vec![ProposalName::encode("P1").unwrap(), ProposalName::encode("P2").unwrap()],
        );
        let signed = SignedTransaction::new(
            tx,
            Ed25519Signature::from_bytes([8u8; 64]),
            Ed25519PublicKey::from_bytes([9u8; 32]),
        );
        let encoded = borsh::to_vec(&signed).unwrap();
        let decoded: SignedTransaction = borsh::from_slice(&encoded).unwrap();
        assert_eq!(decoded, signed);
        assert!(borsh::from_slice::<SignedTransaction>(&encoded[..10]).is_err());
    }
}
