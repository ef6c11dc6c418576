use thiserror::Error;

/// Errors that can occur in type operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypesError {
    #[error("Invalid address format: {0}")]
    InvalidAddressFormat(String),

    #[error("Invalid address length: expected 20, got {0}")]
    InvalidAddressLength(usize),

    #[error("Invalid hash length: expected 32, got {0}")]
    InvalidHashLength(usize),

    #[error("Invalid signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength { expected: usize, actual: usize },

    #[error("Invalid public key length: expected {expected}, got {actual}")]
    InvalidPublicKeyLength { expected: usize, actual: usize },

    #[error("Proposal name too long: max 32 bytes, got {0}")]
    NameTooLong(usize),

    #[error("Proposal name is not valid UTF-8")]
    InvalidNameEncoding,

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<hex::FromHexError> for TypesError {
    fn from(e: hex::FromHexError) -> Self {
        TypesError::InvalidHex(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TypesError::NameTooLong(40);
        assert!(err.to_string().contains("40"));

        let err = TypesError::InvalidSignatureLength { expected: 64, actual: 3 };
        assert!(err.to_string().contains("64"));
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn test_from_hex_error() {
        let err: TypesError = hex::decode("zz").unwrap_err().into();
        assert!(matches!(err, TypesError::InvalidHex(_)));
    }
}
