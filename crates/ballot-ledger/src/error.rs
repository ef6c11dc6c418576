use thiserror::Error;

/// Errors that can occur in ballot operations.
///
/// Every variant is a precondition failure detected before any state is
/// touched, so a failed call leaves the ballot unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BallotError {
    #[error("Only chairperson can give right to vote.")]
    Unauthorized,

    #[error("The voter already voted.")]
    AlreadyVoted,

    #[error("The voter already has the right to vote.")]
    AlreadyEnfranchised,

    #[error("Has no right to vote")]
    NoRight,

    #[error("Self-delegation is disallowed.")]
    SelfDelegation,

    #[error("Found loop in delegation.")]
    DelegationCycle,

    #[error("Invalid proposal index: {0}")]
    InvalidProposal(u32),

    #[error("Vote weight overflow")]
    Overflow,
}

impl BallotError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            BallotError::Unauthorized => "Unauthorized",
            BallotError::AlreadyVoted => "AlreadyVoted",
            BallotError::AlreadyEnfranchised => "AlreadyEnfranchised",
            BallotError::NoRight => "NoRight",
            BallotError::SelfDelegation => "SelfDelegation",
            BallotError::DelegationCycle => "DelegationCycle",
            BallotError::InvalidProposal(_) => "InvalidProposal",
            BallotError::Overflow => "Overflow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            BallotError::Unauthorized.to_string(),
            "Only chairperson can give right to vote."
        );
        assert_eq!(BallotError::NoRight.to_string(), "Has no right to vote");
        assert!(BallotError::InvalidProposal(7).to_string().contains('7'));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(BallotError::DelegationCycle.kind(), "DelegationCycle");
        assert_eq!(BallotError::InvalidProposal(3).kind(), "InvalidProposal");
    }
}
