use ballotbox_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("no voting with name {0} found")]
    NotFound(String),

    #[error("the voting {0} is already closed")]
    AlreadyClosed(String),

    #[error("the voting {0} is closed, no more votes are accepted")]
    VotingClosed(String),

    #[error("option {option} is not offered by voting {name}")]
    InvalidOption { name: String, option: String },

    #[error("the voting {0} is still open")]
    StillOpen(String),

    #[error("the voting {0} has no votes")]
    NoVotes(String),

    #[error("a voting with name {0} already exists")]
    AlreadyExists(String),

    #[error("option {option} is listed more than once for voting {name}")]
    DuplicateOption { name: String, option: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown function {0}")]
    UnknownFunction(String),

    #[error("record at key {key} is corrupted: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("failed to encode response: {0}")]
    Encode(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ContractError {
    /// Stable tag for tooling that needs to branch on the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFound",
            Self::AlreadyClosed(_) => "AlreadyClosed",
            Self::VotingClosed(_) => "VotingClosed",
            Self::InvalidOption { .. } => "InvalidOption",
            Self::StillOpen(_) => "StillOpen",
            Self::NoVotes(_) => "NoVotes",
            Self::AlreadyExists(_) => "AlreadyExists",
            Self::DuplicateOption { .. } => "DuplicateOption",
            Self::InvalidArgument(_) => "InvalidArgument",
            Self::UnknownFunction(_) => "UnknownFunction",
            Self::Corrupt { .. } => "Corrupt",
            Self::Encode(_) => "Encode",
            Self::Store(_) => "Store",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_record_and_argument() {
        let err = ContractError::InvalidOption {
            name: "Friday".into(),
            option: "Sushi".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Friday"));
        assert!(msg.contains("Sushi"));
        assert_eq!(err.kind(), "InvalidOption");
    }

    #[test]
    fn store_errors_keep_their_message() {
        let err = ContractError::from(StoreError::Backend("disk full".into()));
        assert_eq!(err.to_string(), "storage backend error: disk full");
        assert_eq!(err.kind(), "Store");
    }
}
