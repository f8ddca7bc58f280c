use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("ledger is corrupted: {0}")]
    Corruption(String),

    #[error("caller identity unavailable: {0}")]
    Identity(String),
}
