//! Nullable caller identity: a fixed identity for testing.

use ballotbox_store::{CallerIdentity, StoreError};
use ballotbox_types::VoterId;

/// Always reports the same caller, or always fails when built with
/// [`NullIdentity::unavailable`].
pub struct NullIdentity {
    id: Option<VoterId>,
}

impl NullIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(VoterId::new(id)),
        }
    }

    /// An identity source that cannot authenticate anybody.
    pub fn unavailable() -> Self {
        Self { id: None }
    }
}

impl CallerIdentity for NullIdentity {
    fn caller_id(&self) -> Result<VoterId, StoreError> {
        self.id
            .clone()
            .ok_or_else(|| StoreError::Identity("no authenticated caller".to_string()))
    }
}
