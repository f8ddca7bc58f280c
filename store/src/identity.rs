//! Caller identity trait.

use crate::StoreError;
use ballotbox_types::VoterId;

/// Supplies the authenticated identity of whoever submitted the transaction.
pub trait CallerIdentity {
    fn caller_id(&self) -> Result<VoterId, StoreError>;
}
