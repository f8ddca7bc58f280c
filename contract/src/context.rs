//! Per-transaction context handed to every contract operation.

use ballotbox_store::{CallerIdentity, StateStore};
use ballotbox_types::VoterId;

use crate::error::ContractError;

/// The ledger view and caller identity of a single transaction.
pub struct TxContext<'a, S: StateStore + ?Sized> {
    store: &'a mut S,
    identity: &'a dyn CallerIdentity,
}

impl<'a, S: StateStore + ?Sized> TxContext<'a, S> {
    pub fn new(store: &'a mut S, identity: &'a dyn CallerIdentity) -> Self {
        Self { store, identity }
    }

    pub fn store(&self) -> &S {
        &*self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut *self.store
    }

    /// Identity of whoever submitted the transaction.
    pub fn caller_id(&self) -> Result<VoterId, ContractError> {
        let id = self.identity.caller_id()?;
        if id.is_empty() {
            return Err(ContractError::InvalidArgument(
                "caller identity is empty".to_string(),
            ));
        }
        Ok(id)
    }
}
