//! World-state storage trait.

use crate::{KeyModification, StoreError};

/// Key-value view of the ledger inside one transaction.
///
/// Implementations are handed to the contract for the duration of a single
/// transaction. Writes become visible to later reads in the same transaction
/// and are persisted only when the owning backend commits.
pub trait StateStore {
    /// Read the current value at `key`, or `None` if it was never written.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` at `key` and append it to the key's history.
    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Every write ever made to `key`, oldest first.
    fn history_for_key(&self, key: &str) -> Result<Vec<KeyModification>, StoreError>;
}
