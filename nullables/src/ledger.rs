//! Nullable ledger: thread-safe in-memory world state with per-key history.

use ballotbox_store::{KeyModification, StateStore, StoreError};
use ballotbox_types::TxSeq;
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory ledger for testing.
///
/// Writes go through [`NullTxn`] and only reach the ledger when the
/// transaction commits, mirroring the LMDB backend.
pub struct NullLedger {
    state: Mutex<HashMap<String, Vec<u8>>>,
    history: Mutex<HashMap<String, Vec<KeyModification>>>,
    last_seq: Mutex<TxSeq>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HashMap::new()),
            history: Mutex::new(HashMap::new()),
            last_seq: Mutex::new(TxSeq::GENESIS),
        }
    }

    /// Begin a transaction. Dropping it without [`NullTxn::commit`] discards its writes.
    pub fn begin(&self) -> NullTxn<'_> {
        NullTxn {
            ledger: self,
            writes: Vec::new(),
        }
    }

    /// Run `f` in a transaction, committing only if it returns `Ok`.
    pub fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut NullTxn<'_>) -> Result<T, E>,
    {
        let mut txn = self.begin();
        let out = f(&mut txn)?;
        txn.commit();
        Ok(out)
    }

    /// Committed bytes at `key`.
    pub fn snapshot(&self, key: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().get(key).cloned()
    }

    /// Sequence number of the most recent committed write.
    pub fn last_seq(&self) -> TxSeq {
        *self.last_seq.lock().unwrap()
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Pending writes against a [`NullLedger`].
pub struct NullTxn<'a> {
    ledger: &'a NullLedger,
    writes: Vec<(String, Vec<u8>)>,
}

impl NullTxn<'_> {
    /// Apply the pending writes, assigning each the next sequence number.
    pub fn commit(self) {
        let mut state = self.ledger.state.lock().unwrap();
        let mut history = self.ledger.history.lock().unwrap();
        let mut seq = self.ledger.last_seq.lock().unwrap();
        for (key, value) in self.writes {
            *seq = seq.next();
            history.entry(key.clone()).or_default().push(KeyModification {
                tx_seq: *seq,
                value: value.clone(),
            });
            state.insert(key, value);
        }
    }
}

impl StateStore for NullTxn<'_> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some((_, value)) = self.writes.iter().rev().find(|(k, _)| k == key) {
            return Ok(Some(value.clone()));
        }
        Ok(self.ledger.snapshot(key))
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.writes.push((key.to_string(), value.to_vec()));
        Ok(())
    }

    fn history_for_key(&self, key: &str) -> Result<Vec<KeyModification>, StoreError> {
        let mut entries = self
            .ledger
            .history
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default();
        let mut seq = self.ledger.last_seq();
        for (k, value) in &self.writes {
            seq = seq.next();
            if k == key {
                entries.push(KeyModification {
                    tx_seq: seq,
                    value: value.clone(),
                });
            }
        }
        Ok(entries)
    }
}
