//! Ledger transactions: one LMDB write transaction per contract invocation.
//!
//! # Usage
//!
//! ```ignore
//! let mut txn = env.begin()?;
//! txn.put_state("Friday", &record_bytes)?;
//! txn.commit()?;
//! ```
//!
//! If the transaction is dropped without calling [`LedgerTxn::commit`], every
//! write is rolled back (the underlying LMDB transaction is aborted).

use heed::RwTxn;

use ballotbox_store::{KeyModification, StateStore, StoreError};
use ballotbox_types::TxSeq;

use crate::environment::LmdbEnvironment;
use crate::LmdbError;

const LAST_SEQ_KEY: &str = "last_seq";

/// LMDB's compiled-in key size limit.
const LMDB_MAX_KEY_SIZE: usize = 511;

/// Longest state key whose history key still fits: 4-byte length prefix and
/// 8-byte sequence around the key itself.
pub const MAX_KEY_LEN: usize = LMDB_MAX_KEY_SIZE - 4 - 8;

/// A write transaction over the LMDB ledger.
pub struct LedgerTxn<'a> {
    txn: RwTxn<'a>,
    env: &'a LmdbEnvironment,
    last_seq: TxSeq,
}

/// Prefix shared by every history entry of `key`: `len(key) as u32 BE ++ key`.
///
/// Length-prefixing keeps one key's entries from matching another key that
/// merely starts with the same bytes.
pub(crate) fn history_prefix(key: &str) -> Vec<u8> {
    let bytes = key.as_bytes();
    let mut prefix = Vec::with_capacity(4 + bytes.len() + 8);
    prefix.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    prefix.extend_from_slice(bytes);
    prefix
}

fn history_key(key: &str, seq: TxSeq) -> Vec<u8> {
    let mut hk = history_prefix(key);
    hk.extend_from_slice(&seq.to_be_bytes());
    hk
}

impl<'a> LedgerTxn<'a> {
    pub(crate) fn new(env: &'a LmdbEnvironment) -> Result<Self, LmdbError> {
        let txn = env.env.write_txn()?;
        let last_seq = match env.meta_db.get(&txn, LAST_SEQ_KEY)? {
            Some(bytes) => {
                let arr: [u8; 8] = bytes.try_into().map_err(|_| {
                    LmdbError::Corruption("last_seq has unexpected byte length".to_string())
                })?;
                TxSeq::new(u64::from_le_bytes(arr))
            }
            None => TxSeq::GENESIS,
        };
        Ok(Self { txn, env, last_seq })
    }

    /// Sequence number of the most recent write visible to this transaction.
    pub fn last_seq(&self) -> TxSeq {
        self.last_seq
    }

    /// Persist every write made in this transaction.
    pub fn commit(mut self) -> Result<(), LmdbError> {
        self.env
            .meta_db
            .put(&mut self.txn, LAST_SEQ_KEY, &self.last_seq.as_u64().to_le_bytes())?;
        self.txn.commit()?;
        Ok(())
    }
}

impl StateStore for LedgerTxn<'_> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if key.len() > MAX_KEY_LEN {
            return Ok(None);
        }
        let val = self
            .env
            .state_db
            .get(&self.txn, key)
            .map_err(LmdbError::from)?;
        Ok(val.map(|v| v.to_vec()))
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        if key.len() > MAX_KEY_LEN {
            return Err(LmdbError::KeyTooLong {
                len: key.len(),
                max: MAX_KEY_LEN,
            }
            .into());
        }
        let seq = self.last_seq.next();
        let entry = KeyModification {
            tx_seq: seq,
            value: value.to_vec(),
        };
        let encoded = bincode::serialize(&entry).map_err(LmdbError::from)?;

        self.env
            .state_db
            .put(&mut self.txn, key, value)
            .map_err(LmdbError::from)?;
        self.env
            .history_db
            .put(&mut self.txn, &history_key(key, seq)[..], &encoded[..])
            .map_err(LmdbError::from)?;

        self.last_seq = seq;
        Ok(())
    }

    fn history_for_key(&self, key: &str) -> Result<Vec<KeyModification>, StoreError> {
        if key.len() > MAX_KEY_LEN {
            return Ok(Vec::new());
        }
        let prefix = history_prefix(key);
        let iter = self
            .env
            .history_db
            .prefix_iter(&self.txn, &prefix[..])
            .map_err(LmdbError::from)?;

        let mut entries = Vec::new();
        for item in iter {
            let (_, bytes) = item.map_err(LmdbError::from)?;
            let entry: KeyModification = bincode::deserialize(bytes).map_err(LmdbError::from)?;
            entries.push(entry);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_env() -> (tempfile::TempDir, LmdbEnvironment) {
        let dir = tempfile::tempdir().expect("temp dir");
        let env = LmdbEnvironment::open(dir.path(), 8, 16 * 1024 * 1024).expect("open env");
        (dir, env)
    }

    #[test]
    fn put_get_within_and_after_commit() {
        let (_dir, env) = temp_env();
        let mut txn = env.begin().unwrap();
        txn.put_state("Friday", b"v1").unwrap();
        assert_eq!(txn.get_state("Friday").unwrap(), Some(b"v1".to_vec()));
        txn.commit().unwrap();

        let txn = env.begin().unwrap();
        assert_eq!(txn.get_state("Friday").unwrap(), Some(b"v1".to_vec()));
        assert_eq!(txn.get_state("Saturday").unwrap(), None);
        assert_eq!(txn.last_seq(), TxSeq::new(1));
    }

    #[test]
    fn dropped_txn_rolls_back() {
        let (_dir, env) = temp_env();
        {
            let mut txn = env.begin().unwrap();
            txn.put_state("Friday", b"v1").unwrap();
        }
        let txn = env.begin().unwrap();
        assert_eq!(txn.get_state("Friday").unwrap(), None);
        assert!(txn.history_for_key("Friday").unwrap().is_empty());
        assert_eq!(txn.last_seq(), TxSeq::GENESIS);
    }

    #[test]
    fn transact_commits_only_on_ok() {
        let (_dir, env) = temp_env();
        let failed: Result<(), StoreError> = env.transact(|txn| {
            txn.put_state("Friday", b"v1")?;
            Err(StoreError::Backend("rejected".to_string()))
        });
        assert!(failed.is_err());

        env.transact::<_, StoreError, _>(|txn| txn.put_state("Friday", b"v2"))
            .unwrap();
        let txn = env.begin().unwrap();
        assert_eq!(txn.get_state("Friday").unwrap(), Some(b"v2".to_vec()));
        assert_eq!(txn.last_seq(), TxSeq::new(1));
    }

    #[test]
    fn history_is_per_key_and_ordered() {
        let (_dir, env) = temp_env();
        for (key, value) in [("ab", "1"), ("a", "x"), ("ab", "2"), ("abc", "y"), ("ab", "3")] {
            env.transact::<_, StoreError, _>(|txn| txn.put_state(key, value.as_bytes()))
                .unwrap();
        }

        let txn = env.begin().unwrap();
        let history = txn.history_for_key("ab").unwrap();
        let seqs: Vec<u64> = history.iter().map(|m| m.tx_seq.as_u64()).collect();
        assert_eq!(seqs, [1, 3, 5]);
        let values: Vec<&[u8]> = history.iter().map(|m| m.value.as_slice()).collect();
        assert_eq!(values, [b"1" as &[u8], b"2", b"3"]);
        assert_eq!(txn.history_for_key("a").unwrap().len(), 1);
    }

    #[test]
    fn state_and_history_survive_reopen() {
        let dir = tempfile::tempdir().expect("temp dir");
        {
            let env = LmdbEnvironment::open(dir.path(), 8, 16 * 1024 * 1024).unwrap();
            env.transact::<_, StoreError, _>(|txn| txn.put_state("Friday", b"v1"))
                .unwrap();
            env.transact::<_, StoreError, _>(|txn| txn.put_state("Friday", b"v2"))
                .unwrap();
        }
        let env = LmdbEnvironment::open(dir.path(), 8, 16 * 1024 * 1024).unwrap();
        let txn = env.begin().unwrap();
        assert_eq!(txn.get_state("Friday").unwrap(), Some(b"v2".to_vec()));
        assert_eq!(txn.history_for_key("Friday").unwrap().len(), 2);
        assert_eq!(txn.last_seq(), TxSeq::new(2));
    }

    #[test]
    fn longest_key_fits_state_and_history() {
        let (_dir, env) = temp_env();
        let key = "k".repeat(MAX_KEY_LEN);
        env.transact::<_, StoreError, _>(|txn| txn.put_state(&key, b"v1"))
            .unwrap();

        let txn = env.begin().unwrap();
        assert_eq!(txn.get_state(&key).unwrap(), Some(b"v1".to_vec()));
        assert_eq!(txn.history_for_key(&key).unwrap().len(), 1);
    }

    #[test]
    fn oversized_key_is_refused_with_a_clear_error() {
        let (_dir, env) = temp_env();
        for len in [MAX_KEY_LEN + 1, 505, 600] {
            let key = "k".repeat(len);
            let mut txn = env.begin().unwrap();
            let err = txn.put_state(&key, b"v1").unwrap_err();
            assert!(err.to_string().contains(&format!("{MAX_KEY_LEN}-byte limit")));
            assert_eq!(txn.get_state(&key).unwrap(), None);
            assert!(txn.history_for_key(&key).unwrap().is_empty());
        }
        assert_eq!(env.begin().unwrap().last_seq(), TxSeq::GENESIS);
    }
}
