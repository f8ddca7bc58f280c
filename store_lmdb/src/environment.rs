//! LMDB environment setup.

use std::path::Path;

use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvOpenOptions};

use ballotbox_store::StoreError;

use crate::txn::LedgerTxn;
use crate::LmdbError;

pub(crate) const STATE_DB: &str = "state";
pub(crate) const HISTORY_DB: &str = "history";
pub(crate) const META_DB: &str = "meta";

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    pub(crate) env: Env,
    /// Record key → current canonical bytes.
    pub(crate) state_db: Database<Str, Bytes>,
    /// History key (see [`crate::txn::history_prefix`]) → bincode `KeyModification`.
    pub(crate) history_db: Database<Bytes, Bytes>,
    /// Ledger bookkeeping such as the last assigned sequence number.
    pub(crate) meta_db: Database<Str, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process per path and the
        // backing files are not modified by anything but LMDB.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(max_dbs)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let state_db: Database<Str, Bytes> = env.create_database(&mut wtxn, Some(STATE_DB))?;
        let history_db: Database<Bytes, Bytes> =
            env.create_database(&mut wtxn, Some(HISTORY_DB))?;
        let meta_db: Database<Str, Bytes> = env.create_database(&mut wtxn, Some(META_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB ledger");

        Ok(Self {
            env,
            state_db,
            history_db,
            meta_db,
        })
    }

    /// Raw heed environment, for integrity checks.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Begin a ledger transaction. Dropping it without committing aborts it.
    pub fn begin(&self) -> Result<LedgerTxn<'_>, LmdbError> {
        LedgerTxn::new(self)
    }

    /// Run `f` in a ledger transaction, committing only if it returns `Ok`.
    pub fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut LedgerTxn<'_>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut txn = self.begin().map_err(StoreError::from)?;
        let out = f(&mut txn)?;
        txn.commit().map_err(StoreError::from)?;
        Ok(out)
    }
}
