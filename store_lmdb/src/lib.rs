//! LMDB ledger backend for the ballotbox contract.
//!
//! Implements `StateStore` from `ballotbox-store` using the `heed` LMDB bindings.
//! World state, the append-only history log and ledger metadata each live in
//! their own LMDB database inside a single environment.

pub mod environment;
pub mod error;
pub mod integrity;
pub mod txn;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use integrity::{check_data_dir, check_integrity, IntegrityReport};
pub use txn::{LedgerTxn, MAX_KEY_LEN};
