//! Abstract ledger traits consumed by the voting contract.
//!
//! Every ledger backend (LMDB, in-memory for testing) implements these
//! traits. The contract depends only on the traits, never on a backend.

pub mod error;
pub mod history;
pub mod identity;
pub mod state;

pub use error::StoreError;
pub use history::KeyModification;
pub use identity::CallerIdentity;
pub use state::StateStore;
