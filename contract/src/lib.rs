//! Closed-ballot voting over a shared, audited key-value ledger.
//!
//! A vote is a single [`VotingRecord`] stored under its name. Its lifecycle is
//! `Uninitialized → Open → Closed`:
//!
//! - `initVoting` creates the record with a fixed set of options.
//! - `vote` records (or replaces) the caller's ballot while the record is open.
//! - `closeVoting` closes the record exactly once.
//! - `readWinner` tallies a closed record deterministically.
//!
//! Every operation is one read and at most one write against a [`StateStore`],
//! so the ledger's transaction log is the audit trail.
//!
//! [`StateStore`]: ballotbox_store::StateStore

pub mod codec;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod record;
pub mod tally;

pub use config::{ContractConfig, InitiatePolicy};
pub use context::TxContext;
pub use dispatch::Function;
pub use engine::{HistoryEntry, VotingContract};
pub use error::ContractError;
pub use record::{VotingRecord, MAX_NAME_LEN};
pub use tally::{OptionCount, Winner};
