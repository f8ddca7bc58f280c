//! Fundamental types for the ballotbox voting ledger.
//!
//! This crate defines the primitives shared by every other crate in the workspace:
//! voter identities, record discriminators and ledger sequence numbers.

pub mod error;
pub mod record;
pub mod seq;
pub mod voter;

pub use error::TypesError;
pub use record::RecordType;
pub use seq::TxSeq;
pub use voter::VoterId;
