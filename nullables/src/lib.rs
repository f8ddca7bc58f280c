//! Nullable infrastructure for deterministic testing.
//!
//! The contract reaches the outside world only through the `StateStore` and
//! `CallerIdentity` traits. This crate provides test-friendly implementations
//! that keep everything in memory and never touch the filesystem.
//!
//! Usage: swap the LMDB ledger and real identity source for nullables in tests.

pub mod identity;
pub mod ledger;

pub use identity::NullIdentity;
pub use ledger::{NullLedger, NullTxn};
