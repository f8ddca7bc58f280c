//! Ledger-wide transaction sequence numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a committed write in the ledger's append-only log.
///
/// Sequence numbers start at 1 and grow by one per committed write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxSeq(u64);

impl TxSeq {
    /// The sequence number before any write has been committed.
    pub const GENESIS: Self = Self(0);

    pub fn new(seq: u64) -> Self {
        Self(seq)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The sequence number following this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Big-endian bytes, so lexicographic key order matches numeric order.
    pub fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for TxSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
