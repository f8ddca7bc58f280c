//! Append-only per-key history entries.

use ballotbox_types::TxSeq;
use serde::{Deserialize, Serialize};

/// One committed write to a ledger key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyModification {
    /// Ledger-wide sequence number of the write.
    pub tx_seq: TxSeq,
    /// The exact bytes written.
    pub value: Vec<u8>,
}
