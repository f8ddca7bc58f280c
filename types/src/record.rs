//! Discriminator for record kinds sharing the ledger key namespace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of record stored under a ledger key.
///
/// Only voting records exist today; decoding any other tag fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Voting,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Voting => "voting",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
