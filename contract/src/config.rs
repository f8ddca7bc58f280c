//! Contract behaviour knobs.

use serde::{Deserialize, Serialize};

/// What `initVoting` does when a record already exists under the name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitiatePolicy {
    /// Fail with `AlreadyExists`, keeping the existing record and its ballots.
    #[default]
    Reject,
    /// Replace the existing record with a fresh open one.
    Overwrite,
}

/// Configuration for a [`VotingContract`](crate::VotingContract).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Re-initiation behaviour.
    #[serde(default)]
    pub initiate_policy: InitiatePolicy,

    /// Separator for option lists passed as a single string.
    #[serde(default = "default_option_delimiter")]
    pub option_delimiter: char,
}

fn default_option_delimiter() -> char {
    ','
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            initiate_policy: InitiatePolicy::default(),
            option_delimiter: default_option_delimiter(),
        }
    }
}
