//! The voting record and its invariants.

use std::collections::{BTreeMap, HashSet};

use ballotbox_types::{RecordType, VoterId};
use serde::{Deserialize, Serialize};

use crate::error::ContractError;

/// Longest accepted voting name, in bytes.
///
/// The name is the ledger key, and ledger backends bound key size.
pub const MAX_NAME_LEN: usize = 256;

/// Persisted state of one named vote.
///
/// Fields are private so the invariants hold for every value of this type:
/// options are fixed and non-empty, `open` only ever goes from true to false,
/// and every ballot names one of the options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VotingRecord {
    name: String,
    options: Vec<String>,
    ballots: BTreeMap<VoterId, String>,
    open: bool,
    record_type: RecordType,
}

impl VotingRecord {
    /// Create a fresh, open record with no ballots.
    ///
    /// The name and options are kept byte for byte. The name must be non-empty
    /// and at most [`MAX_NAME_LEN`] bytes, there must be at least one option,
    /// and options must be non-empty and distinct.
    pub fn new<I, S>(name: &str, options: I) -> Result<Self, ContractError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if name.is_empty() {
            return Err(ContractError::InvalidArgument(
                "voting name must not be empty".to_string(),
            ));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(ContractError::InvalidArgument(format!(
                "voting name is {} bytes, limit is {MAX_NAME_LEN}",
                name.len()
            )));
        }

        let mut seen = HashSet::new();
        let mut list = Vec::new();
        for raw in options {
            let option = raw.as_ref();
            if option.is_empty() {
                return Err(ContractError::InvalidArgument(format!(
                    "voting {name} has an empty option"
                )));
            }
            if !seen.insert(option.to_string()) {
                return Err(ContractError::DuplicateOption {
                    name: name.to_string(),
                    option: option.to_string(),
                });
            }
            list.push(option.to_string());
        }
        if list.is_empty() {
            return Err(ContractError::InvalidArgument(format!(
                "voting {name} needs at least one option"
            )));
        }

        Ok(Self {
            name: name.to_string(),
            options: list,
            ballots: BTreeMap::new(),
            open: true,
            record_type: RecordType::Voting,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn ballots(&self) -> &BTreeMap<VoterId, String> {
        &self.ballots
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn offers(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Index of `option` in declaration order.
    pub fn option_index(&self, option: &str) -> Option<usize> {
        self.options.iter().position(|o| o == option)
    }

    /// Record `voter`'s choice, replacing any earlier ballot of theirs.
    pub fn cast(&mut self, voter: VoterId, option: &str) -> Result<(), ContractError> {
        if !self.open {
            return Err(ContractError::VotingClosed(self.name.clone()));
        }
        if !self.offers(option) {
            return Err(ContractError::InvalidOption {
                name: self.name.clone(),
                option: option.to_string(),
            });
        }
        self.ballots.insert(voter, option.to_string());
        Ok(())
    }

    /// Close the record. Fails if it was already closed.
    pub fn close(&mut self) -> Result<(), ContractError> {
        if !self.open {
            return Err(ContractError::AlreadyClosed(self.name.clone()));
        }
        self.open = false;
        Ok(())
    }

    /// Check the invariants of a record decoded from `key`.
    pub(crate) fn validate(&self, key: &str) -> Result<(), String> {
        if self.name != key {
            return Err(format!("record name {} does not match its key", self.name));
        }
        if self.options.is_empty() {
            return Err("record has no options".to_string());
        }
        let mut seen = HashSet::new();
        for option in &self.options {
            if option.is_empty() {
                return Err("record has an empty option".to_string());
            }
            if !seen.insert(option.as_str()) {
                return Err(format!("option {option} is listed twice"));
            }
        }
        for (voter, option) in &self.ballots {
            if !seen.contains(option.as_str()) {
                return Err(format!("ballot of {voter} names unknown option {option}"));
            }
        }
        Ok(())
    }
}

/// Split a delimiter-separated option list as supplied on the wire.
///
/// Entries are not trimmed: `"a, b"` offers `"a"` and `" b"`.
pub fn split_options(raw: &str, delimiter: char) -> Vec<String> {
    raw.split(delimiter).map(str::to_string).collect()
}
