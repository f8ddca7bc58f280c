//! Opaque voter identity supplied by the caller-identity subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// An authenticated caller identity.
///
/// The ledger never interprets the contents: two identities are the same voter
/// exactly when their strings are equal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoterId(String);

impl VoterId {
    /// Wrap a raw identity string without validation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Wrap a raw identity string, rejecting the empty identity.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if s.is_empty() {
            return Err(TypesError::EmptyVoterId);
        }
        Ok(Self(s))
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VoterId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for VoterId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(VoterId::parse(""), Err(TypesError::EmptyVoterId));
        assert_eq!(VoterId::parse("alice").unwrap().as_str(), "alice");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = VoterId::new("x509::CN=alice");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"x509::CN=alice\"");
    }
}
