//! Errors raised while constructing primitive types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("voter identity must not be empty")]
    EmptyVoterId,
}
