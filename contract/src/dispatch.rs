//! String-level entry point: routes a function name and its arguments to the
//! matching contract operation and encodes the response as canonical JSON.

use std::fmt;
use std::str::FromStr;

use ballotbox_store::StateStore;

use crate::codec::to_canonical_bytes;
use crate::context::TxContext;
use crate::engine::VotingContract;
use crate::error::ContractError;

/// Functions exposed to transaction submitters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    InitVoting,
    CloseVoting,
    ReadVoting,
    Vote,
    ReadWinner,
    ReadTally,
    ReadHistory,
}

impl Function {
    pub const ALL: [Function; 7] = [
        Self::InitVoting,
        Self::CloseVoting,
        Self::ReadVoting,
        Self::Vote,
        Self::ReadWinner,
        Self::ReadTally,
        Self::ReadHistory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InitVoting => "initVoting",
            Self::CloseVoting => "closeVoting",
            Self::ReadVoting => "readVoting",
            Self::Vote => "vote",
            Self::ReadWinner => "readWinner",
            Self::ReadTally => "readTally",
            Self::ReadHistory => "readHistory",
        }
    }

    /// Names of the expected arguments, in order.
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            Self::InitVoting => &["name", "options"],
            Self::Vote => &["name", "option"],
            _ => &["name"],
        }
    }

    /// Whether the function writes to the ledger.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Self::InitVoting | Self::CloseVoting | Self::Vote)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Function {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ContractError::UnknownFunction(s.to_string()))
    }
}

impl VotingContract {
    /// Run `function` with positional string `args` and return the JSON response.
    pub fn invoke<S: StateStore + ?Sized>(
        &self,
        ctx: &mut TxContext<'_, S>,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError> {
        let result = Function::from_str(function).and_then(|f| self.dispatch(ctx, f, args));
        if let Err(e) = &result {
            tracing::warn!(function, kind = e.kind(), "invocation rejected: {e}");
        }
        result
    }

    fn dispatch<S: StateStore + ?Sized>(
        &self,
        ctx: &mut TxContext<'_, S>,
        function: Function,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError> {
        let params = function.params();
        if args.len() != params.len() {
            return Err(ContractError::InvalidArgument(format!(
                "{function} expects {} argument(s) ({}), got {}",
                params.len(),
                params.join(", "),
                args.len()
            )));
        }
        let name = args[0].as_str();

        match function {
            Function::InitVoting => {
                to_canonical_bytes(&self.initiate_delimited(ctx, name, &args[1])?)
            }
            Function::CloseVoting => to_canonical_bytes(&self.close(ctx, name)?),
            Function::ReadVoting => to_canonical_bytes(&self.read_record(ctx, name)?),
            Function::Vote => to_canonical_bytes(&self.cast_vote(ctx, name, &args[1])?),
            Function::ReadWinner => to_canonical_bytes(&self.tally(ctx, name)?),
            Function::ReadTally => to_canonical_bytes(&self.counts(ctx, name)?),
            Function::ReadHistory => to_canonical_bytes(&self.history(ctx, name)?),
        }
    }
}
