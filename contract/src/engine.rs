//! Core voting engine: the state transitions of a single voting record.
//!
//! Each method is one transaction: it reads the record at most once, checks
//! preconditions, and writes the new record at most once. A failed method
//! never writes, so the caller can abort the ledger transaction as-is.

use ballotbox_store::StateStore;
use ballotbox_types::TxSeq;
use serde::{Deserialize, Serialize};

use crate::codec::{decode_record, to_canonical_bytes};
use crate::config::{ContractConfig, InitiatePolicy};
use crate::context::TxContext;
use crate::error::ContractError;
use crate::record::{split_options, VotingRecord, MAX_NAME_LEN};
use crate::tally::{count_ballots, select_winner, OptionCount, Winner};

/// One entry of a record's audit trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub tx_seq: TxSeq,
    pub record: VotingRecord,
}

#[derive(Clone, Debug, Default)]
pub struct VotingContract {
    config: ContractConfig,
}

impl VotingContract {
    pub fn new(config: ContractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Create an open record with the given options.
    pub fn initiate<S: StateStore + ?Sized>(
        &self,
        ctx: &mut TxContext<'_, S>,
        name: &str,
        options: &[String],
    ) -> Result<VotingRecord, ContractError> {
        let record = VotingRecord::new(name, options)?;

        if ctx.store().get_state(record.name())?.is_some() {
            match self.config.initiate_policy {
                InitiatePolicy::Reject => {
                    return Err(ContractError::AlreadyExists(record.name().to_string()));
                }
                InitiatePolicy::Overwrite => {
                    tracing::warn!(name = %record.name(), "overwriting existing voting");
                }
            }
        }

        put_record(ctx, &record)?;
        tracing::info!(
            name = %record.name(),
            options = record.options().len(),
            "voting initiated"
        );
        Ok(record)
    }

    /// Like [`initiate`](Self::initiate), with options given as one
    /// delimiter-separated string.
    pub fn initiate_delimited<S: StateStore + ?Sized>(
        &self,
        ctx: &mut TxContext<'_, S>,
        name: &str,
        options: &str,
    ) -> Result<VotingRecord, ContractError> {
        let options = split_options(options, self.config.option_delimiter);
        self.initiate(ctx, name, &options)
    }

    /// Close the record so no further ballots are accepted.
    pub fn close<S: StateStore + ?Sized>(
        &self,
        ctx: &mut TxContext<'_, S>,
        name: &str,
    ) -> Result<VotingRecord, ContractError> {
        let mut record = load_record(ctx, name)?;
        record.close()?;
        put_record(ctx, &record)?;
        tracing::info!(name = %name, ballots = record.ballots().len(), "voting closed");
        Ok(record)
    }

    pub fn read_record<S: StateStore + ?Sized>(
        &self,
        ctx: &TxContext<'_, S>,
        name: &str,
    ) -> Result<VotingRecord, ContractError> {
        let record = load_record(ctx, name)?;
        tracing::debug!(name = %name, open = record.is_open(), "voting read");
        Ok(record)
    }

    /// Record the caller's ballot, replacing any ballot they cast earlier.
    pub fn cast_vote<S: StateStore + ?Sized>(
        &self,
        ctx: &mut TxContext<'_, S>,
        name: &str,
        option: &str,
    ) -> Result<VotingRecord, ContractError> {
        let voter = ctx.caller_id()?;
        let mut record = load_record(ctx, name)?;
        record.cast(voter.clone(), option)?;
        put_record(ctx, &record)?;
        tracing::info!(name = %name, voter = %voter, option = %option, "vote cast");
        Ok(record)
    }

    /// Winner of a closed record. Ties go to the option declared first.
    pub fn tally<S: StateStore + ?Sized>(
        &self,
        ctx: &TxContext<'_, S>,
        name: &str,
    ) -> Result<Winner, ContractError> {
        let record = load_closed_record(ctx, name)?;
        let winner = select_winner(&count_ballots(&record))
            .ok_or_else(|| ContractError::NoVotes(name.to_string()))?;
        tracing::debug!(
            name = %name,
            winner = %winner.winner,
            count = winner.count,
            "voting tallied"
        );
        Ok(winner)
    }

    /// Per-option ballot counts of a closed record, in declaration order.
    pub fn counts<S: StateStore + ?Sized>(
        &self,
        ctx: &TxContext<'_, S>,
        name: &str,
    ) -> Result<Vec<OptionCount>, ContractError> {
        let record = load_closed_record(ctx, name)?;
        Ok(count_ballots(&record))
    }

    /// Every committed version of the record, oldest first.
    pub fn history<S: StateStore + ?Sized>(
        &self,
        ctx: &TxContext<'_, S>,
        name: &str,
    ) -> Result<Vec<HistoryEntry>, ContractError> {
        if name.len() > MAX_NAME_LEN {
            return Err(ContractError::NotFound(name.to_string()));
        }
        let modifications = ctx.store().history_for_key(name)?;
        if modifications.is_empty() {
            return Err(ContractError::NotFound(name.to_string()));
        }
        modifications
            .into_iter()
            .map(|m| {
                Ok(HistoryEntry {
                    tx_seq: m.tx_seq,
                    record: decode_record(name, &m.value)?,
                })
            })
            .collect()
    }
}

fn load_record<S: StateStore + ?Sized>(
    ctx: &TxContext<'_, S>,
    name: &str,
) -> Result<VotingRecord, ContractError> {
    // No record can live under a name initiate would refuse.
    if name.len() > MAX_NAME_LEN {
        return Err(ContractError::NotFound(name.to_string()));
    }
    match ctx.store().get_state(name)? {
        Some(bytes) if !bytes.is_empty() => decode_record(name, &bytes),
        _ => Err(ContractError::NotFound(name.to_string())),
    }
}

fn load_closed_record<S: StateStore + ?Sized>(
    ctx: &TxContext<'_, S>,
    name: &str,
) -> Result<VotingRecord, ContractError> {
    let record = load_record(ctx, name)?;
    if record.is_open() {
        return Err(ContractError::StillOpen(name.to_string()));
    }
    Ok(record)
}

fn put_record<S: StateStore + ?Sized>(
    ctx: &mut TxContext<'_, S>,
    record: &VotingRecord,
) -> Result<(), ContractError> {
    let bytes = to_canonical_bytes(record)?;
    ctx.store_mut().put_state(record.name(), &bytes)?;
    Ok(())
}
