use proptest::prelude::*;

use ballotbox_contract::codec::to_canonical_bytes;
use ballotbox_contract::tally::{count_ballots, select_winner};
use ballotbox_contract::{ContractError, TxContext, VotingContract, VotingRecord};
use ballotbox_nullables::{NullIdentity, NullLedger};
use ballotbox_types::VoterId;

const OPTIONS: [&str; 4] = ["DomPizza", "QuickEats", "Sushi", "Tacos"];

/// A sequence of (voter index, option index) ballots.
fn ballots() -> impl Strategy<Value = Vec<(u8, usize)>> {
    prop::collection::vec((0u8..16, 0usize..OPTIONS.len()), 0..64)
}

/// Distinct, non-empty options, possibly padded with whitespace.
fn declared_options(charset: &'static str) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(charset, 1..6).prop_map(|set| set.into_iter().collect())
}

fn record_from(ballots: &[(u8, usize)]) -> VotingRecord {
    let mut record = VotingRecord::new("Friday", OPTIONS).unwrap();
    for (voter, option) in ballots {
        record
            .cast(VoterId::new(format!("voter-{voter}")), OPTIONS[*option])
            .unwrap();
    }
    record
}

proptest! {
    /// Each voter holds exactly one ballot: their most recent choice.
    #[test]
    fn last_ballot_wins_per_voter(ballots in ballots()) {
        let record = record_from(&ballots);
        let mut expected = std::collections::BTreeMap::new();
        for (voter, option) in &ballots {
            expected.insert(format!("voter-{voter}"), OPTIONS[*option]);
        }
        prop_assert_eq!(record.ballots().len(), expected.len());
        for (voter, option) in expected {
            prop_assert_eq!(record.ballots()[&VoterId::new(voter)].as_str(), option);
        }
    }

    /// Counts add up to the number of distinct voters.
    #[test]
    fn counts_sum_to_ballots(ballots in ballots()) {
        let record = record_from(&ballots);
        let total: u64 = count_ballots(&record).iter().map(|c| c.count).sum();
        prop_assert_eq!(total, record.ballots().len() as u64);
    }

    /// The winner has the maximum count and no earlier option ties it.
    #[test]
    fn winner_is_first_declared_maximum(ballots in ballots()) {
        let record = record_from(&ballots);
        let counts = count_ballots(&record);
        match select_winner(&counts) {
            None => prop_assert!(record.ballots().is_empty()),
            Some(w) => {
                let max = counts.iter().map(|c| c.count).max().unwrap();
                prop_assert_eq!(w.count, max);
                let first = counts.iter().position(|c| c.count == max).unwrap();
                prop_assert_eq!(w.winner.as_str(), OPTIONS[first]);
            }
        }
    }

    /// Ballot arrival order never changes the stored bytes.
    #[test]
    fn canonical_bytes_ignore_arrival_order(ballots in ballots()) {
        // Keep only each voter's last ballot so reversal cannot change the outcome.
        let mut last = std::collections::BTreeMap::new();
        for (voter, option) in &ballots {
            last.insert(*voter, *option);
        }
        let forward: Vec<(u8, usize)> = last.iter().map(|(v, o)| (*v, *o)).collect();
        let backward: Vec<(u8, usize)> = forward.iter().rev().copied().collect();
        prop_assert_eq!(
            to_canonical_bytes(&record_from(&forward)).unwrap(),
            to_canonical_bytes(&record_from(&backward)).unwrap()
        );
    }

    /// Options outside the declared set are always rejected without mutation.
    #[test]
    fn foreign_options_are_rejected(ballots in ballots(), option in "[a-z]{1,12}") {
        let mut record = record_from(&ballots);
        let before = record.clone();
        let result = record.cast(VoterId::new("mallory"), &option);
        prop_assert!(
            matches!(result, Err(ContractError::InvalidOption { .. })),
            "lowercase option {} matched a declared option",
            option
        );
        prop_assert_eq!(record, before);
    }

    /// Initiate then read returns an open, empty record under the exact name
    /// and options supplied.
    #[test]
    fn initiate_then_read_round_trips(
        name in "\\PC{1,40}",
        options in declared_options("\\PC{1,12}"),
    ) {
        let ledger = NullLedger::new();
        let contract = VotingContract::default();
        let identity = NullIdentity::new("admin");
        ledger
            .transact(|txn| contract.initiate(&mut TxContext::new(txn, &identity), &name, &options))
            .unwrap();

        let mut txn = ledger.begin();
        let record = contract
            .read_record(&TxContext::new(&mut txn, &identity), &name)
            .unwrap();
        prop_assert!(record.is_open());
        prop_assert!(record.ballots().is_empty());
        prop_assert_eq!(record.name(), name.as_str());
        prop_assert_eq!(record.options(), options.as_slice());
    }

    /// The delimited form declares exactly the pieces between delimiters.
    #[test]
    fn delimited_initiate_keeps_pieces_verbatim(
        name in "[ a-zA-Z]{1,20}",
        options in declared_options("[ a-zA-Z]{1,12}"),
    ) {
        let ledger = NullLedger::new();
        let contract = VotingContract::default();
        let identity = NullIdentity::new("admin");
        let raw = options.join(",");
        let record = ledger
            .transact(|txn| {
                contract.initiate_delimited(&mut TxContext::new(txn, &identity), &name, &raw)
            })
            .unwrap();
        prop_assert_eq!(record.options(), options.as_slice());
        prop_assert!(ledger.snapshot(&name).is_some());
    }
}
