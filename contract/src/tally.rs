//! Deterministic ballot counting.

use serde::{Deserialize, Serialize};

use crate::record::VotingRecord;

/// Outcome of a tally: the winning option and how many ballots named it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub winner: String,
    pub count: u64,
}

/// Ballots received by one option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCount {
    pub option: String,
    pub count: u64,
}

/// Count ballots for every declared option, in declaration order.
///
/// Options nobody voted for are included with a count of zero.
pub fn count_ballots(record: &VotingRecord) -> Vec<OptionCount> {
    let mut counts = vec![0u64; record.options().len()];
    for option in record.ballots().values() {
        if let Some(idx) = record.option_index(option) {
            counts[idx] += 1;
        }
    }
    record
        .options()
        .iter()
        .zip(counts)
        .map(|(option, count)| OptionCount {
            option: option.clone(),
            count,
        })
        .collect()
}

/// Pick the option with the most ballots.
///
/// A challenger only replaces the current leader when its count is strictly
/// greater, so ties go to the option declared first. Returns `None` when no
/// option received a ballot.
pub fn select_winner(counts: &[OptionCount]) -> Option<Winner> {
    let mut leader: Option<&OptionCount> = None;
    for candidate in counts.iter().filter(|c| c.count > 0) {
        match leader {
            Some(current) if current.count >= candidate.count => {}
            _ => leader = Some(candidate),
        }
    }
    leader.map(|c| Winner {
        winner: c.option.clone(),
        count: c.count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballotbox_types::VoterId;

    fn record_with(options: &[&str], ballots: &[(&str, &str)]) -> VotingRecord {
        let mut record = VotingRecord::new("Friday", options.iter().copied()).unwrap();
        for (voter, option) in ballots {
            record.cast(VoterId::new(*voter), option).unwrap();
        }
        record
    }

    #[test]
    fn counts_follow_declaration_order() {
        let record = record_with(&["A", "B", "C"], &[("v1", "C"), ("v2", "A"), ("v3", "C")]);
        let counts = count_ballots(&record);
        let flat: Vec<(&str, u64)> = counts.iter().map(|c| (c.option.as_str(), c.count)).collect();
        assert_eq!(flat, [("A", 1), ("B", 0), ("C", 2)]);
    }

    #[test]
    fn strict_majority_wins() {
        let record = record_with(&["A", "B"], &[("v1", "B"), ("v2", "B"), ("v3", "A")]);
        assert_eq!(
            select_winner(&count_ballots(&record)),
            Some(Winner {
                winner: "B".into(),
                count: 2,
            })
        );
    }

    #[test]
    fn tie_goes_to_first_declared_option() {
        // "zed" sorts before every ballot for "A" but A is declared first.
        let record = record_with(&["A", "B"], &[("zed", "B"), ("amy", "A")]);
        assert_eq!(
            select_winner(&count_ballots(&record)),
            Some(Winner {
                winner: "A".into(),
                count: 1,
            })
        );

        let record = record_with(&["B", "A"], &[("zed", "B"), ("amy", "A")]);
        assert_eq!(select_winner(&count_ballots(&record)).unwrap().winner, "B");
    }

    #[test]
    fn no_ballots_no_winner() {
        let record = record_with(&["A", "B"], &[]);
        assert_eq!(select_winner(&count_ballots(&record)), None);
    }
}
