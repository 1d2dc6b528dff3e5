use std::collections::{BTreeMap, BTreeSet};

use super::validate_no_repeats;
use crate::errors::AlgoError;

/// Instant-runoff over the union of every label that appears on any ballot.
/// Each round eliminates every option tied for the lowest first-choice
/// count among still-alive options; a ballot whose remaining choices have
/// all been eliminated contributes to no option that round.
///
/// Output is best-first: the option(s) eliminated in the final round head
/// the list, the option(s) eliminated in round one trail it, each paired
/// with the tally it held at the round it was fixed. Within one elimination
/// round, ties come out in descending-label order — a consequence of
/// `algorithms.py::instant_runoff` building its result by repeated
/// `winners.insert(0, (v, k))` over the round's tied candidates in
/// ascending order, which reverses that sub-list before later rounds push
/// it further back.
pub fn instant_runoff(preferences: &[Vec<String>]) -> Result<Vec<(u64, String)>, AlgoError> {
    for preference in preferences {
        validate_no_repeats(preference)?;
    }

    let allowed_options: BTreeSet<String> = preferences.iter().flatten().cloned().collect();
    let mut losers: BTreeSet<String> = BTreeSet::new();
    let mut rounds: Vec<Vec<(u64, String)>> = Vec::new();

    while losers.len() < allowed_options.len() {
        let mut options: BTreeMap<String, u64> = allowed_options
            .iter()
            .filter(|c| !losers.contains(*c))
            .map(|c| (c.clone(), 0u64))
            .collect();

        for preference in preferences {
            for item in preference {
                if !losers.contains(item) {
                    *options.get_mut(item).expect("option set includes every alive label") += 1;
                    break;
                }
            }
        }

        let min_count = *options.values().min().expect("at least one alive option remains");
        let mut round: Vec<(u64, String)> = options
            .into_iter()
            .filter(|(_, count)| *count == min_count)
            .map(|(label, count)| (count, label))
            .collect();
        for (_, label) in &round {
            losers.insert(label.clone());
        }
        // `algorithms.py` builds this round's slice of `winners` by repeated
        // `insert(0, ...)` over the tied candidates in ascending order,
        // which reverses them to descending order.
        round.reverse();
        rounds.push(round);
    }

    let mut ranking = Vec::new();
    for round in rounds.into_iter().rev() {
        ranking.extend(round);
    }
    Ok(ranking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::fixtures::worked_dataset;

    #[test]
    fn worked_scenario() {
        let result = instant_runoff(&worked_dataset()).unwrap();
        assert_eq!(
            result,
            vec![
                (45, "A".to_string()),
                (19, "C".to_string()),
                (8, "E".to_string()),
                (8, "B".to_string()),
                (7, "D".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_repeated_candidate() {
        let preferences = vec![vec!["A".to_string(), "A".to_string()]];
        assert!(matches!(
            instant_runoff(&preferences),
            Err(AlgoError::InvalidPreference(_))
        ));
    }
}
