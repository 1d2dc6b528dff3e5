use std::collections::BTreeMap;

use super::validate_no_repeats;
use crate::errors::AlgoError;

/// Counts first-choice occurrences. Candidates with zero first-choice votes
/// are omitted. Sorted by score descending, ties broken by label descending
/// (a plain tuple sort, high to low).
pub fn simple_majority(preferences: &[Vec<String>]) -> Result<Vec<(u64, String)>, AlgoError> {
    for preference in preferences {
        validate_no_repeats(preference)?;
    }

    let mut votes: BTreeMap<String, u64> = BTreeMap::new();
    for preference in preferences {
        if let Some(first) = preference.first() {
            *votes.entry(first.clone()).or_insert(0) += 1;
        }
    }

    let mut ranking: Vec<(u64, String)> = votes.into_iter().map(|(label, v)| (v, label)).collect();
    ranking.sort_by(|a, b| b.cmp(a));
    Ok(ranking)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::tally::fixtures::worked_dataset;

    fn ballot(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn worked_scenario() {
        let result = simple_majority(&worked_dataset()).unwrap();
        assert_eq!(
            result,
            vec![
                (12, "C".to_string()),
                (10, "A".to_string()),
                (8, "E".to_string()),
                (8, "B".to_string()),
                (7, "D".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_repeated_candidate() {
        let preferences = vec![ballot(&["A", "A", "B"])];
        assert!(matches!(
            simple_majority(&preferences),
            Err(AlgoError::InvalidPreference(_))
        ));
    }

    #[test]
    fn omits_zero_vote_candidates() {
        let preferences = vec![ballot(&["A", "B"]), ballot(&["A", "C"])];
        let result = simple_majority(&preferences).unwrap();
        assert_eq!(result, vec![(2, "A".to_string())]);
    }
}
