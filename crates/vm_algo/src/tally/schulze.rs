use std::collections::{BTreeMap, BTreeSet};

use super::validate_no_repeats;
use crate::errors::AlgoError;

/// Schulze method: pairwise beatpaths resolved by the Floyd–Warshall-style
/// widest-path algorithm, yielding a total order even when the pairwise
/// graph has a cycle.
///
/// The candidate set is the *intersection* of labels across every ballot —
/// a candidate absent from any one ballot is silently dropped. Output is
/// best-first, `(rank, label)` with `rank` running from `n-1` (best) down
/// to `0` (worst).
pub fn schulze(preferences: &[Vec<String>]) -> Result<Vec<(usize, String)>, AlgoError> {
    for preference in preferences {
        validate_no_repeats(preference)?;
    }

    if preferences.is_empty() {
        return Ok(Vec::new());
    }

    let mut candidates: BTreeSet<String> = preferences[0].iter().cloned().collect();
    for preference in &preferences[1..] {
        let ballot_set: BTreeSet<String> = preference.iter().cloned().collect();
        candidates = candidates.intersection(&ballot_set).cloned().collect();
    }
    let candidates: Vec<String> = candidates.into_iter().collect();
    let n = candidates.len();
    let index: BTreeMap<&str, usize> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    // d[i][j] = number of ballots ranking candidate i strictly above j.
    let mut d = vec![vec![0i64; n]; n];
    for preference in preferences {
        for i in 0..preference.len() {
            for j in (i + 1)..preference.len() {
                if let (Some(&vi), Some(&vj)) =
                    (index.get(preference[i].as_str()), index.get(preference[j].as_str()))
                {
                    d[vi][vj] += 1;
                }
            }
        }
    }

    // p[i][j] = strength of the strongest path from i to j.
    let mut p = vec![vec![0i64; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i != j && d[i][j] > d[j][i] {
                p[i][j] = d[i][j];
            }
        }
    }
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            for k in 0..n {
                if k == i || k == j {
                    continue;
                }
                p[j][k] = p[j][k].max(p[j][i].min(p[i][k]));
            }
        }
    }

    // Ascending: weakest candidate first (stable, so ties keep the
    // candidate set's natural sorted order — the "fixed indexing" of §4.1.4).
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| p[i][j].cmp(&p[j][i]));

    let mut ranking: Vec<(usize, String)> = order
        .into_iter()
        .enumerate()
        .map(|(rank, candidate_idx)| (rank, candidates[candidate_idx].clone()))
        .collect();
    ranking.reverse();
    Ok(ranking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::fixtures::worked_dataset;

    #[test]
    fn worked_scenario() {
        let result = schulze(&worked_dataset()).unwrap();
        assert_eq!(
            result,
            vec![
                (4, "E".to_string()),
                (3, "A".to_string()),
                (2, "C".to_string()),
                (1, "B".to_string()),
                (0, "D".to_string()),
            ]
        );
    }

    #[test]
    fn drops_candidate_missing_from_any_ballot() {
        let preferences = vec![
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec!["B".to_string(), "A".to_string()],
        ];
        let result = schulze(&preferences).unwrap();
        let labels: BTreeSet<String> = result.into_iter().map(|(_, label)| label).collect();
        assert_eq!(labels, BTreeSet::from(["A".to_string(), "B".to_string()]));
    }

    #[test]
    fn rejects_repeated_candidate() {
        let preferences = vec![vec!["A".to_string(), "A".to_string()]];
        assert!(matches!(
            schulze(&preferences),
            Err(AlgoError::InvalidPreference(_))
        ));
    }
}
