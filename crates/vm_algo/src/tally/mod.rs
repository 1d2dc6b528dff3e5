//! Four ranking methods over preference lists. Every public function takes
//! `&[Vec<String>]` — one inner `Vec` per ballot, most-preferred candidate
//! first — and validates each ballot for repeated candidates before use.

pub mod borda;
pub mod instant_runoff;
pub mod schulze;
pub mod simple_majority;

#[cfg(test)]
mod proptests;

use crate::errors::AlgoError;

/// Shared precondition: a ballot may not rank the same candidate twice.
pub(crate) fn validate_no_repeats(preference: &[String]) -> Result<(), AlgoError> {
    let mut seen = std::collections::BTreeSet::new();
    for candidate in preference {
        if !seen.insert(candidate) {
            return Err(AlgoError::InvalidPreference(preference.to_vec()));
        }
    }
    Ok(())
}

/// Shared fixture for the four worked scenarios in
/// `examples/original_source/tests/test_algorithms.py`.
#[cfg(test)]
pub(crate) mod fixtures {
    fn ballot(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    pub(crate) fn worked_dataset() -> Vec<Vec<String>> {
        let mut preferences = Vec::new();
        let mut push = |n: usize, labels: &[&str]| {
            for _ in 0..n {
                preferences.push(ballot(labels));
            }
        };
        push(5, &["A", "C", "B", "E", "D"]);
        push(5, &["A", "D", "E", "C", "B"]);
        push(8, &["B", "E", "D", "A", "C"]);
        push(3, &["C", "A", "B", "E", "D"]);
        push(7, &["C", "A", "E", "B", "D"]);
        push(2, &["C", "B", "A", "D", "E"]);
        push(7, &["D", "C", "E", "B", "A"]);
        push(8, &["E", "B", "A", "D", "C"]);
        preferences
    }
}
