//! Property test: permuting ballot order must not change the *multiset* of
//! any Tally function's output (spec.md §8: "permuting the input preference
//! order does not change multiset-equality of the output").
//!
//! Each output carries a label exactly once, so sorting both the base and
//! the shuffled result by label and comparing them is equivalent to
//! comparing them as multisets.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::tally::fixtures::worked_dataset;
use crate::{borda, instant_runoff, schulze, simple_majority};

fn shuffled(seed: u64) -> Vec<Vec<String>> {
    let mut preferences = worked_dataset();
    let mut rng = StdRng::seed_from_u64(seed);
    preferences.shuffle(&mut rng);
    preferences
}

fn by_label<T>(mut v: Vec<(T, String)>) -> Vec<(T, String)> {
    v.sort_by(|a, b| a.1.cmp(&b.1));
    v
}

proptest! {
    #[test]
    fn simple_majority_is_permutation_invariant(seed: u64) {
        let base = by_label(simple_majority(&worked_dataset()).unwrap());
        let perturbed = by_label(simple_majority(&shuffled(seed)).unwrap());
        prop_assert_eq!(base, perturbed);
    }

    #[test]
    fn instant_runoff_is_permutation_invariant(seed: u64) {
        let base = by_label(instant_runoff(&worked_dataset()).unwrap());
        let perturbed = by_label(instant_runoff(&shuffled(seed)).unwrap());
        prop_assert_eq!(base, perturbed);
    }

    #[test]
    fn borda_is_permutation_invariant(seed: u64) {
        let base = by_label(borda(&worked_dataset(), "linear").unwrap());
        let perturbed = by_label(borda(&shuffled(seed), "linear").unwrap());
        prop_assert_eq!(base, perturbed);
    }

    #[test]
    fn schulze_is_permutation_invariant(seed: u64) {
        let base = by_label(schulze(&worked_dataset()).unwrap());
        let perturbed = by_label(schulze(&shuffled(seed)).unwrap());
        prop_assert_eq!(base, perturbed);
    }
}
