use std::collections::BTreeMap;
use std::str::FromStr;

use super::validate_no_repeats;
use crate::errors::AlgoError;

/// The three Borda weighting schemes. `n` is the ballot length, `k` the
/// 0-based position of a candidate within a ballot.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum BordaMode {
    /// `n - k`
    Linear,
    /// `1 / (k + 1)`
    Fractional,
    /// `n ^ (n - k - 1)`
    Exponential,
}

impl FromStr for BordaMode {
    type Err = AlgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(BordaMode::Linear),
            "fractional" => Ok(BordaMode::Fractional),
            "exponential" => Ok(BordaMode::Exponential),
            other => Err(AlgoError::InvalidMode(other.to_string())),
        }
    }
}

/// Weighted-position ranking. `n` is pinned to `preferences[0].len()`; every
/// ballot is assumed to share that length (see SPEC_FULL.md §9). Sorted by
/// score descending, ties broken by label descending.
pub fn borda(preferences: &[Vec<String>], mode: &str) -> Result<Vec<(f64, String)>, AlgoError> {
    let mode = BordaMode::from_str(mode)?;
    for preference in preferences {
        validate_no_repeats(preference)?;
    }

    let n = preferences.first().map(|p| p.len()).unwrap_or(0);
    let mut scores: BTreeMap<String, f64> = BTreeMap::new();

    for preference in preferences {
        for (k, candidate) in preference.iter().enumerate() {
            let delta = match mode {
                BordaMode::Linear => (n - k) as f64,
                BordaMode::Fractional => 1.0 / (k + 1) as f64,
                BordaMode::Exponential => (n as u64).pow((n - k - 1) as u32) as f64,
            };
            *scores.entry(candidate.clone()).or_insert(0.0) += delta;
        }
    }

    let mut ranking: Vec<(f64, String)> = scores.into_iter().map(|(label, v)| (v, label)).collect();
    ranking.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap().then_with(|| b.1.cmp(&a.1)));
    Ok(ranking)
}
