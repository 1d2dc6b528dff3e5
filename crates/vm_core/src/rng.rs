//! Non-deterministic RNG used only for uniform ballot sampling
//! (`pick_random_ballot`). Never used by `vm_algo` — tallying stays pure.

use rand::rngs::ThreadRng;
use rand::seq::IteratorRandom;

/// Thin wrapper so `vm_workflow` doesn't depend on `rand` directly.
pub struct BallotRng(ThreadRng);

impl BallotRng {
    pub fn new() -> Self {
        Self(rand::thread_rng())
    }

    /// Uniformly choose an index in `0..len`, or `None` if `len == 0`.
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        (0..len).choose(&mut self.0)
    }
}

impl Default for BallotRng {
    fn default() -> Self {
        Self::new()
    }
}
