use crate::graph::NodeId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Bernoulli, Distribution};

/// Random source for a single trial.
///
/// Every trial owns its own generator, derived from the experiment seed and
/// the trial id, so trials are reproducible and can run in any order or in
/// parallel without sharing state.
pub struct TrialRng {
    rng: ChaCha20Rng,
}

impl TrialRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn from_trial_id(global_seed: u64, trial_id: u64) -> Self {
        // Combine seeds deterministically
        let seed = global_seed.wrapping_add(trial_id.wrapping_mul(0x9e3779b97f4a7c15));
        Self::new(seed)
    }

    /// Bernoulli draw. `prob` is a probability by construction; the clamp
    /// only absorbs floating-point rounding at the ends of the range.
    pub fn flip(&mut self, prob: f64) -> bool {
        let prob = prob.clamp(0.0, 1.0);
        Bernoulli::new(prob)
            .map(|d| d.sample(&mut self.rng))
            .unwrap_or(false)
    }

    /// Uniform draw from `0..n`.
    pub fn uniform_node(&mut self, n: usize) -> NodeId {
        self.rng.gen_range(0..n)
    }
}
