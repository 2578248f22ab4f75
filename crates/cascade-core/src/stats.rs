use crate::cascade::CascadeOutcome;
use crate::graph::NodeId;
use serde::{Deserialize, Serialize};

/// Aggregated infection statistics for one experiment.
///
/// All counters are weighted sums over trials; with the standard `1/N` trial
/// weight they end up as fractions in `[0, 1]`. The symmetric co-infection
/// counter lives in a packed upper-triangular array indexed by
/// `(min, max)`; the order counter is directional and uses a full row-major
/// array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairStats {
    n: usize,
    both: Vec<f64>,
    ordered: Vec<f64>,
    marginal: Vec<f64>,
}

impl PairStats {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            both: vec![0.0; n * (n - 1) / 2],
            ordered: vec![0.0; n * n],
            marginal: vec![0.0; n],
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    fn tri(&self, u: NodeId, v: NodeId) -> usize {
        let (a, b) = if u < v { (u, v) } else { (v, u) };
        a * self.n - a * (a + 1) / 2 + (b - a - 1)
    }

    /// Fraction of trials in which both `u` and `v` were ever infected.
    pub fn both(&self, u: NodeId, v: NodeId) -> f64 {
        self.both[self.tri(u, v)]
    }

    /// Fraction of trials in which both were infected and `u` strictly
    /// preceded `v`. Same-day co-infections count for neither direction.
    pub fn ordered(&self, u: NodeId, v: NodeId) -> f64 {
        self.ordered[u * self.n + v]
    }

    /// Fraction of trials in which `u` was ever infected.
    pub fn marginal(&self, u: NodeId) -> f64 {
        self.marginal[u]
    }

    /// Folds one trial in with the given weight.
    pub fn record_trial(&mut self, outcome: &CascadeOutcome, weight: f64) {
        debug_assert_eq!(outcome.infected.len(), self.n);
        for u in 0..self.n {
            if !outcome.infected[u] {
                continue;
            }
            self.marginal[u] += weight;
            for v in (u + 1)..self.n {
                if !outcome.infected[v] {
                    continue;
                }
                let idx = self.tri(u, v);
                self.both[idx] += weight;
                if outcome.day[u] < outcome.day[v] {
                    self.ordered[u * self.n + v] += weight;
                } else if outcome.day[v] < outcome.day[u] {
                    self.ordered[v * self.n + u] += weight;
                }
            }
        }
    }

    /// Additive merge of two partial aggregations over the same node set.
    /// Contributions are commutative, so parallel reduction is equivalent to
    /// sequential accumulation up to floating-point associativity.
    pub fn merge(&mut self, other: &PairStats) {
        debug_assert_eq!(self.n, other.n);
        for (a, b) in self.both.iter_mut().zip(&other.both) {
            *a += b;
        }
        for (a, b) in self.ordered.iter_mut().zip(&other.ordered) {
            *a += b;
        }
        for (a, b) in self.marginal.iter_mut().zip(&other.marginal) {
            *a += b;
        }
    }

    pub fn reset(&mut self) {
        self.both.fill(0.0);
        self.ordered.fill(0.0);
        self.marginal.fill(0.0);
    }
}
