use crate::error::CascadeError;
use crate::graph::{Graph, NodeId};
use crate::seed::TrialRng;
use serde::{Deserialize, Serialize};

/// Validated simulation parameters shared by every trial of an experiment.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CascadeParams {
    p: f64,
    max_days: u32,
}

impl CascadeParams {
    /// `p` is the per-neighbor transmission probability, `max_days` caps the
    /// day loop. `p = 1` is admitted: `(1 - p)^d` stays well defined there
    /// and deterministic runs are the backbone of the test suite.
    pub fn new(p: f64, max_days: u32) -> Result<Self, CascadeError> {
        if !(p > 0.0 && p <= 1.0) {
            return Err(CascadeError::InvalidTransmission(p));
        }
        if max_days < 1 {
            return Err(CascadeError::InvalidHorizon(max_days));
        }
        Ok(Self { p, max_days })
    }

    pub fn transmission(&self) -> f64 {
        self.p
    }

    pub fn max_days(&self) -> u32 {
        self.max_days
    }
}

/// Final state of one trial.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    /// Ever-infected indicator per node.
    pub infected: Vec<bool>,
    /// Day of first infection per node; 0 for the seed and for nodes that
    /// were never infected (disambiguated by `infected`).
    pub day: Vec<u32>,
    /// Last simulated day.
    pub days_run: u32,
    /// True when the day cap was reached before the spread died out.
    pub capped: bool,
}

impl CascadeOutcome {
    pub fn infected_count(&self) -> usize {
        self.infected.iter().filter(|&&i| i).count()
    }
}

/// Runs one SIR-style trial from `seed_node` to absorption.
///
/// Day `d` works strictly off the previous day's newly infected set (the
/// frontier): every still-susceptible node with `m` frontier neighbors gets
/// one independent chance of infection with probability `1 - (1-p)^m`.
/// Frontier nodes recover after their single infectious day and never rejoin
/// the susceptible pool. The trial stops at the first day with no new
/// infections, or at the day cap with `capped` set.
pub fn cascade(
    graph: &Graph,
    params: &CascadeParams,
    seed_node: NodeId,
    rng: &mut TrialRng,
) -> Result<CascadeOutcome, CascadeError> {
    let n = graph.len();
    if n < 2 {
        return Err(CascadeError::GraphTooSmall(n));
    }
    if seed_node >= n {
        return Err(CascadeError::NodeOutOfRange { node: seed_node, n });
    }

    let p = params.transmission();
    let mut infected = vec![false; n];
    let mut day = vec![0u32; n];
    infected[seed_node] = true;

    let mut frontier: Vec<NodeId> = vec![seed_node];
    // Infectious-neighbor count per susceptible node, rebuilt each day.
    let mut exposure = vec![0u32; n];
    let mut exposed: Vec<NodeId> = Vec::new();

    for d in 1..params.max_days() {
        exposed.clear();
        for &u in &frontier {
            for &v in graph.neighbors(u) {
                if infected[v] {
                    continue;
                }
                if exposure[v] == 0 {
                    exposed.push(v);
                }
                exposure[v] += 1;
            }
        }

        let mut next = Vec::new();
        for &v in &exposed {
            let prob = 1.0 - (1.0 - p).powi(exposure[v] as i32);
            if rng.flip(prob) {
                infected[v] = true;
                day[v] = d;
                next.push(v);
            }
            exposure[v] = 0;
        }

        frontier = next;
        if frontier.is_empty() {
            return Ok(CascadeOutcome {
                infected,
                day,
                days_run: d,
                capped: false,
            });
        }
    }

    Ok(CascadeOutcome {
        infected,
        day,
        days_run: params.max_days() - 1,
        capped: !frontier.is_empty(),
    })
}
