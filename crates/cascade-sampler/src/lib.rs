use cascade_core::{cascade, CascadeError, CascadeOutcome, CascadeParams, Graph, NodeId, PairStats, TrialRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How each trial picks its initially infected node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SeedRule {
    /// Fresh uniform draw per trial (the default for the estimators).
    Uniform,
    /// Every trial starts from the same node.
    Fixed(NodeId),
}

/// One experiment = `trials` independent cascades over the same graph, each
/// weighted `1/trials` in the aggregated statistics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExperimentSpec {
    pub params: CascadeParams,
    pub trials: usize,
    pub seed: u64,
    pub seed_rule: SeedRule,
}

impl ExperimentSpec {
    pub fn new(p: f64, max_days: u32, trials: usize, seed: u64) -> Result<Self, CascadeError> {
        if trials < 1 {
            return Err(CascadeError::InvalidTrialCount);
        }
        Ok(Self {
            params: CascadeParams::new(p, max_days)?,
            trials,
            seed,
            seed_rule: SeedRule::Uniform,
        })
    }

    pub fn with_seed_rule(mut self, rule: SeedRule) -> Self {
        self.seed_rule = rule;
        self
    }
}

fn run_trial(
    graph: &Graph,
    spec: &ExperimentSpec,
    trial_id: u64,
) -> Result<CascadeOutcome, CascadeError> {
    let mut rng = TrialRng::from_trial_id(spec.seed, trial_id);
    let seed_node = match spec.seed_rule {
        SeedRule::Fixed(node) => node,
        SeedRule::Uniform => rng.uniform_node(graph.len()),
    };
    cascade(graph, &spec.params, seed_node, &mut rng)
}

/// Sequential experiment: trials run one after another in trial-id order.
pub fn run_experiment(graph: &Graph, spec: &ExperimentSpec) -> Result<PairStats, CascadeError> {
    if graph.len() < 2 {
        return Err(CascadeError::GraphTooSmall(graph.len()));
    }
    let weight = 1.0 / spec.trials as f64;
    let mut stats = PairStats::new(graph.len());
    for trial_id in 0..spec.trials {
        let outcome = run_trial(graph, spec, trial_id as u64)?;
        stats.record_trial(&outcome, weight);
    }
    Ok(stats)
}

/// Parallel experiment. Each trial derives its own RNG stream from
/// `(spec.seed, trial_id)`, so the sampled cascades are identical to the
/// sequential run; only the additive merge order differs, which matters at
/// floating-point associativity level and no further.
pub fn run_experiment_par(graph: &Graph, spec: &ExperimentSpec) -> Result<PairStats, CascadeError> {
    if graph.len() < 2 {
        return Err(CascadeError::GraphTooSmall(graph.len()));
    }
    let weight = 1.0 / spec.trials as f64;
    (0..spec.trials as u64)
        .into_par_iter()
        .try_fold(
            || PairStats::new(graph.len()),
            |mut acc, trial_id| {
                let outcome = run_trial(graph, spec, trial_id)?;
                acc.record_trial(&outcome, weight);
                Ok(acc)
            },
        )
        .try_reduce(
            || PairStats::new(graph.len()),
            |mut left, right| {
                left.merge(&right);
                Ok(left)
            },
        )
}
