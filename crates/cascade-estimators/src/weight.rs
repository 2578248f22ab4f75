use cascade_core::{CascadeError, Graph, NodeId, PairStats};
use cascade_sampler::{run_experiment_par, ExperimentSpec};
use nalgebra::DMatrix;

/// Regularizer keeping the order-statistic denominator away from zero.
const ORDER_REGULARIZER: f64 = 0.025;

/// Signed order-statistic weight estimate for every ordered pair:
///
///   pred[i,j] = (H[i,j] - H[j,i]) / 2  /  (c*J[i] + (H[i,j] - H[j,i]) / 2)
///
/// with H the order fractions, J the marginals and c the regularizer. An
/// exactly zero denominator yields 0 instead of a division fault.
pub fn tree_weight_matrix(stats: &PairStats) -> DMatrix<f64> {
    let n = stats.n();
    DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            return 0.0;
        }
        let num = 0.5 * stats.ordered(i, j) - 0.5 * stats.ordered(j, i);
        let den = ORDER_REGULARIZER * stats.marginal(i) + num;
        if den == 0.0 {
            0.0
        } else {
            num / den
        }
    })
}

/// Variance-ratio statistic `V_ij = F[i,j]^2 / (H[i,j]^2 + n*J[i]*J[j])`,
/// 0 when the denominator vanishes.
fn variance_ratio(stats: &PairStats, i: NodeId, j: NodeId) -> f64 {
    let n = stats.n() as f64;
    let den = stats.ordered(i, j).powi(2) + n * stats.marginal(i) * stats.marginal(j);
    if den == 0.0 {
        0.0
    } else {
        stats.both(i, j).powi(2) / den
    }
}

/// Degree-bounded weight estimate: predicted p solves
/// `(1 - p)^2 = 1 - (V_ij + V_ji)`. Sampling noise can push the right-hand
/// side negative (the original formulation faults on the square root there);
/// the discriminant is clamped at zero instead, saturating the estimate at 1.
pub fn bounded_weight_matrix(stats: &PairStats) -> DMatrix<f64> {
    let n = stats.n();
    DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            return 0.0;
        }
        let delta = 1.0 - variance_ratio(stats, i, j) - variance_ratio(stats, j, i);
        1.0 - delta.max(0.0).sqrt()
    })
}

/// Mean absolute error of `predicted` against the true scalar transmission
/// probability, summed over true edges and divided by the given norm.
fn scored_mae(graph: &Graph, predicted: &DMatrix<f64>, p: f64, norm: f64) -> f64 {
    if norm == 0.0 {
        return 0.0;
    }
    let total: f64 = graph
        .edges()
        .map(|(u, v)| (predicted[(u, v)] - p).abs())
        .sum();
    total / norm
}

/// Full tree-weight experiment: MAE of the order-statistic estimate over the
/// true edges, divided by n-1.
pub fn learn_tree_weight(
    graph: &Graph,
    p: f64,
    max_days: u32,
    trials: usize,
    seed: u64,
) -> Result<f64, CascadeError> {
    let spec = ExperimentSpec::new(p, max_days, trials, seed)?;
    let stats = run_experiment_par(graph, &spec)?;
    let predicted = tree_weight_matrix(&stats);
    Ok(scored_mae(graph, &predicted, p, graph.len() as f64 - 1.0))
}

/// Full degree-bounded weight experiment: MAE over the true edges, divided
/// by the edge count and by ln(trials) (floored at 1 so one- and two-trial
/// experiments stay defined).
pub fn learn_degree_bounded_weight(
    graph: &Graph,
    p: f64,
    max_days: u32,
    trials: usize,
    seed: u64,
) -> Result<f64, CascadeError> {
    let spec = ExperimentSpec::new(p, max_days, trials, seed)?;
    let stats = run_experiment_par(graph, &spec)?;
    let predicted = bounded_weight_matrix(&stats);
    let norm = graph.edge_count() as f64 * (trials as f64).ln().max(1.0);
    Ok(scored_mae(graph, &predicted, p, norm))
}
