use thiserror::Error;

/// Invalid-parameter rejections. All checks run before any trial state is
/// created; degenerate statistics inside the estimators recover locally and
/// never surface here.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CascadeError {
    #[error("transmission probability {0} outside (0, 1]")]
    InvalidTransmission(f64),

    #[error("day cap must be at least 1, got {0}")]
    InvalidHorizon(u32),

    #[error("graph needs at least 2 nodes, got {0}")]
    GraphTooSmall(usize),

    #[error("degree bound must be at least 1")]
    InvalidDegreeBound,

    #[error("trial count must be at least 1")]
    InvalidTrialCount,

    #[error("node {node} out of range for a graph of {n} nodes")]
    NodeOutOfRange { node: usize, n: usize },

    #[error("self-loop on node {0}")]
    SelfLoop(usize),
}
