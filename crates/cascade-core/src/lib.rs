pub mod cascade;
pub mod error;
pub mod graph;
pub mod seed;
pub mod stats;

// Core types
pub type F = f64;
pub use graph::{Graph, NodeId};
pub use seed::TrialRng;

// Simulation
pub use cascade::{cascade, CascadeOutcome, CascadeParams};

// Aggregated statistics
pub use stats::PairStats;

// Errors
pub use error::CascadeError;
