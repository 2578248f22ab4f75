pub mod structure;
pub mod weight;

pub use structure::{
    bounded_edge_correctness, learn_degree_bounded_structure, learn_tree_structure,
    select_bounded_edges, select_tree_edges, tree_edge_correctness,
};
pub use weight::{
    bounded_weight_matrix, learn_degree_bounded_weight, learn_tree_weight, tree_weight_matrix,
};
