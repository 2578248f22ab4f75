use crate::error::CascadeError;
use serde::{Deserialize, Serialize};

pub type NodeId = usize;

/// Immutable undirected graph over nodes `0..n`.
///
/// Adjacency lists back the simulator's frontier expansion; a flat row-major
/// membership table backs `is_edge` so the scoring paths stay O(1) without
/// hashed pair keys.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Graph {
    adjacency: Vec<Vec<NodeId>>,
    membership: Vec<bool>,
    edge_count: usize,
}

impl Graph {
    /// Builds a graph from an undirected edge list. Duplicate edges are
    /// collapsed; self-loops and out-of-range endpoints are rejected.
    pub fn from_edges(n: usize, edges: &[(NodeId, NodeId)]) -> Result<Self, CascadeError> {
        if n < 2 {
            return Err(CascadeError::GraphTooSmall(n));
        }
        let mut graph = Self {
            adjacency: vec![Vec::new(); n],
            membership: vec![false; n * n],
            edge_count: 0,
        };
        for &(u, v) in edges {
            if u >= n || v >= n {
                return Err(CascadeError::NodeOutOfRange { node: u.max(v), n });
            }
            if u == v {
                return Err(CascadeError::SelfLoop(u));
            }
            if graph.membership[u * n + v] {
                continue;
            }
            graph.membership[u * n + v] = true;
            graph.membership[v * n + u] = true;
            graph.adjacency[u].push(v);
            graph.adjacency[v].push(u);
            graph.edge_count += 1;
        }
        Ok(graph)
    }

    /// Path graph `0-1-...-(n-1)`, the standard deterministic test topology.
    pub fn path(n: usize) -> Result<Self, CascadeError> {
        let edges: Vec<(NodeId, NodeId)> = (1..n).map(|v| (v - 1, v)).collect();
        Self::from_edges(n, &edges)
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn is_edge(&self, u: NodeId, v: NodeId) -> bool {
        u != v && self.membership[u * self.len() + v]
    }

    pub fn degree(&self, u: NodeId) -> usize {
        self.adjacency[u].len()
    }

    pub fn neighbors(&self, u: NodeId) -> &[NodeId] {
        &self.adjacency[u]
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn average_degree(&self) -> f64 {
        2.0 * self.edge_count as f64 / self.len() as f64
    }

    /// Iterates every undirected edge once, as `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, nbrs)| {
            nbrs.iter()
                .filter(move |&&v| u < v)
                .map(move |&v| (u, v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_symmetric_adjacency() {
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(g.len(), 4);
        assert_eq!(g.edge_count(), 3);
        assert!(g.is_edge(0, 1));
        assert!(g.is_edge(1, 0));
        assert!(!g.is_edge(0, 2));
        assert!(!g.is_edge(1, 1));
        assert_eq!(g.degree(1), 2);
    }

    #[test]
    fn collapses_duplicate_edges() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 0), (0, 1)]).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(0), 1);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            Graph::from_edges(1, &[]).unwrap_err(),
            CascadeError::GraphTooSmall(1)
        );
        assert_eq!(
            Graph::from_edges(3, &[(0, 3)]).unwrap_err(),
            CascadeError::NodeOutOfRange { node: 3, n: 3 }
        );
        assert_eq!(
            Graph::from_edges(3, &[(2, 2)]).unwrap_err(),
            CascadeError::SelfLoop(2)
        );
    }

    #[test]
    fn edge_iterator_matches_membership() {
        let g = Graph::from_edges(5, &[(0, 4), (3, 1), (2, 4)]).unwrap();
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges.len(), g.edge_count());
        for (u, v) in edges {
            assert!(u < v);
            assert!(g.is_edge(u, v));
        }
    }

    #[test]
    fn path_graph_shape() {
        let g = Graph::path(5).unwrap();
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.degree(0), 1);
        assert_eq!(g.degree(2), 2);
        assert!((g.average_degree() - 1.6).abs() < 1e-12);
    }
}
