use cascade_core::{CascadeError, Graph, TrialRng};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Uniform random labeled tree on `n` nodes, decoded from a random Prüfer
/// sequence (the same distribution the original tree generator sampled).
pub fn random_tree(n: usize, seed: u64) -> Result<Graph, CascadeError> {
    if n < 2 {
        return Err(CascadeError::GraphTooSmall(n));
    }
    let mut rng = TrialRng::new(seed);
    let prufer: Vec<usize> = (0..n.saturating_sub(2)).map(|_| rng.uniform_node(n)).collect();

    let mut degree = vec![1usize; n];
    for &x in &prufer {
        degree[x] += 1;
    }
    let mut leaves: BinaryHeap<Reverse<usize>> = (0..n)
        .filter(|&v| degree[v] == 1)
        .map(Reverse)
        .collect();

    let mut edges = Vec::with_capacity(n - 1);
    for &x in &prufer {
        // Heap is never empty while Prüfer symbols remain.
        if let Some(Reverse(leaf)) = leaves.pop() {
            edges.push((leaf, x));
            degree[x] -= 1;
            if degree[x] == 1 {
                leaves.push(Reverse(x));
            }
        }
    }
    if let (Some(Reverse(u)), Some(Reverse(v))) = (leaves.pop(), leaves.pop()) {
        edges.push((u, v));
    }

    Graph::from_edges(n, &edges)
}

/// Erdős–Rényi G(n, p): every unordered pair becomes an edge independently
/// with probability `edge_prob`.
pub fn gnp(n: usize, edge_prob: f64, seed: u64) -> Result<Graph, CascadeError> {
    if n < 2 {
        return Err(CascadeError::GraphTooSmall(n));
    }
    if !(edge_prob > 0.0 && edge_prob <= 1.0) {
        return Err(CascadeError::InvalidTransmission(edge_prob));
    }
    let mut rng = TrialRng::new(seed);
    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.flip(edge_prob) {
                edges.push((u, v));
            }
        }
    }
    Graph::from_edges(n, &edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn is_connected(g: &Graph) -> bool {
        let mut seen = vec![false; g.len()];
        seen[0] = true;
        let mut queue = VecDeque::from([0]);
        let mut count = 1;
        while let Some(u) = queue.pop_front() {
            for &v in g.neighbors(u) {
                if !seen[v] {
                    seen[v] = true;
                    count += 1;
                    queue.push_back(v);
                }
            }
        }
        count == g.len()
    }

    #[test]
    fn random_tree_is_a_tree() {
        for seed in 0..20 {
            let g = random_tree(30, seed).unwrap();
            assert_eq!(g.edge_count(), 29);
            assert!(is_connected(&g), "seed {seed}");
        }
    }

    #[test]
    fn two_node_tree() {
        let g = random_tree(2, 0).unwrap();
        assert!(g.is_edge(0, 1));
    }

    #[test]
    fn gnp_edge_count_tracks_probability() {
        let g = gnp(60, 0.2, 4).unwrap();
        let pairs = 60 * 59 / 2;
        let expected = 0.2 * pairs as f64;
        // ~8 standard deviations of slack.
        let slack = 8.0 * (pairs as f64 * 0.2 * 0.8).sqrt();
        assert!((g.edge_count() as f64 - expected).abs() < slack);
    }

    #[test]
    fn gnp_rejects_bad_probability() {
        assert!(gnp(10, 0.0, 1).is_err());
        assert!(gnp(10, 1.5, 1).is_err());
    }

    #[test]
    fn generators_are_deterministic() {
        let a = random_tree(25, 9).unwrap();
        let b = random_tree(25, 9).unwrap();
        assert_eq!(
            a.edges().collect::<Vec<_>>(),
            b.edges().collect::<Vec<_>>()
        );
    }
}
