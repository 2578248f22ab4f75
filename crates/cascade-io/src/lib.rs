use cascade_core::Graph;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub mod cli;
pub mod generate;

/// Run manifest for complete reproducibility: every parameter that went into
/// an experiment plus the scalar it produced.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub timestamp: String,
    pub experiment: String,
    pub n: usize,
    pub edge_count: usize,
    pub p: f64,
    pub max_days: u32,
    pub trials: usize,
    pub seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_degree: Option<usize>,
    pub score_name: String,
    pub score: f64,
}

impl RunManifest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        experiment: &str,
        graph: &Graph,
        p: f64,
        max_days: u32,
        trials: usize,
        seed: u64,
        max_degree: Option<usize>,
        score_name: &str,
        score: f64,
    ) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            experiment: experiment.to_string(),
            n: graph.len(),
            edge_count: graph.edge_count(),
            p,
            max_days,
            trials,
            seed,
            max_degree,
            score_name: score_name.to_string(),
            score,
        }
    }

    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Parses an edge list: one `u v` pair per line, `#` starts a comment.
/// `n` is one past the highest node id seen.
pub fn parse_edge_list(text: &str) -> anyhow::Result<Graph> {
    let mut edges = Vec::new();
    let mut max_node = 0usize;
    for (lineno, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (u, v) = match (fields.next(), fields.next(), fields.next()) {
            (Some(u), Some(v), None) => (u.parse::<usize>()?, v.parse::<usize>()?),
            _ => anyhow::bail!("line {}: expected `u v`, got {line:?}", lineno + 1),
        };
        max_node = max_node.max(u).max(v);
        edges.push((u, v));
    }
    if edges.is_empty() {
        anyhow::bail!("edge list is empty");
    }
    Ok(Graph::from_edges(max_node + 1, &edges)?)
}

pub fn load_edge_list(path: &Path) -> anyhow::Result<Graph> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))?;
    parse_edge_list(&text)
}

/// Writes a graph back out in the same edge-list format.
pub fn write_edge_list(graph: &Graph, path: &Path) -> anyhow::Result<()> {
    let mut out = String::new();
    for (u, v) in graph.edges() {
        out.push_str(&format!("{u} {v}\n"));
    }
    fs::write(path, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edges_and_comments() {
        let g = parse_edge_list("# a path\n0 1\n1 2 # inline\n\n2 3\n").unwrap();
        assert_eq!(g.len(), 4);
        assert_eq!(g.edge_count(), 3);
        assert!(g.is_edge(1, 2));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_edge_list("0 1 2\n").is_err());
        assert!(parse_edge_list("0\n").is_err());
        assert!(parse_edge_list("a b\n").is_err());
        assert!(parse_edge_list("# nothing\n").is_err());
        assert!(parse_edge_list("3 3\n").is_err());
    }

    #[test]
    fn manifest_serializes_cleanly() {
        let g = Graph::path(4).unwrap();
        let manifest = RunManifest::new("tree-structure", &g, 0.9, 1000, 100, 42, None, "ec", 1.0);
        let json = serde_json::to_string(&manifest).unwrap();
        assert!(json.contains("\"experiment\":\"tree-structure\""));
        assert!(!json.contains("max_degree"));
        let back: RunManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, 1.0);
    }
}
