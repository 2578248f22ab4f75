use crate::{generate, load_edge_list, write_edge_list, RunManifest};
use cascade_core::Graph;
use cascade_estimators::{
    learn_degree_bounded_structure, learn_degree_bounded_weight, learn_tree_structure,
    learn_tree_weight,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cascade")]
#[command(about = "Graph structure and weight inference from simulated infection cascades")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a tree recovery experiment
    LearnTree {
        /// Edge-list file with the ground-truth tree; generated when absent
        #[arg(long)]
        graph: Option<PathBuf>,

        /// Number of nodes when generating the tree
        #[arg(long, default_value = "100")]
        n: usize,

        /// Transmission probability
        #[arg(long, default_value = "0.9")]
        p: f64,

        /// Day cap per cascade
        #[arg(long, default_value = "1000")]
        max_days: u32,

        /// Number of cascades
        #[arg(long)]
        trials: usize,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Estimate edge weights instead of structure
        #[arg(long)]
        weights: bool,

        /// Write a JSON run manifest here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Run a degree-bounded recovery experiment
    LearnDegreeBounded {
        /// Edge-list file with the ground-truth graph; generated when absent
        #[arg(long)]
        graph: Option<PathBuf>,

        /// Number of nodes when generating the graph
        #[arg(long, default_value = "100")]
        n: usize,

        /// Edge probability when generating the graph
        #[arg(long, default_value = "0.15")]
        edge_prob: f64,

        /// Transmission probability
        #[arg(long, default_value = "0.15")]
        p: f64,

        /// Day cap per cascade
        #[arg(long, default_value = "1000")]
        max_days: u32,

        /// Per-node degree cap for the recovered structure
        #[arg(long, default_value = "15")]
        max_degree: usize,

        /// Number of cascades
        #[arg(long)]
        trials: usize,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Estimate edge weights instead of structure
        #[arg(long)]
        weights: bool,

        /// Write a JSON run manifest here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate a graph and write it as an edge list
    Generate {
        #[arg(long, value_enum)]
        kind: GraphKind,

        #[arg(long)]
        n: usize,

        /// Edge probability (gnp only)
        #[arg(long, default_value = "0.15")]
        edge_prob: f64,

        #[arg(long, default_value = "42")]
        seed: u64,

        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum GraphKind {
    Tree,
    Gnp,
}

fn load_or_generate_tree(graph: &Option<PathBuf>, n: usize, seed: u64) -> anyhow::Result<Graph> {
    match graph {
        Some(path) => load_edge_list(path),
        None => Ok(generate::random_tree(n, seed)?),
    }
}

fn report(manifest: &RunManifest, elapsed_secs: f64, out: &Option<PathBuf>) -> anyhow::Result<()> {
    println!(
        "{} on {} nodes, {} cascades: {} = {:.5} ({elapsed_secs:.3}s)",
        manifest.experiment, manifest.n, manifest.trials, manifest.score_name, manifest.score
    );
    if let Some(path) = out {
        manifest.write_json(path)?;
    }
    Ok(())
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::LearnTree {
            graph,
            n,
            p,
            max_days,
            trials,
            seed,
            weights,
            out,
        } => {
            let g = load_or_generate_tree(&graph, n, seed)?;
            let start = Instant::now();
            let (experiment, score_name, score) = if weights {
                (
                    "tree-weight",
                    "mae",
                    learn_tree_weight(&g, p, max_days, trials, seed)?,
                )
            } else {
                (
                    "tree-structure",
                    "ec",
                    learn_tree_structure(&g, p, max_days, trials, seed)?,
                )
            };
            let manifest =
                RunManifest::new(experiment, &g, p, max_days, trials, seed, None, score_name, score);
            report(&manifest, start.elapsed().as_secs_f64(), &out)
        }

        Commands::LearnDegreeBounded {
            graph,
            n,
            edge_prob,
            p,
            max_days,
            max_degree,
            trials,
            seed,
            weights,
            out,
        } => {
            let g = match &graph {
                Some(path) => load_edge_list(path)?,
                None => generate::gnp(n, edge_prob, seed)?,
            };
            let start = Instant::now();
            let (experiment, score_name, score) = if weights {
                (
                    "degree-bounded-weight",
                    "mae",
                    learn_degree_bounded_weight(&g, p, max_days, trials, seed)?,
                )
            } else {
                (
                    "degree-bounded-structure",
                    "ec",
                    learn_degree_bounded_structure(&g, p, max_days, max_degree, trials, seed)?,
                )
            };
            let manifest = RunManifest::new(
                experiment,
                &g,
                p,
                max_days,
                trials,
                seed,
                Some(max_degree),
                score_name,
                score,
            );
            report(&manifest, start.elapsed().as_secs_f64(), &out)
        }

        Commands::Generate {
            kind,
            n,
            edge_prob,
            seed,
            out,
        } => {
            let g = match kind {
                GraphKind::Tree => generate::random_tree(n, seed)?,
                GraphKind::Gnp => generate::gnp(n, edge_prob, seed)?,
            };
            write_edge_list(&g, &out)?;
            println!(
                "wrote {} graph: {} nodes, {} edges -> {}",
                match kind {
                    GraphKind::Tree => "tree",
                    GraphKind::Gnp => "gnp",
                },
                g.len(),
                g.edge_count(),
                out.display()
            );
            Ok(())
        }
    }
}
