use anyhow::{Context, bail};
use bipartite_bnb::graph::{Graph, WeightWindow, load_matrix_file};
use bipartite_bnb::known_optimum;
use bipartite_bnb::search::parallel::DistributedConfig;
use bipartite_bnb::search::{Algorithm, SearchConfig, SearchResult, solve};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "bnb")]
#[command(about = "bnb - maximum-weight connected bipartite spanning subgraph")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// CLI algorithm selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliAlgorithm {
    /// Single-threaded depth-first search
    Sequential,
    /// Every branch spawned as a task on a thread pool
    TaskParallel,
    /// Breadth-first frontier explored with a parallel for-each
    Frontier,
    /// Coordinator handing frontier subtrees to isolated workers
    Distributed,
}

impl From<CliAlgorithm> for Algorithm {
    fn from(cli: CliAlgorithm) -> Self {
        match cli {
            CliAlgorithm::Sequential => Algorithm::Sequential,
            CliAlgorithm::TaskParallel => Algorithm::TaskParallel,
            CliAlgorithm::Frontier => Algorithm::Frontier,
            CliAlgorithm::Distributed => Algorithm::Distributed,
        }
    }
}

/// Options shared by every subcommand that runs a search
#[derive(ClapArgs, Debug)]
struct SearchOptions {
    /// Adjacency-matrix files to solve
    #[arg(required = true)]
    files: Vec<PathBuf>,

    // --- Parallelism ---
    /// Threads in the task pool (defaults to the number of CPUs)
    #[arg(long, short = 'j')]
    threads: Option<usize>,
    /// Workers for the distributed explorer (defaults to the number of CPUs)
    #[arg(long)]
    workers: Option<usize>,
    /// Task-pool threads inside each distributed worker
    #[arg(long, default_value = "1")]
    threads_per_worker: usize,
    /// Frontier roots per thread or worker
    #[arg(long, default_value = "2")]
    frontier_factor: usize,

    // --- Search ---
    /// Disable bound-based pruning (explores the whole tree)
    #[arg(long)]
    no_pruning: bool,

    // --- Loading ---
    /// Smallest matrix entry kept as an edge
    #[arg(long, default_value = "80")]
    min_weight: i64,
    /// Largest matrix entry kept as an edge
    #[arg(long, default_value = "120")]
    max_weight: i64,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

impl SearchOptions {
    fn config(&self, algorithm: Algorithm) -> SearchConfig {
        let mut distributed =
            DistributedConfig::default().with_threads_per_worker(self.threads_per_worker);
        if let Some(workers) = self.workers {
            distributed = distributed.with_workers(workers);
        }
        let mut config = SearchConfig::default()
            .with_algorithm(algorithm)
            .with_pruning(!self.no_pruning)
            .with_frontier_factor(self.frontier_factor)
            .with_distributed(distributed);
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        config
    }

    fn window(&self) -> anyhow::Result<WeightWindow> {
        if self.min_weight < 0 {
            bail!("--min-weight must not be negative (got {})", self.min_weight);
        }
        Ok(WeightWindow {
            min: self.min_weight,
            max: self.max_weight,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Solve each file with one explorer
    Solve {
        #[command(flatten)]
        options: SearchOptions,
        /// Search algorithm to use
        #[arg(long, value_enum, default_value = "sequential")]
        algorithm: CliAlgorithm,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Solve each file with every explorer and compare the optimal weights
    Check {
        #[command(flatten)]
        options: SearchOptions,
    },
}

/// Per-file output of `solve --json`
#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    vertices: usize,
    edges: usize,
    known_optimum: Option<u64>,
    #[serde(flatten)]
    result: &'a SearchResult,
}

// --- Logging ---

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// --- Commands ---

fn load(path: &Path, window: WeightWindow) -> anyhow::Result<Graph> {
    load_matrix_file(path, window).with_context(|| format!("loading {}", path.display()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Warn when a reference instance does not reach its known optimum.
fn compare_with_known(name: &str, cost: Option<u64>) {
    if let Some(expected) = known_optimum(name) {
        if cost != Some(expected) {
            tracing::warn!(file = name, ?cost, expected, "result differs from known optimum");
        }
    }
}

fn run_solve(options: &SearchOptions, algorithm: Algorithm, json: bool) -> anyhow::Result<()> {
    let config = options.config(algorithm);
    let window = options.window()?;
    for path in &options.files {
        let graph = load(path, window)?;
        let name = file_name(path);
        let expected = known_optimum(&name);
        let result = solve(&graph, &config).with_context(|| format!("solving {}", name))?;
        compare_with_known(&name, result.cost());

        if json {
            let report = FileReport {
                file: name,
                vertices: graph.vertex_count(),
                edges: graph.edge_count(),
                known_optimum: expected,
                result: &result,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            continue;
        }

        println!(
            "== {} ({} vertices, {} edges)",
            name,
            graph.vertex_count(),
            graph.edge_count()
        );
        match &result.solution {
            Some(solution) => print!("{}", solution),
            None => println!("No connected bipartite spanning subgraph exists"),
        }
        print!("{}", result.statistics.format_summary());
        println!();
    }
    Ok(())
}

fn run_check(options: &SearchOptions) -> anyhow::Result<()> {
    let window = options.window()?;
    let mut disagreements = Vec::new();
    for path in &options.files {
        let graph = load(path, window)?;
        let name = file_name(path);
        println!("== {}", name);

        let mut costs = Vec::with_capacity(Algorithm::ALL.len());
        for algorithm in Algorithm::ALL {
            let result = solve(&graph, &options.config(algorithm))
                .with_context(|| format!("solving {} with {}", name, algorithm))?;
            println!(
                "  {:<14} weight {:>8}  nodes {:>12}  {:.2?}",
                algorithm.to_string(),
                result
                    .cost()
                    .map_or_else(|| "-".to_string(), |c| c.to_string()),
                result.statistics.nodes_expanded,
                result.statistics.elapsed_time
            );
            costs.push(result.cost());
        }

        compare_with_known(&name, costs[0]);
        if costs.iter().all(|c| *c == costs[0]) {
            println!("  ok");
        } else {
            println!("  MISMATCH");
            disagreements.push(name);
        }
    }

    if !disagreements.is_empty() {
        bail!("explorers disagree on: {}", disagreements.join(", "));
    }
    Ok(())
}

// --- Main Function ---
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Solve {
            options,
            algorithm,
            json,
        } => {
            init_logging(options.verbose);
            run_solve(&options, algorithm.into(), json)
        }
        Commands::Check { options } => {
            init_logging(options.verbose);
            run_check(&options)
        }
    }
}
