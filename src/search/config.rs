//! Configuration types for the explorers

use crate::search::parallel::DistributedConfig;

/// Explorer selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Single-threaded recursive enumeration
    #[default]
    Sequential,
    /// Every branch submitted as a task on a shared thread pool
    TaskParallel,
    /// Breadth-first frontier explored with a parallel for-each
    Frontier,
    /// Coordinator handing frontier subtrees to isolated workers
    Distributed,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Sequential,
        Algorithm::TaskParallel,
        Algorithm::Frontier,
        Algorithm::Distributed,
    ];
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Sequential => write!(f, "sequential"),
            Algorithm::TaskParallel => write!(f, "task-parallel"),
            Algorithm::Frontier => write!(f, "frontier"),
            Algorithm::Distributed => write!(f, "distributed"),
        }
    }
}

impl std::str::FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "sequential" | "seq" => Ok(Algorithm::Sequential),
            "task-parallel" | "task" | "tasks" => Ok(Algorithm::TaskParallel),
            "frontier" | "data" => Ok(Algorithm::Frontier),
            "distributed" | "dist" | "mpi" => Ok(Algorithm::Distributed),
            _ => Err(format!(
                "Unknown algorithm: '{}'. Valid options: sequential, task-parallel, frontier, distributed",
                s
            )),
        }
    }
}

/// Main search configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Explorer to use
    pub algorithm: Algorithm,
    /// Threads in the task pool (task-parallel and frontier explorers)
    pub threads: usize,
    /// Whether bounds may prune subtrees
    pub pruning: bool,
    /// Frontier size per worker or thread
    pub frontier_factor: usize,
    /// Distributed-specific configuration
    pub distributed: DistributedConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            threads: num_cpus::get(),
            pruning: true,
            frontier_factor: 2,
            distributed: DistributedConfig::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_frontier_factor(mut self, factor: usize) -> Self {
        self.frontier_factor = factor.max(1);
        self
    }

    pub fn with_distributed(mut self, distributed: DistributedConfig) -> Self {
        self.distributed = distributed;
        self
    }
}
