//! Task-parallel explorer
//!
//! Each child produced by the branching rules is spawned as its own task on a
//! bounded rayon pool. A frame opens a scope for its children, so it only
//! completes once every child task has completed. The incumbent is the only
//! state shared between tasks.

use crate::error::{BnbError, Result};
use crate::graph::Graph;
use crate::search::branching::{Brancher, Expansion};
use crate::search::config::{Algorithm, SearchConfig};
use crate::search::incumbent::Incumbent;
use crate::search::result::{SearchResult, SearchStatistics};
use crate::search::state::SearchState;
use crate::search::{Bounds, Exploration, SearchAlgorithm, finish, try_up_front};
use rayon::ThreadPool;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Explorer that schedules every branch on a thread pool
pub struct TaskParallelExplorer {
    statistics: SearchStatistics,
}

impl TaskParallelExplorer {
    pub fn new() -> Self {
        Self {
            statistics: SearchStatistics::new(Algorithm::TaskParallel),
        }
    }

    /// Explore the subtree under `root` on `pool`, starting from an optional known solution.
    pub fn explore(
        pool: &ThreadPool,
        brancher: Brancher<'_>,
        root: SearchState,
        seed: Option<SearchState>,
    ) -> Exploration {
        let run = TaskRun {
            brancher,
            incumbent: Incumbent::seeded(seed),
            counters: Counters::default(),
        };
        pool.install(|| run.expand(root));
        let statistics = run.counters.snapshot(Algorithm::TaskParallel);
        Exploration {
            best: run.incumbent.into_inner(),
            statistics,
        }
    }
}

impl Default for TaskParallelExplorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchAlgorithm for TaskParallelExplorer {
    fn search(&mut self, graph: &Graph, config: &SearchConfig) -> Result<SearchResult> {
        self.reset();
        let start = Instant::now();
        if let Some(result) = try_up_front(graph, Algorithm::TaskParallel, start) {
            self.statistics = result.statistics.clone();
            return Ok(result);
        }

        let pool = build_pool(config.threads, "bnb-task")?;
        tracing::info!(threads = config.threads, "task-parallel search started");
        let brancher = Brancher::new(graph, Bounds::new(config.pruning));
        let exploration = Self::explore(&pool, brancher, SearchState::root(graph), None);
        let result = finish(graph, exploration, start);
        self.statistics = result.statistics.clone();
        Ok(result)
    }

    fn statistics(&self) -> SearchStatistics {
        self.statistics.clone()
    }

    fn reset(&mut self) {
        self.statistics = SearchStatistics::new(Algorithm::TaskParallel);
    }
}

/// Build a pool with `threads` workers named `<prefix>-<index>`.
pub fn build_pool(threads: usize, prefix: &str) -> Result<ThreadPool> {
    let prefix = prefix.to_string();
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(move |i| format!("{}-{}", prefix, i))
        .build()
        .map_err(|e| BnbError::ThreadPool(e.to_string()))
}

/// Node counters updated from many tasks at once
#[derive(Debug, Default)]
struct Counters {
    expanded: AtomicU64,
    pruned: AtomicU64,
    leaves: AtomicU64,
    improvements: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self, algorithm: Algorithm) -> SearchStatistics {
        let mut stats = SearchStatistics::new(algorithm);
        stats.nodes_expanded = self.expanded.load(Ordering::Relaxed);
        stats.nodes_pruned = self.pruned.load(Ordering::Relaxed);
        stats.leaves_reached = self.leaves.load(Ordering::Relaxed);
        stats.improvements_found = self.improvements.load(Ordering::Relaxed);
        stats
    }
}

struct TaskRun<'g> {
    brancher: Brancher<'g>,
    incumbent: Incumbent,
    counters: Counters,
}

impl TaskRun<'_> {
    fn expand(&self, state: SearchState) {
        Counters::bump(&self.counters.expanded);
        let outcome = rayon::scope(|scope| {
            self.brancher
                .expand(&state, self.incumbent.cost(), |child| {
                    scope.spawn(move |_| self.expand(child));
                })
        });
        match outcome {
            Expansion::Leaf => {
                Counters::bump(&self.counters.leaves);
                if state.is_connected(self.brancher.graph()) && self.incumbent.offer(&state) {
                    Counters::bump(&self.counters.improvements);
                    tracing::debug!(cost = state.cost, "new incumbent");
                }
            }
            Expansion::Pruned => Counters::bump(&self.counters.pruned),
            Expansion::Branched(_) => {}
        }
    }
}
