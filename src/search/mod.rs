//! Branch-and-bound search for the maximum-weight connected bipartite
//! spanning subgraph
//!
//! This module provides several explorers over one shared rule set:
//! - Sequential: depth-first recursion with a single incumbent
//! - Task-parallel: every branch submitted as a task on a bounded thread pool
//! - Frontier: a breadth-first frontier explored with a parallel for-each
//! - Distributed: a coordinator handing frontier subtrees to isolated workers
//!
//! Branching and bounding live in [`branching`] and [`bounds`]; the explorers
//! only decide how children are scheduled.

pub mod bounds;
pub mod branching;
pub mod config;
pub mod frontier;
pub mod incumbent;
pub mod parallel;
pub mod result;
pub mod sequential;
pub mod state;
pub mod task_parallel;

pub use bounds::Bounds;
pub use branching::{Brancher, Expansion};
pub use config::{Algorithm, SearchConfig};
pub use frontier::{Frontier, FrontierBuilder, FrontierExplorer};
pub use incumbent::Incumbent;
pub use parallel::{DistributedConfig, DistributedExplorer};
pub use result::{SearchResult, SearchStatistics, Solution};
pub use sequential::SequentialExplorer;
pub use state::{Color, SearchState};
pub use task_parallel::TaskParallelExplorer;

use crate::error::Result;
use crate::graph::Graph;
use std::time::Instant;

/// Trait for explorers that find the optimal subgraph
pub trait SearchAlgorithm {
    /// Search `graph` for a maximum-weight connected bipartite spanning subgraph
    ///
    /// # Arguments
    /// * `graph` - The validated input graph
    /// * `config` - Search configuration parameters
    ///
    /// # Returns
    /// A SearchResult containing the best solution (if any) and statistics
    fn search(&mut self, graph: &Graph, config: &SearchConfig) -> Result<SearchResult>;

    /// Get statistics from the most recent search
    fn statistics(&self) -> SearchStatistics;

    /// Reset the search state for a new search
    fn reset(&mut self);
}

/// Best state and counters from exploring one subtree
#[derive(Debug, Clone, Default)]
pub struct Exploration {
    pub best: Option<SearchState>,
    pub statistics: SearchStatistics,
}

/// Run the explorer selected by `config.algorithm`.
pub fn solve(graph: &Graph, config: &SearchConfig) -> Result<SearchResult> {
    match config.algorithm {
        Algorithm::Sequential => SequentialExplorer::new().search(graph, config),
        Algorithm::TaskParallel => TaskParallelExplorer::new().search(graph, config),
        Algorithm::Frontier => FrontierExplorer::new().search(graph, config),
        Algorithm::Distributed => DistributedExplorer::new().search(graph, config),
    }
}

/// Terminal state selecting every edge, if the whole graph is already
/// connected and bipartite.
pub fn solve_up_front(graph: &Graph) -> Option<SearchState> {
    let sides = graph.two_coloring()?;
    if !graph.is_connected_by(|_| true) {
        return None;
    }
    let mut state = SearchState::root(graph);
    state.colors = sides
        .into_iter()
        .map(|b| if b { Color::SideB } else { Color::SideA })
        .collect();
    state.edge_index = graph.edge_count();
    state.used_edges = graph.edge_count();
    state.cost = graph.total_weight();
    state.processed_weight = graph.total_weight();
    Some(state)
}

/// Shared prologue of every explorer: try the up-front shortcut.
///
/// Returns the finished result when the shortcut applies.
pub(crate) fn try_up_front(
    graph: &Graph,
    algorithm: Algorithm,
    start: Instant,
) -> Option<SearchResult> {
    let state = solve_up_front(graph)?;
    let mut statistics = SearchStatistics::new(algorithm);
    statistics.solved_up_front = true;
    statistics.elapsed_time = start.elapsed();
    tracing::info!(
        %algorithm,
        cost = state.cost,
        "graph is connected and bipartite, returning every edge"
    );
    Some(SearchResult::new(
        Some(Solution::from_state(graph, &state)),
        statistics,
    ))
}

/// Shared epilogue: log and package an exploration.
pub(crate) fn finish(
    graph: &Graph,
    exploration: Exploration,
    start: Instant,
) -> SearchResult {
    let Exploration {
        best,
        mut statistics,
    } = exploration;
    statistics.elapsed_time = start.elapsed();
    tracing::info!(
        algorithm = %statistics.algorithm,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        cost = ?best.as_ref().map(|s| s.cost),
        nodes = statistics.nodes_expanded,
        elapsed = ?statistics.elapsed_time,
        "search finished"
    );
    let solution = best.map(|state| Solution::from_state(graph, &state));
    SearchResult::new(solution, statistics)
}
