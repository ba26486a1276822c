//! Breadth-first frontier construction and the frontier-seeded explorer
//!
//! The builder expands the root in FIFO order until enough independent
//! subtree roots exist to keep every worker busy. The explorer then runs the
//! depth-first recursion over each root in a rayon parallel iterator, all
//! roots sharing one incumbent.

use crate::error::Result;
use crate::graph::Graph;
use crate::search::branching::{Brancher, Expansion};
use crate::search::config::{Algorithm, SearchConfig};
use crate::search::incumbent::Incumbent;
use crate::search::result::{SearchResult, SearchStatistics};
use crate::search::sequential::DepthFirst;
use crate::search::state::SearchState;
use crate::search::task_parallel::build_pool;
use crate::search::{Bounds, Exploration, SearchAlgorithm, finish, try_up_front};
use rayon::ThreadPool;
use rayon::prelude::*;
use std::collections::VecDeque;
use std::time::Instant;

/// Independent subtree roots plus whatever the build phase already solved
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    /// Unexpanded states, in creation order
    pub roots: Vec<SearchState>,
    /// Best connected leaf met while building
    pub best: Option<SearchState>,
    /// Counters for the build phase
    pub statistics: SearchStatistics,
}

impl Frontier {
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// FIFO partial expansion of the search tree
#[derive(Clone, Copy)]
pub struct FrontierBuilder<'g> {
    brancher: Brancher<'g>,
}

impl<'g> FrontierBuilder<'g> {
    pub fn new(brancher: Brancher<'g>) -> Self {
        Self { brancher }
    }

    /// Expand from `root` until at least `target` states are queued or the
    /// queue runs dry.
    ///
    /// Leaves met on the way are offered to a local incumbent seeded with
    /// `seed`; pruned states are dropped.
    pub fn build(&self, root: SearchState, target: usize, seed: Option<SearchState>) -> Frontier {
        let incumbent = Incumbent::seeded(seed);
        let mut statistics = SearchStatistics::default();
        let mut queue = VecDeque::from([root]);

        while queue.len() < target {
            let Some(state) = queue.pop_front() else {
                break;
            };
            statistics.nodes_expanded += 1;
            match self
                .brancher
                .expand(&state, incumbent.cost(), |child| queue.push_back(child))
            {
                Expansion::Leaf => {
                    statistics.leaves_reached += 1;
                    if state.is_connected(self.brancher.graph()) && incumbent.offer(&state) {
                        statistics.improvements_found += 1;
                    }
                }
                Expansion::Pruned => statistics.nodes_pruned += 1,
                Expansion::Branched(_) => {}
            }
        }

        statistics.frontier_size = queue.len() as u64;
        tracing::debug!(
            target_size = target,
            size = queue.len(),
            expanded = statistics.nodes_expanded,
            "frontier built"
        );
        Frontier {
            roots: queue.into(),
            best: incumbent.into_inner(),
            statistics,
        }
    }
}

/// Explorer that runs one depth-first search per frontier root in parallel
pub struct FrontierExplorer {
    statistics: SearchStatistics,
}

impl FrontierExplorer {
    pub fn new() -> Self {
        Self {
            statistics: SearchStatistics::new(Algorithm::Frontier),
        }
    }

    /// Explore every root of `frontier` on `pool`.
    pub fn explore(pool: &ThreadPool, brancher: Brancher<'_>, frontier: Frontier) -> Exploration {
        let Frontier {
            roots,
            best,
            statistics: mut totals,
        } = frontier;
        totals.algorithm = Algorithm::Frontier;
        let incumbent = Incumbent::seeded(best);

        let explored = pool.install(|| {
            roots
                .into_par_iter()
                .map(|root| {
                    let mut dfs = DepthFirst::new(brancher, &incumbent, Algorithm::Frontier);
                    dfs.expand(root);
                    dfs.statistics
                })
                .reduce(
                    || SearchStatistics::new(Algorithm::Frontier),
                    |mut acc, stats| {
                        acc.absorb(&stats);
                        acc
                    },
                )
        });
        totals.absorb(&explored);

        Exploration {
            best: incumbent.into_inner(),
            statistics: totals,
        }
    }
}

impl Default for FrontierExplorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchAlgorithm for FrontierExplorer {
    fn search(&mut self, graph: &Graph, config: &SearchConfig) -> Result<SearchResult> {
        self.reset();
        let start = Instant::now();
        if let Some(result) = try_up_front(graph, Algorithm::Frontier, start) {
            self.statistics = result.statistics.clone();
            return Ok(result);
        }

        let pool = build_pool(config.threads, "bnb-frontier")?;
        let brancher = Brancher::new(graph, Bounds::new(config.pruning));
        let target = config.threads * config.frontier_factor;
        tracing::info!(
            threads = config.threads,
            target_size = target,
            "frontier search started"
        );

        let frontier = FrontierBuilder::new(brancher).build(SearchState::root(graph), target, None);
        let exploration = Self::explore(&pool, brancher, frontier);
        let result = finish(graph, exploration, start);
        self.statistics = result.statistics.clone();
        Ok(result)
    }

    fn statistics(&self) -> SearchStatistics {
        self.statistics.clone()
    }

    fn reset(&mut self) {
        self.statistics = SearchStatistics::new(Algorithm::Frontier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SequentialExplorer;

    fn triangle() -> Graph {
        Graph::from_triples(3, &[(0, 1, 100), (0, 2, 100), (1, 2, 100)]).unwrap()
    }

    #[test]
    fn test_root_expands_into_four() {
        let graph = triangle();
        let brancher = Brancher::new(&graph, Bounds::default());
        let frontier = FrontierBuilder::new(brancher).build(SearchState::root(&graph), 2, None);

        assert_eq!(frontier.len(), 4);
        assert_eq!(frontier.statistics.nodes_expanded, 1);
        assert_eq!(frontier.statistics.frontier_size, 4);
        assert!(frontier.best.is_none());
        assert!(frontier.roots.iter().all(|s| s.edge_index == 1));
        assert!(frontier.roots.iter().all(|s| !s.is_sentinel()));
    }

    #[test]
    fn test_roots_kept_in_creation_order() {
        let graph = triangle();
        let brancher = Brancher::new(&graph, Bounds::default());
        let frontier = FrontierBuilder::new(brancher).build(SearchState::root(&graph), 4, None);

        // add A/B, add B/A, skip A/A, skip B/B
        let costs: Vec<u64> = frontier.roots.iter().map(|s| s.cost).collect();
        assert_eq!(costs, vec![100, 100, 0, 0]);
    }

    #[test]
    fn test_exhausted_queue_solves_in_build_phase() {
        let graph = triangle();
        let brancher = Brancher::new(&graph, Bounds::default());
        let frontier =
            FrontierBuilder::new(brancher).build(SearchState::root(&graph), usize::MAX, None);

        assert!(frontier.is_empty());
        assert_eq!(frontier.best.map(|s| s.cost), Some(200));
        assert!(frontier.statistics.leaves_reached > 0);
    }

    #[test]
    fn test_matches_sequential() {
        let graph = Graph::from_triples(
            5,
            &[(0, 1, 100), (1, 2, 100), (2, 3, 100), (3, 4, 100), (0, 4, 90), (0, 2, 80)],
        )
        .unwrap();
        let sequential = SequentialExplorer::new()
            .search(&graph, &SearchConfig::default())
            .unwrap();
        for threads in [1, 3] {
            let config = SearchConfig::default()
                .with_algorithm(Algorithm::Frontier)
                .with_threads(threads);
            let result = FrontierExplorer::new().search(&graph, &config).unwrap();
            assert_eq!(result.cost(), sequential.cost());
            assert_eq!(result.statistics.algorithm, Algorithm::Frontier);
            assert!(result.statistics.frontier_size > 0);
        }
    }

    #[test]
    fn test_no_solution_when_disconnected() {
        let graph = Graph::from_triples(4, &[(0, 1, 100), (1, 2, 90), (0, 2, 80)]).unwrap();
        let result = FrontierExplorer::new()
            .search(&graph, &SearchConfig::default().with_threads(2))
            .unwrap();
        assert!(result.solution.is_none());
    }
}
