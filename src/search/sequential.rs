//! Single-threaded depth-first explorer
//!
//! Children are explored inline, in the order the branching rules emit them.
//! With the `>=` acceptance rule this makes the reported solution among
//! equal-cost optima deterministic: the last one reached wins.

use crate::error::Result;
use crate::graph::Graph;
use crate::search::branching::{Brancher, Expansion};
use crate::search::config::{Algorithm, SearchConfig};
use crate::search::incumbent::Incumbent;
use crate::search::result::{SearchResult, SearchStatistics};
use crate::search::state::SearchState;
use crate::search::{Bounds, Exploration, SearchAlgorithm, finish, try_up_front};
use std::time::Instant;

/// Recursive depth-first explorer
pub struct SequentialExplorer {
    statistics: SearchStatistics,
}

impl SequentialExplorer {
    pub fn new() -> Self {
        Self {
            statistics: SearchStatistics::new(Algorithm::Sequential),
        }
    }

    /// Explore the subtree under `root`, starting from an optional known solution.
    pub fn explore(brancher: Brancher<'_>, root: SearchState, seed: Option<SearchState>) -> Exploration {
        let incumbent = Incumbent::seeded(seed);
        let mut dfs = DepthFirst::new(brancher, &incumbent, Algorithm::Sequential);
        dfs.expand(root);
        let statistics = dfs.statistics;
        Exploration {
            best: incumbent.into_inner(),
            statistics,
        }
    }
}

impl Default for SequentialExplorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchAlgorithm for SequentialExplorer {
    fn search(&mut self, graph: &Graph, config: &SearchConfig) -> Result<SearchResult> {
        self.reset();
        let start = Instant::now();
        if let Some(result) = try_up_front(graph, Algorithm::Sequential, start) {
            self.statistics = result.statistics.clone();
            return Ok(result);
        }

        let brancher = Brancher::new(graph, Bounds::new(config.pruning));
        let exploration = Self::explore(brancher, SearchState::root(graph), None);
        let result = finish(graph, exploration, start);
        self.statistics = result.statistics.clone();
        Ok(result)
    }

    fn statistics(&self) -> SearchStatistics {
        self.statistics.clone()
    }

    fn reset(&mut self) {
        self.statistics = SearchStatistics::new(Algorithm::Sequential);
    }
}

/// Depth-first recursion against an incumbent that may be shared.
///
/// The frontier explorer runs one of these per frontier root, all feeding
/// the same [`Incumbent`].
pub(crate) struct DepthFirst<'a, 'g> {
    brancher: Brancher<'g>,
    incumbent: &'a Incumbent,
    pub(crate) statistics: SearchStatistics,
}

impl<'a, 'g> DepthFirst<'a, 'g> {
    pub(crate) fn new(brancher: Brancher<'g>, incumbent: &'a Incumbent, algorithm: Algorithm) -> Self {
        Self {
            brancher,
            incumbent,
            statistics: SearchStatistics::new(algorithm),
        }
    }

    pub(crate) fn expand(&mut self, state: SearchState) {
        self.statistics.nodes_expanded += 1;
        let brancher = self.brancher;
        let outcome = brancher.expand(&state, self.incumbent.cost(), |child| self.expand(child));
        match outcome {
            Expansion::Leaf => {
                self.statistics.leaves_reached += 1;
                if state.is_connected(brancher.graph()) && self.incumbent.offer(&state) {
                    self.statistics.improvements_found += 1;
                    tracing::debug!(cost = state.cost, "new incumbent");
                }
            }
            Expansion::Pruned => self.statistics.nodes_pruned += 1,
            Expansion::Branched(_) => {}
        }
    }
}
