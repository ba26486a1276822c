//! Pruning predicate for the branch-and-bound search

use crate::graph::Graph;
use crate::search::state::SearchState;

/// Decides whether a subtree can still beat the incumbent.
///
/// Two conditions prune a state:
/// - the selected weight plus every undecided edge's weight is below the
///   incumbent cost;
/// - even selecting every undecided edge cannot reach the `V - 1` edges a
///   connected spanning subgraph needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    enabled: bool,
}

impl Default for Bounds {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Bounds {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Bounds that never prune; used to validate pruning against exhaustive search.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns false when the subtree under `state` cannot reach `incumbent_cost`.
    pub fn admits_improvement(&self, graph: &Graph, state: &SearchState, incumbent_cost: u64) -> bool {
        if !self.enabled {
            return true;
        }
        if state.cost + state.remaining_weight(graph) < incumbent_cost {
            return false;
        }
        let reachable_edges = state.used_edges + state.remaining_edges(graph);
        reachable_edges + 1 >= graph.vertex_count()
    }
}
