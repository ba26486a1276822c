//! Branching rules shared by every explorer
//!
//! Each explorer decides how children are scheduled (inline recursion, task
//! submission, a FIFO frontier); this module decides what the children are.
//! Branching on edge `(u, v)` at the cursor depends on the endpoint colors:
//!
//! | colors of `u`, `v`   | children                                           |
//! |----------------------|----------------------------------------------------|
//! | equal                | skip                                               |
//! | both uncolored       | select A/B, select B/A, skip A/A, skip B/B          |
//! | one colored          | select with opposite color, skip with same color   |
//! | different            | select                                             |

use crate::graph::Graph;
use crate::search::bounds::Bounds;
use crate::search::state::{Color, SearchState};

/// Outcome of expanding one search node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// All edges decided; the caller must judge the state as a solution
    Leaf,
    /// Bounds ruled the subtree out
    Pruned,
    /// Children were emitted
    Branched(usize),
}

/// Applies bounds and branching rules to search nodes.
#[derive(Debug, Clone, Copy)]
pub struct Brancher<'g> {
    graph: &'g Graph,
    bounds: Bounds,
}

impl<'g> Brancher<'g> {
    pub fn new(graph: &'g Graph, bounds: Bounds) -> Self {
        Self { graph, bounds }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Expand `state` one step, passing every child to `emit` by value.
    pub fn expand<F>(&self, state: &SearchState, incumbent_cost: u64, mut emit: F) -> Expansion
    where
        F: FnMut(SearchState),
    {
        if state.is_leaf(self.graph) {
            return Expansion::Leaf;
        }
        if !self
            .bounds
            .admits_improvement(self.graph, state, incumbent_cost)
        {
            return Expansion::Pruned;
        }

        let edge = self.graph.edge(state.edge_index);
        let (u, v) = (edge.u, edge.v);
        let (cu, cv) = (state.colors[u], state.colors[v]);

        let mut emitted = 0;
        let mut push = |select: bool, colors: [(usize, Color); 2]| {
            let mut child = state.clone();
            if select {
                child.add_edge(self.graph);
            } else {
                child.skip_edge(self.graph);
            }
            for (vertex, color) in colors {
                child.colors[vertex] = color;
            }
            emit(child);
            emitted += 1;
        };

        match (cu, cv) {
            (Color::Uncolored, Color::Uncolored) => {
                push(true, [(u, Color::SideA), (v, Color::SideB)]);
                push(true, [(u, Color::SideB), (v, Color::SideA)]);
                push(false, [(u, Color::SideA), (v, Color::SideA)]);
                push(false, [(u, Color::SideB), (v, Color::SideB)]);
            }
            (colored, Color::Uncolored) => {
                push(true, [(u, colored), (v, colored.opposite())]);
                push(false, [(u, colored), (v, colored)]);
            }
            (Color::Uncolored, colored) => {
                push(true, [(v, colored), (u, colored.opposite())]);
                push(false, [(v, colored), (u, colored)]);
            }
            (a, b) if a == b => push(false, [(u, a), (v, b)]),
            (a, b) => push(true, [(u, a), (v, b)]),
        }

        Expansion::Branched(emitted)
    }
}
