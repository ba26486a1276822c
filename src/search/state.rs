//! Partial-solution snapshots for the branch-and-bound search
//!
//! A [`SearchState`] is a plain value. Every branch clones its parent and
//! mutates only its own copy; no state is ever shared between siblings.

use crate::graph::Graph;
use serde::Serialize;

/// Side assignment of a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum Color {
    #[default]
    Uncolored = 0,
    SideA = 1,
    SideB = 2,
}

impl Color {
    /// The other side; `Uncolored` has no opposite and maps to itself.
    pub fn opposite(self) -> Self {
        match self {
            Color::SideA => Color::SideB,
            Color::SideB => Color::SideA,
            Color::Uncolored => Color::Uncolored,
        }
    }

    pub fn is_colored(self) -> bool {
        self != Color::Uncolored
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Color::Uncolored),
            1 => Some(Color::SideA),
            2 => Some(Color::SideB),
            _ => None,
        }
    }
}

/// Snapshot of a partial solution
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchState {
    /// Index of the next undecided edge
    pub edge_index: usize,
    /// Color of every vertex
    pub colors: Vec<Color>,
    /// Number of selected edges
    pub used_edges: usize,
    /// Total weight of selected edges
    pub cost: u64,
    /// Total weight of edges before `edge_index`, selected or not
    pub processed_weight: u64,
}

impl SearchState {
    /// All-uncolored state with no decisions made.
    pub fn root(graph: &Graph) -> Self {
        Self {
            edge_index: 0,
            colors: vec![Color::Uncolored; graph.vertex_count()],
            used_edges: 0,
            cost: 0,
            processed_weight: 0,
        }
    }

    /// Shutdown marker for the worker protocol.
    ///
    /// Any state with every vertex uncolored is treated as the sentinel; a
    /// real search state has colored at least one vertex after its first
    /// edge decision.
    pub fn sentinel(vertex_count: usize) -> Self {
        Self {
            edge_index: 0,
            colors: vec![Color::Uncolored; vertex_count],
            used_edges: 0,
            cost: 0,
            processed_weight: 0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.colors.iter().all(|c| *c == Color::Uncolored)
    }

    pub fn vertex_count(&self) -> usize {
        self.colors.len()
    }

    /// Whether every edge has been decided
    pub fn is_leaf(&self, graph: &Graph) -> bool {
        self.edge_index == graph.edge_count()
    }

    /// Number of undecided edges
    pub fn remaining_edges(&self, graph: &Graph) -> usize {
        graph.edge_count() - self.edge_index
    }

    /// Weight of undecided edges
    pub fn remaining_weight(&self, graph: &Graph) -> u64 {
        graph.total_weight() - self.processed_weight
    }

    /// Select the current edge and advance the cursor.
    pub fn add_edge(&mut self, graph: &Graph) {
        let weight = graph.edge(self.edge_index).weight;
        self.processed_weight += weight;
        self.cost += weight;
        self.used_edges += 1;
        self.edge_index += 1;
    }

    /// Skip the current edge and advance the cursor.
    pub fn skip_edge(&mut self, graph: &Graph) {
        self.processed_weight += graph.edge(self.edge_index).weight;
        self.edge_index += 1;
    }

    /// Whether the edge at `index` is selected, judged by its endpoint colors.
    ///
    /// Only meaningful for decided edges: every decision colors both endpoints,
    /// and an edge is selected exactly when they ended up on different sides.
    pub fn is_selected(&self, graph: &Graph, index: usize) -> bool {
        let edge = graph.edge(index);
        let (cu, cv) = (self.colors[edge.u], self.colors[edge.v]);
        cu.is_colored() && cv.is_colored() && cu != cv
    }

    /// Whether the selected edges connect every vertex.
    pub fn is_connected(&self, graph: &Graph) -> bool {
        graph.is_connected_by(|e| {
            let (cu, cv) = (self.colors[e.u], self.colors[e.v]);
            cu.is_colored() && cv.is_colored() && cu != cv
        })
    }

    /// Acceptance rule for terminal states.
    ///
    /// A candidate replaces the incumbent when it is at least as heavy, so the
    /// later of two equal-cost solutions wins.
    pub fn improves_on(&self, incumbent: Option<&SearchState>) -> bool {
        match incumbent {
            Some(best) => self.cost >= best.cost,
            None => true,
        }
    }
}
