//! Search result types and statistics

use crate::graph::{Edge, Graph};
use crate::search::config::Algorithm;
use crate::search::state::{Color, SearchState};
use serde::Serialize;
use std::time::Duration;

/// Accepted terminal state in reporting form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    /// Side of every vertex
    pub colors: Vec<Color>,
    /// Edges joining the two sides, in search order
    pub selected_edges: Vec<Edge>,
    /// Total weight of the selected edges
    pub cost: u64,
}

impl Solution {
    /// Build from a terminal state of `graph`.
    pub fn from_state(graph: &Graph, state: &SearchState) -> Self {
        let selected_edges = (0..graph.edge_count())
            .filter(|&i| state.is_selected(graph, i))
            .map(|i| *graph.edge(i))
            .collect();
        Self {
            colors: state.colors.clone(),
            selected_edges,
            cost: state.cost,
        }
    }

    /// Vertices on side A
    pub fn side_a(&self) -> Vec<usize> {
        self.vertices_with(Color::SideA)
    }

    /// Vertices on side B
    pub fn side_b(&self) -> Vec<usize> {
        self.vertices_with(Color::SideB)
    }

    fn vertices_with(&self, color: Color) -> Vec<usize> {
        self.colors
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == color)
            .map(|(v, _)| v)
            .collect()
    }

    /// No selected edge joins two vertices of the same side.
    pub fn is_properly_colored(&self) -> bool {
        self.selected_edges.iter().all(|e| {
            let (cu, cv) = (self.colors[e.u], self.colors[e.v]);
            cu.is_colored() && cv.is_colored() && cu != cv
        })
    }

    /// Selected edges reach every vertex from vertex 0.
    pub fn is_connected(&self) -> bool {
        let n = self.colors.len();
        let mut adj = vec![Vec::new(); n];
        for e in &self.selected_edges {
            adj[e.u].push(e.v);
            adj[e.v].push(e.u);
        }
        let mut visited = vec![false; n];
        let mut stack = vec![0usize];
        visited[0] = true;
        while let Some(v) = stack.pop() {
            for &w in &adj[v] {
                if !visited[w] {
                    visited[w] = true;
                    stack.push(w);
                }
            }
        }
        visited.into_iter().all(|seen| seen)
    }

    /// Sum of selected edge weights, recomputed from the edges
    pub fn edge_weight_sum(&self) -> u64 {
        self.selected_edges.iter().map(|e| e.weight).sum()
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |vs: Vec<usize>| {
            vs.iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(f, "A: {{{}}}", join(self.side_a()))?;
        writeln!(f, "B: {{{}}}", join(self.side_b()))?;
        let edges = self
            .selected_edges
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Edges: {}", edges)?;
        writeln!(f, "Weight sum = {}", self.cost)
    }
}

/// Result of a search operation
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Best solution (None if no connected bipartite spanning subgraph exists)
    pub solution: Option<Solution>,
    /// Statistics from the search
    pub statistics: SearchStatistics,
}

impl SearchResult {
    pub fn new(solution: Option<Solution>, statistics: SearchStatistics) -> Self {
        Self {
            solution,
            statistics,
        }
    }

    /// Optimal cost, if any solution exists
    pub fn cost(&self) -> Option<u64> {
        self.solution.as_ref().map(|s| s.cost)
    }
}

/// Statistics from a search operation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchStatistics {
    /// Algorithm used for the search
    pub algorithm: Algorithm,
    /// Total time spent searching
    pub elapsed_time: Duration,
    /// Number of search nodes visited
    pub nodes_expanded: u64,
    /// Number of nodes cut by bounds
    pub nodes_pruned: u64,
    /// Number of terminal states reached
    pub leaves_reached: u64,
    /// Number of times the incumbent was replaced
    pub improvements_found: u64,
    /// Number of subtree roots handed out (frontier and distributed explorers)
    pub frontier_size: u64,
    /// Whether the whole graph was already connected and bipartite
    pub solved_up_front: bool,
}

impl SearchStatistics {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Default::default()
        }
    }

    /// Fold counters from another run (e.g. a worker) into this one.
    pub fn absorb(&mut self, other: &SearchStatistics) {
        self.nodes_expanded += other.nodes_expanded;
        self.nodes_pruned += other.nodes_pruned;
        self.leaves_reached += other.leaves_reached;
        self.improvements_found += other.improvements_found;
    }

    /// Get nodes expanded per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.nodes_expanded as f64 / secs
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Algorithm: {}\n", self.algorithm));
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        if self.solved_up_front {
            s.push_str("Graph is connected and bipartite, no search needed\n");
            return s;
        }
        s.push_str(&format!("Nodes expanded: {}\n", self.nodes_expanded));
        s.push_str(&format!("Throughput: {:.0} nodes/sec\n", self.throughput()));
        s.push_str(&format!("Nodes pruned: {}\n", self.nodes_pruned));
        s.push_str(&format!("Leaves reached: {}\n", self.leaves_reached));
        s.push_str(&format!(
            "Improvements found: {}\n",
            self.improvements_found
        ));
        if self.frontier_size > 0 {
            s.push_str(&format!("Frontier size: {}\n", self.frontier_size));
        }
        s
    }
}
