//! Immutable weighted graph model
//!
//! Edges are kept in a fixed order: descending weight, ties broken by the
//! endpoint pair `(u, v)` ascending. Every search state indexes into this
//! order through its edge cursor, so the order is part of the model.

pub mod loader;

use crate::error::GraphError;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

pub use loader::{WeightWindow, load_matrix_file, parse_matrix};

/// Undirected weighted edge with `u < v`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
    pub weight: u64,
}

impl Edge {
    pub fn new(u: usize, v: usize, weight: u64) -> Self {
        Self { u, v, weight }
    }

    /// Search order: heavier first, then by endpoints
    fn search_order(&self, other: &Self) -> std::cmp::Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then(self.u.cmp(&other.u))
            .then(self.v.cmp(&other.v))
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{({}, {}), {}}}", self.u, self.v, self.weight)
    }
}

/// Edge-weighted graph with a fixed vertex count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    vertex_count: usize,
    edges: Vec<Edge>,
    total_weight: u64,
}

impl Graph {
    /// Build a graph, validating endpoints and sorting edges into search order.
    pub fn new(vertex_count: usize, mut edges: Vec<Edge>) -> Result<Self, GraphError> {
        if vertex_count == 0 {
            return Err(GraphError::Empty);
        }
        for edge in &edges {
            if edge.u >= edge.v {
                return Err(GraphError::UnorderedEdge {
                    u: edge.u,
                    v: edge.v,
                });
            }
            if edge.v >= vertex_count {
                return Err(GraphError::VertexOutOfRange {
                    u: edge.u,
                    v: edge.v,
                    vertex_count,
                });
            }
        }
        edges.sort_by(Edge::search_order);
        let total_weight = edges.iter().map(|e| e.weight).sum();
        Ok(Self {
            vertex_count,
            edges,
            total_weight,
        })
    }

    /// Build from `(u, v, weight)` triples.
    pub fn from_triples(
        vertex_count: usize,
        triples: &[(usize, usize, u64)],
    ) -> Result<Self, GraphError> {
        let edges = triples
            .iter()
            .map(|&(u, v, w)| Edge::new(u, v, w))
            .collect();
        Self::new(vertex_count, edges)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in search order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, index: usize) -> &Edge {
        &self.edges[index]
    }

    /// Sum of all edge weights
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Adjacency lists restricted to the edges accepted by `keep`.
    pub fn adjacency<F>(&self, mut keep: F) -> Vec<Vec<usize>>
    where
        F: FnMut(&Edge) -> bool,
    {
        let mut adj = vec![Vec::new(); self.vertex_count];
        for edge in self.edges.iter().filter(|e| keep(e)) {
            adj[edge.u].push(edge.v);
            adj[edge.v].push(edge.u);
        }
        adj
    }

    /// Whether every vertex is reachable from vertex 0 over edges accepted by `keep`.
    pub fn is_connected_by<F>(&self, keep: F) -> bool
    where
        F: FnMut(&Edge) -> bool,
    {
        let adj = self.adjacency(keep);
        let mut visited = vec![false; self.vertex_count];
        let mut queue = VecDeque::from([0usize]);
        visited[0] = true;
        let mut reached = 1;
        while let Some(v) = queue.pop_front() {
            for &w in &adj[v] {
                if !visited[w] {
                    visited[w] = true;
                    reached += 1;
                    queue.push_back(w);
                }
            }
        }
        reached == self.vertex_count
    }

    /// Two-color the whole graph by BFS.
    ///
    /// Returns the side of every vertex (`false`/`true`) when all edges can be
    /// kept without joining two vertices of the same side, `None` otherwise.
    /// Isolated vertices land on the `false` side.
    pub fn two_coloring(&self) -> Option<Vec<bool>> {
        let adj = self.adjacency(|_| true);
        let mut side: Vec<Option<bool>> = vec![None; self.vertex_count];
        for start in 0..self.vertex_count {
            if side[start].is_some() {
                continue;
            }
            side[start] = Some(false);
            let mut queue = VecDeque::from([start]);
            while let Some(v) = queue.pop_front() {
                let color = side[v]?;
                for &w in &adj[v] {
                    match side[w] {
                        Some(c) if c == color => return None,
                        Some(_) => {}
                        None => {
                            side[w] = Some(!color);
                            queue.push_back(w);
                        }
                    }
                }
            }
        }
        side.into_iter().collect()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}, {}:", self.vertex_count, self.edges.len())?;
        for edge in &self.edges {
            writeln!(f, "{}", edge)?;
        }
        Ok(())
    }
}
