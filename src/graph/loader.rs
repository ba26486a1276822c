//! Adjacency-matrix loader
//!
//! Input format: the vertex count `n` followed by `n * n` whitespace-separated
//! integer weights in row-major order. Only the upper triangle is read, and a
//! weight becomes an edge only when it lies inside the [`WeightWindow`].

use super::{Edge, Graph};
use crate::error::GraphError;
use std::fs;
use std::path::Path;

/// Inclusive range of weights that produce an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightWindow {
    pub min: i64,
    pub max: i64,
}

impl Default for WeightWindow {
    fn default() -> Self {
        Self { min: 80, max: 120 }
    }
}

impl WeightWindow {
    pub fn contains(&self, weight: i64) -> bool {
        self.min <= weight && weight <= self.max
    }
}

/// Parse an adjacency matrix from text.
pub fn parse_matrix(input: &str, window: WeightWindow) -> Result<Graph, GraphError> {
    let mut tokens = input.split_whitespace();

    let n: usize = tokens
        .next()
        .ok_or_else(|| GraphError::Malformed("missing vertex count".to_string()))?
        .parse()
        .map_err(|e| GraphError::Malformed(format!("bad vertex count: {}", e)))?;

    let mut edges = Vec::new();
    for row in 0..n {
        for column in 0..n {
            let token = tokens.next().ok_or_else(|| {
                GraphError::Malformed(format!(
                    "matrix ended at row {}, column {} (expected {}x{})",
                    row, column, n, n
                ))
            })?;
            let weight: i64 = token.parse().map_err(|e| {
                GraphError::Malformed(format!(
                    "bad weight '{}' at row {}, column {}: {}",
                    token, row, column, e
                ))
            })?;
            if column > row && window.contains(weight) {
                let weight = u64::try_from(weight).map_err(|_| {
                    GraphError::Malformed(format!(
                        "negative weight {} at row {}, column {}",
                        weight, row, column
                    ))
                })?;
                edges.push(Edge::new(row, column, weight));
            }
        }
    }

    Graph::new(n, edges)
}

/// Read and parse an adjacency-matrix file.
pub fn load_matrix_file(path: &Path, window: WeightWindow) -> Result<Graph, GraphError> {
    let contents = fs::read_to_string(path).map_err(|e| GraphError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_matrix(&contents, window)
}
