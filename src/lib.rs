//! Exact branch-and-bound search for the maximum-weight connected bipartite
//! spanning subgraph of an edge-weighted graph.
//!
//! The search tree decides one edge at a time, in descending weight order,
//! while 2-coloring the vertices. Every explorer shares the same branching
//! and bounding rules and differs only in how it schedules children:
//!
//! - [`search::SequentialExplorer`] recurses inline
//! - [`search::TaskParallelExplorer`] spawns each child on a rayon pool
//! - [`search::FrontierExplorer`] runs a parallel for-each over a BFS frontier
//! - [`search::DistributedExplorer`] hands frontier subtrees to isolated workers
//!
//! ```
//! use bipartite_bnb::graph::Graph;
//! use bipartite_bnb::search::{SearchConfig, solve};
//!
//! let graph = Graph::from_triples(3, &[(0, 1, 100), (0, 2, 100), (1, 2, 100)])?;
//! let result = solve(&graph, &SearchConfig::default())?;
//! assert_eq!(result.cost(), Some(200));
//! # Ok::<(), bipartite_bnb::BnbError>(())
//! ```

pub mod error;
pub mod graph;
pub mod reference;
pub mod search;

pub use error::{BnbError, CodecError, GraphError, Result, TransportError};
pub use graph::{Edge, Graph};
pub use reference::known_optimum;
pub use search::{Algorithm, SearchConfig, SearchResult, Solution, solve};
