//! Distributed coordinator/worker search.
//!
//! Workers run as isolated threads that share nothing with the coordinator
//! except encoded frames passed over channels. Each worker decodes its own
//! copy of the graph and explores the subtrees it is handed on a private task
//! pool.
//!
//! # Protocol
//!
//! - The coordinator builds the frontier sequentially, then broadcasts the graph.
//! - Each idle worker gets the next frontier root. A report frees the worker;
//!   if the report does not beat the coordinator's incumbent, the worker is
//!   sent that incumbent as its new local bound.
//! - When the frontier is empty and every report is in, each worker receives
//!   the all-uncolored sentinel and exits.
//!
//! # Example
//!
//! ```no_run
//! use bipartite_bnb::graph::Graph;
//! use bipartite_bnb::search::{Algorithm, SearchConfig, solve};
//! use bipartite_bnb::search::parallel::DistributedConfig;
//!
//! let graph = Graph::from_triples(3, &[(0, 1, 100), (0, 2, 90), (1, 2, 80)])?;
//! let config = SearchConfig::default()
//!     .with_algorithm(Algorithm::Distributed)
//!     .with_distributed(DistributedConfig::default().with_workers(4));
//! let result = solve(&graph, &config)?;
//! assert_eq!(result.cost(), Some(190));
//! # Ok::<(), bipartite_bnb::BnbError>(())
//! ```

pub mod channel;
pub mod codec;
pub mod config;
pub mod coordinator;
pub mod worker;

pub use config::DistributedConfig;
pub use coordinator::{DistributedExplorer, run_distributed_search};
