//! Error types for graph construction, loading and the worker transport.
//!
//! The search itself never fails: once a [`Graph`](crate::graph::Graph) has
//! been built, every explorer runs to completion and returns a value.

use thiserror::Error;

/// Errors raised while building or loading a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Graph has no vertices
    #[error("Graph must have at least one vertex")]
    Empty,

    /// Edge endpoints are not ordered `u < v`
    #[error("Edge ({u}, {v}) must satisfy u < v")]
    UnorderedEdge { u: usize, v: usize },

    /// Edge endpoint is not a vertex of the graph
    #[error("Edge ({u}, {v}) references a vertex outside 0..{vertex_count}")]
    VertexOutOfRange {
        u: usize,
        v: usize,
        vertex_count: usize,
    },

    /// Matrix input could not be parsed
    #[error("Malformed adjacency matrix: {0}")]
    Malformed(String),

    /// Matrix file could not be read
    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },
}

/// Errors raised while decoding a wire frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Frame ended before the record was complete
    #[error("Truncated frame: needed {needed} more bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    /// Unknown frame tag
    #[error("Unknown frame tag {0:#04x}")]
    UnknownTag(u8),

    /// Byte does not name a color
    #[error("Invalid color byte {0}")]
    InvalidColor(u8),

    /// Record does not fit the graph it is decoded against
    #[error("Record does not match graph: {0}")]
    GraphMismatch(String),

    /// Bytes left over after a complete frame
    #[error("{0} trailing bytes after frame")]
    TrailingBytes(usize),

    /// Transmitted graph failed validation
    #[error("Invalid graph in frame: {0}")]
    InvalidGraph(#[from] GraphError),
}

/// Errors raised by the coordinator/worker transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The peer dropped its end of the channel
    #[error("Peer {0} disconnected")]
    Disconnected(String),

    /// A frame arrived where a different one was expected
    #[error("Unexpected frame: {0}")]
    UnexpectedFrame(String),
}

/// Umbrella error for library entry points.
#[derive(Error, Debug)]
pub enum BnbError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A worker reported that it could not continue
    #[error("Worker {worker_id} failed: {message}")]
    WorkerFailed { worker_id: usize, message: String },

    /// A worker thread panicked
    #[error("Worker {0} panicked")]
    WorkerPanicked(usize),

    /// Thread pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, BnbError>;
