//! Message channels between the coordinator and its workers.
//!
//! Every payload is an encoded frame (see [`codec`](super::codec)); the two
//! sides share no memory besides the channels themselves.

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

/// Message sent from a worker to the coordinator.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// Worker finished a task; `frame` is an encoded report.
    Report { worker_id: usize, frame: Vec<u8> },
    /// Worker hit an error and stopped.
    Failed { worker_id: usize, message: String },
}

/// Message sent from the coordinator to a worker.
#[derive(Debug, Clone)]
pub enum CoordinatorMessage {
    /// Encoded graph, sent once before any task.
    Graph(Vec<u8>),
    /// Encoded subtree root, or the all-uncolored shutdown sentinel.
    Task(Vec<u8>),
    /// Encoded best state known to the coordinator.
    Incumbent(Vec<u8>),
}

impl CoordinatorMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            CoordinatorMessage::Graph(_) => "graph",
            CoordinatorMessage::Task(_) => "task",
            CoordinatorMessage::Incumbent(_) => "incumbent",
        }
    }
}

/// Channel endpoints for a worker.
pub struct WorkerChannels {
    /// Send messages to coordinator.
    pub to_coordinator: Sender<WorkerMessage>,
    /// Receive messages from coordinator.
    pub from_coordinator: Receiver<CoordinatorMessage>,
}

/// Channel endpoints for the coordinator.
pub struct CoordinatorChannels {
    /// Receive messages from any worker.
    pub from_workers: Receiver<WorkerMessage>,
    /// Send messages to workers, indexed by worker id.
    pub to_workers: Vec<Sender<CoordinatorMessage>>,
}

/// Create channels for the given number of workers.
pub fn create_channels(num_workers: usize) -> (CoordinatorChannels, Vec<WorkerChannels>) {
    // Unbounded channel from workers to coordinator (workers never block on a report)
    let (worker_tx, coordinator_rx) = unbounded();

    let mut to_workers = Vec::with_capacity(num_workers);
    let mut worker_channels = Vec::with_capacity(num_workers);

    for _ in 0..num_workers {
        // A worker holds at most one task, so a small buffer suffices
        let (coord_tx, worker_rx) = bounded(8);
        to_workers.push(coord_tx);
        worker_channels.push(WorkerChannels {
            to_coordinator: worker_tx.clone(),
            from_coordinator: worker_rx,
        });
    }

    let coordinator = CoordinatorChannels {
        from_workers: coordinator_rx,
        to_workers,
    };

    (coordinator, worker_channels)
}
