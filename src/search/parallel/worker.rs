//! Worker side of the distributed search.
//!
//! A worker decodes its own copy of the graph, then loops: receive a subtree
//! root, explore it on a private task pool, report the local best. The
//! all-uncolored sentinel ends the loop.

use crate::error::{BnbError, Result, TransportError};
use crate::search::Bounds;
use crate::search::branching::Brancher;
use crate::search::parallel::channel::{CoordinatorMessage, WorkerChannels, WorkerMessage};
use crate::search::parallel::codec::{Report, decode_graph, decode_state, encode_report};
use crate::search::state::SearchState;
use crate::search::task_parallel::{TaskParallelExplorer, build_pool};

/// Run a worker until it receives the sentinel or the coordinator goes away.
///
/// Failures are sent to the coordinator as [`WorkerMessage::Failed`].
pub fn run_worker(worker_id: usize, threads: usize, pruning: bool, channels: WorkerChannels) {
    if let Err(e) = serve(worker_id, threads, pruning, &channels) {
        tracing::debug!(worker_id, error = %e, "worker stopped");
        let _ = channels.to_coordinator.send(WorkerMessage::Failed {
            worker_id,
            message: e.to_string(),
        });
    }
}

fn serve(worker_id: usize, threads: usize, pruning: bool, channels: &WorkerChannels) -> Result<()> {
    let graph = match receive(channels)? {
        CoordinatorMessage::Graph(frame) => decode_graph(&frame)?,
        other => return Err(unexpected(&other, "graph")),
    };
    let pool = build_pool(threads, &format!("bnb-worker{}", worker_id))?;
    let brancher = Brancher::new(&graph, Bounds::new(pruning));
    let mut bound: Option<SearchState> = None;

    loop {
        match receive(channels)? {
            CoordinatorMessage::Incumbent(frame) => {
                let state = decode_state(&frame, &graph)?;
                if state.improves_on(bound.as_ref()) {
                    bound = Some(state);
                }
            }
            CoordinatorMessage::Task(frame) => {
                let root = decode_state(&frame, &graph)?;
                if root.is_sentinel() {
                    tracing::trace!(worker_id, "sentinel received");
                    return Ok(());
                }
                let report = explore(&pool, brancher, root, &mut bound);
                tracing::trace!(
                    worker_id,
                    nodes = report.statistics.nodes_expanded,
                    cost = ?report.best.as_ref().map(|s| s.cost),
                    "task finished"
                );
                channels
                    .to_coordinator
                    .send(WorkerMessage::Report {
                        worker_id,
                        frame: encode_report(&report),
                    })
                    .map_err(|_| TransportError::Disconnected("coordinator".to_string()))?;
            }
            other @ CoordinatorMessage::Graph(_) => return Err(unexpected(&other, "task")),
        }
    }
}

fn explore(
    pool: &rayon::ThreadPool,
    brancher: Brancher<'_>,
    root: SearchState,
    bound: &mut Option<SearchState>,
) -> Report {
    tracing::trace!(edge_index = root.edge_index, "task received");
    let exploration = TaskParallelExplorer::explore(pool, brancher, root, bound.clone());
    let improved = exploration.statistics.improvements_found > 0;
    if improved {
        bound.clone_from(&exploration.best);
    }
    Report {
        best: if improved { exploration.best } else { None },
        statistics: exploration.statistics,
    }
}

fn receive(channels: &WorkerChannels) -> Result<CoordinatorMessage> {
    channels
        .from_coordinator
        .recv()
        .map_err(|_| TransportError::Disconnected("coordinator".to_string()).into())
}

fn unexpected(message: &CoordinatorMessage, wanted: &str) -> BnbError {
    TransportError::UnexpectedFrame(format!("expected {}, got {}", wanted, message.kind())).into()
}
