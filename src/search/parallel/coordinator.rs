//! Distributed search coordinator that manages worker threads.
//!
//! The coordinator builds the frontier on its own thread before any worker
//! starts, then hands out one subtree root per idle worker. Each worker holds
//! at most one outstanding task; a report frees it for the next root.

use crate::error::{BnbError, Result, TransportError};
use crate::graph::Graph;
use crate::search::branching::Brancher;
use crate::search::config::{Algorithm, SearchConfig};
use crate::search::frontier::FrontierBuilder;
use crate::search::parallel::channel::{
    CoordinatorChannels, CoordinatorMessage, WorkerMessage, create_channels,
};
use crate::search::parallel::codec::{Report, decode_report, encode_graph, encode_state};
use crate::search::parallel::worker::run_worker;
use crate::search::result::{SearchResult, SearchStatistics};
use crate::search::state::SearchState;
use crate::search::{Bounds, Exploration, SearchAlgorithm, finish, try_up_front};
use std::time::Instant;

/// Explorer that farms frontier subtrees out to isolated workers
pub struct DistributedExplorer {
    statistics: SearchStatistics,
}

impl DistributedExplorer {
    pub fn new() -> Self {
        Self {
            statistics: SearchStatistics::new(Algorithm::Distributed),
        }
    }
}

impl Default for DistributedExplorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchAlgorithm for DistributedExplorer {
    fn search(&mut self, graph: &Graph, config: &SearchConfig) -> Result<SearchResult> {
        self.reset();
        let start = Instant::now();
        if let Some(result) = try_up_front(graph, Algorithm::Distributed, start) {
            self.statistics = result.statistics.clone();
            return Ok(result);
        }

        let exploration = run_distributed_search(graph, config)?;
        let result = finish(graph, exploration, start);
        self.statistics = result.statistics.clone();
        Ok(result)
    }

    fn statistics(&self) -> SearchStatistics {
        self.statistics.clone()
    }

    fn reset(&mut self) {
        self.statistics = SearchStatistics::new(Algorithm::Distributed);
    }
}

/// Run the coordinator/worker protocol over `graph`.
pub fn run_distributed_search(graph: &Graph, config: &SearchConfig) -> Result<Exploration> {
    let distributed = &config.distributed;
    let num_workers = distributed.num_workers;
    let brancher = Brancher::new(graph, Bounds::new(config.pruning));
    let target = distributed.frontier_target(config.frontier_factor);

    let frontier = FrontierBuilder::new(brancher).build(SearchState::root(graph), target, None);
    let mut statistics = frontier.statistics;
    statistics.algorithm = Algorithm::Distributed;
    let mut best = frontier.best;
    tracing::info!(
        workers = num_workers,
        threads_per_worker = distributed.threads_per_worker,
        frontier = frontier.roots.len(),
        "distributed search started"
    );

    let (coordinator_channels, worker_channels) = create_channels(num_workers);
    let mut handles = Vec::with_capacity(num_workers);
    for (worker_id, channels) in worker_channels.into_iter().enumerate() {
        let threads = distributed.threads_per_worker;
        let pruning = config.pruning;
        let handle = std::thread::Builder::new()
            .name(format!("bnb-worker-{}", worker_id))
            .spawn(move || run_worker(worker_id, threads, pruning, channels))
            .map_err(|e| BnbError::ThreadPool(e.to_string()))?;
        handles.push(handle);
    }

    let outcome = run_coordinator(
        graph,
        coordinator_channels,
        frontier.roots,
        &mut best,
        &mut statistics,
    );

    // Channels are closed by now, so every worker either saw the sentinel or
    // a disconnect.
    for (worker_id, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() {
            return Err(BnbError::WorkerPanicked(worker_id));
        }
    }
    outcome?;

    Ok(Exploration { best, statistics })
}

/// Dispatch loop: broadcast the graph, feed idle workers, merge reports,
/// then send every worker the sentinel.
fn run_coordinator(
    graph: &Graph,
    channels: CoordinatorChannels,
    roots: Vec<SearchState>,
    best: &mut Option<SearchState>,
    statistics: &mut SearchStatistics,
) -> Result<()> {
    let graph_frame = encode_graph(graph);
    for worker_id in 0..channels.to_workers.len() {
        send(&channels, worker_id, CoordinatorMessage::Graph(graph_frame.clone()))?;
    }

    let mut roots = roots.into_iter();
    let mut active = 0usize;
    for worker_id in 0..channels.to_workers.len() {
        let Some(root) = roots.next() else {
            break;
        };
        if let Some(state) = best.as_ref() {
            send(&channels, worker_id, CoordinatorMessage::Incumbent(encode_state(state)))?;
        }
        tracing::trace!(worker_id, edge_index = root.edge_index, "task dispatched");
        send(&channels, worker_id, CoordinatorMessage::Task(encode_state(&root)))?;
        active += 1;
    }

    while active > 0 {
        let (worker_id, report) = receive_report(&channels, graph)?;
        statistics.absorb(&report.statistics);

        match report.best {
            Some(state) if state.improves_on(best.as_ref()) => {
                tracing::debug!(worker_id, cost = state.cost, "incumbent adopted from worker");
                *best = Some(state);
            }
            _ => {
                if let Some(state) = best.as_ref() {
                    send(&channels, worker_id, CoordinatorMessage::Incumbent(encode_state(state)))?;
                }
            }
        }

        match roots.next() {
            Some(root) => {
                tracing::trace!(worker_id, edge_index = root.edge_index, "task dispatched");
                send(&channels, worker_id, CoordinatorMessage::Task(encode_state(&root)))?;
            }
            None => active -= 1,
        }
    }

    let sentinel = encode_state(&SearchState::sentinel(graph.vertex_count()));
    for worker_id in 0..channels.to_workers.len() {
        send(&channels, worker_id, CoordinatorMessage::Task(sentinel.clone()))?;
    }
    Ok(())
}

fn send(channels: &CoordinatorChannels, worker_id: usize, message: CoordinatorMessage) -> Result<()> {
    channels.to_workers[worker_id]
        .send(message)
        .map_err(|_| TransportError::Disconnected(format!("worker {}", worker_id)).into())
}

fn receive_report(channels: &CoordinatorChannels, graph: &Graph) -> Result<(usize, Report)> {
    match channels.from_workers.recv() {
        Ok(WorkerMessage::Report { worker_id, frame }) => {
            let report = decode_report(&frame, graph)?;
            tracing::trace!(
                worker_id,
                nodes = report.statistics.nodes_expanded,
                cost = ?report.best.as_ref().map(|s| s.cost),
                "report received"
            );
            Ok((worker_id, report))
        }
        Ok(WorkerMessage::Failed { worker_id, message }) => {
            Err(BnbError::WorkerFailed { worker_id, message })
        }
        Err(_) => Err(TransportError::Disconnected("all workers".to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SequentialExplorer;
    use crate::search::parallel::DistributedConfig;
    use crate::search::parallel::channel::WorkerChannels;
    use crate::search::parallel::codec::{decode_state, encode_report};

    fn config(workers: usize, threads_per_worker: usize) -> SearchConfig {
        SearchConfig::default()
            .with_algorithm(Algorithm::Distributed)
            .with_distributed(
                DistributedConfig::default()
                    .with_workers(workers)
                    .with_threads_per_worker(threads_per_worker),
            )
    }

    fn chord_cycle() -> Graph {
        Graph::from_triples(
            5,
            &[(0, 1, 100), (1, 2, 100), (2, 3, 100), (3, 4, 100), (0, 4, 90), (0, 2, 80)],
        )
        .unwrap()
    }

    fn child_roots(graph: &Graph) -> Vec<SearchState> {
        let mut roots = Vec::new();
        Brancher::new(graph, Bounds::default()).expand(&SearchState::root(graph), 0, |s| {
            roots.push(s)
        });
        roots
    }

    fn next_state(channels: &WorkerChannels, graph: &Graph, kind: &str) -> SearchState {
        match channels.from_coordinator.recv().unwrap() {
            CoordinatorMessage::Task(frame) if kind == "task" => {
                decode_state(&frame, graph).unwrap()
            }
            CoordinatorMessage::Incumbent(frame) if kind == "incumbent" => {
                decode_state(&frame, graph).unwrap()
            }
            other => panic!("Expected {}, got {:?}", kind, other),
        }
    }

    fn expect_graph(channels: &WorkerChannels) {
        let message = channels.from_coordinator.recv().unwrap();
        assert_eq!(message.kind(), "graph");
    }

    fn send_empty_report(channels: &WorkerChannels, worker_id: usize) {
        let report = Report {
            best: None,
            statistics: SearchStatistics::default(),
        };
        channels
            .to_coordinator
            .send(WorkerMessage::Report {
                worker_id,
                frame: encode_report(&report),
            })
            .unwrap();
    }

    #[test]
    fn test_empty_report_gets_incumbent_before_next_task() {
        let graph = chord_cycle();
        let mut children = child_roots(&graph);
        let incumbent = children.remove(0);
        let roots = children;
        assert_eq!(roots.len(), 3);

        let (coordinator, workers) = create_channels(2);
        let mut best = Some(incumbent.clone());
        let mut statistics = SearchStatistics::new(Algorithm::Distributed);

        std::thread::scope(|scope| {
            let dispatched = roots.clone();
            let best = &mut best;
            let statistics = &mut statistics;
            let graph = &graph;
            let handle =
                scope.spawn(move || run_coordinator(graph, coordinator, dispatched, best, statistics));

            for (worker_id, channels) in workers.iter().enumerate() {
                expect_graph(channels);
                assert_eq!(next_state(channels, graph, "incumbent"), incumbent);
                assert_eq!(next_state(channels, graph, "task"), roots[worker_id]);
            }

            send_empty_report(&workers[0], 0);
            assert_eq!(next_state(&workers[0], graph, "incumbent"), incumbent);
            assert_eq!(next_state(&workers[0], graph, "task"), roots[2]);

            send_empty_report(&workers[0], 0);
            send_empty_report(&workers[1], 1);
            for channels in &workers {
                assert_eq!(next_state(channels, graph, "incumbent"), incumbent);
                assert!(next_state(channels, graph, "task").is_sentinel());
            }

            handle.join().unwrap().unwrap();
        });

        assert_eq!(best, Some(incumbent));
    }

    #[test]
    fn test_idle_workers_receive_sentinel() {
        let graph = chord_cycle();
        let root = child_roots(&graph).remove(1);
        let (coordinator, workers) = create_channels(3);
        let mut best = None;
        let mut statistics = SearchStatistics::new(Algorithm::Distributed);

        std::thread::scope(|scope| {
            let dispatched = vec![root.clone()];
            let best = &mut best;
            let statistics = &mut statistics;
            let graph = &graph;
            let handle =
                scope.spawn(move || run_coordinator(graph, coordinator, dispatched, best, statistics));

            for channels in &workers {
                expect_graph(channels);
            }
            assert_eq!(next_state(&workers[0], graph, "task"), root);
            send_empty_report(&workers[0], 0);

            for channels in &workers {
                assert!(next_state(channels, graph, "task").is_sentinel());
                assert!(channels.from_coordinator.try_recv().is_err());
            }

            handle.join().unwrap().unwrap();
        });

        assert!(best.is_none());
        assert_eq!(statistics.nodes_expanded, 0);
    }

    #[test]
    fn test_triangle() {
        let graph = Graph::from_triples(3, &[(0, 1, 100), (0, 2, 100), (1, 2, 100)]).unwrap();
        let result = DistributedExplorer::new().search(&graph, &config(2, 1)).unwrap();
        let solution = result.solution.unwrap();
        assert_eq!(solution.cost, 200);
        assert!(solution.is_properly_colored());
        assert!(solution.is_connected());
        assert_eq!(result.statistics.algorithm, Algorithm::Distributed);
    }

    #[test]
    fn test_matches_sequential() {
        let graph = chord_cycle();
        let sequential = SequentialExplorer::new()
            .search(&graph, &SearchConfig::default())
            .unwrap();
        for (workers, threads) in [(1, 1), (3, 1), (2, 2)] {
            let result = DistributedExplorer::new()
                .search(&graph, &config(workers, threads))
                .unwrap();
            assert_eq!(result.cost(), sequential.cost(), "workers = {}", workers);
        }
    }

    #[test]
    fn test_frontier_exhausted_before_dispatch() {
        // the triangle tree is too small to reach 16 queued roots
        let graph = Graph::from_triples(3, &[(0, 1, 100), (1, 2, 100), (0, 2, 100)]).unwrap();
        let result = DistributedExplorer::new()
            .search(&graph, &config(16, 1).with_frontier_factor(1))
            .unwrap();
        assert_eq!(result.cost(), Some(200));
        assert_eq!(result.statistics.frontier_size, 0);
    }

    #[test]
    fn test_no_solution() {
        let graph = Graph::from_triples(4, &[(0, 1, 100), (1, 2, 90), (0, 2, 80)]).unwrap();
        let result = DistributedExplorer::new().search(&graph, &config(2, 1)).unwrap();
        assert!(result.solution.is_none());
    }

    #[test]
    fn test_worker_counters_are_merged() {
        let graph = chord_cycle();
        let exploration = run_distributed_search(&graph, &config(2, 1)).unwrap();
        assert_eq!(exploration.best.map(|s| s.cost), Some(470));
        assert!(exploration.statistics.frontier_size >= 4);
        assert!(exploration.statistics.nodes_expanded > exploration.statistics.frontier_size);
    }
}
