use bipartite_bnb::graph::{Graph, WeightWindow, parse_matrix};
use bipartite_bnb::search::parallel::DistributedConfig;
use bipartite_bnb::search::{Algorithm, SearchConfig, SearchResult, solve};

fn config(algorithm: Algorithm) -> SearchConfig {
    SearchConfig::default()
        .with_algorithm(algorithm)
        .with_threads(3)
        .with_distributed(DistributedConfig::default().with_workers(3))
}

fn solve_all(graph: &Graph) -> Vec<SearchResult> {
    Algorithm::ALL
        .iter()
        .map(|&algorithm| solve(graph, &config(algorithm)).expect("search should not fail"))
        .collect()
}

#[test]
fn test_four_cycle_takes_every_edge_up_front() {
    let graph =
        Graph::from_triples(4, &[(0, 1, 100), (1, 2, 90), (2, 3, 110), (0, 3, 85)]).unwrap();

    for result in solve_all(&graph) {
        let algorithm = result.statistics.algorithm;
        assert!(result.statistics.solved_up_front, "{}", algorithm);
        assert_eq!(result.statistics.nodes_expanded, 0, "{}", algorithm);

        let solution = result.solution.expect("four-cycle has a solution");
        assert_eq!(solution.cost, 385);
        assert_eq!(solution.selected_edges.len(), 4);
        // alternating sides
        assert_eq!(solution.colors[0], solution.colors[2]);
        assert_eq!(solution.colors[1], solution.colors[3]);
        assert_ne!(solution.colors[0], solution.colors[1]);
    }
}

#[test]
fn test_triangle_keeps_two_edges() {
    let graph = Graph::from_triples(3, &[(0, 1, 100), (0, 2, 100), (1, 2, 100)]).unwrap();

    for result in solve_all(&graph) {
        let algorithm = result.statistics.algorithm;
        assert!(!result.statistics.solved_up_front, "{}", algorithm);
        let solution = result.solution.expect("triangle has a solution");
        assert_eq!(solution.cost, 200, "{}", algorithm);
        assert_eq!(solution.selected_edges.len(), 2, "{}", algorithm);
        assert!(solution.is_properly_colored());
        assert!(solution.is_connected());
    }
}

#[test]
fn test_variants_agree_on_matrix_instance() {
    // K6 with weights spread over the loader window, plus filtered entries
    let matrix = "6
        0   118 85  101 200 97
        118 0   92  111 107 83
        85  92  0   120 99  104
        101 111 120 0   88  116
        200 107 99  88  0   109
        97  83  104 116 109 0";
    let graph = parse_matrix(matrix, WeightWindow::default()).unwrap();
    assert_eq!(graph.edge_count(), 14);

    let results = solve_all(&graph);
    let costs: Vec<_> = results.iter().map(SearchResult::cost).collect();
    assert!(costs[0].is_some());
    assert!(costs.iter().all(|c| *c == costs[0]), "costs: {:?}", costs);

    for result in &results {
        let solution = result.solution.as_ref().unwrap();
        assert!(solution.is_properly_colored());
        assert!(solution.is_connected());
        assert_eq!(solution.edge_weight_sum(), solution.cost);
    }
}

#[test]
fn test_disconnected_graph_has_no_solution() {
    let graph = Graph::from_triples(5, &[(0, 1, 100), (1, 2, 90), (3, 4, 110)]).unwrap();
    for result in solve_all(&graph) {
        assert!(result.solution.is_none(), "{}", result.statistics.algorithm);
    }
}

#[test]
fn test_pruning_off_matches_on() {
    let graph = Graph::from_triples(
        5,
        &[
            (0, 1, 100),
            (0, 2, 95),
            (0, 3, 90),
            (1, 2, 115),
            (1, 4, 85),
            (2, 3, 105),
            (3, 4, 120),
        ],
    )
    .unwrap();

    for algorithm in Algorithm::ALL {
        let pruned = solve(&graph, &config(algorithm)).unwrap();
        let exhaustive = solve(&graph, &config(algorithm).with_pruning(false)).unwrap();
        assert_eq!(pruned.cost(), exhaustive.cost(), "{}", algorithm);
        assert!(
            pruned.statistics.nodes_expanded <= exhaustive.statistics.nodes_expanded,
            "{}",
            algorithm
        );
    }
}
