use bipartite_bnb::graph::Graph;
use bipartite_bnb::search::parallel::DistributedConfig;
use bipartite_bnb::search::parallel::codec::{decode_state, encode_state};
use bipartite_bnb::search::{Algorithm, Brancher, Bounds, SearchConfig, SearchState, solve};
use proptest::prelude::*;

/// Random graph on 2..=6 vertices with weights in the loader window
fn small_graph() -> impl Strategy<Value = Graph> {
    (2usize..=6).prop_flat_map(|n| {
        let pairs = n * (n - 1) / 2;
        proptest::collection::vec(proptest::option::weighted(0.7, 80u64..=120), pairs).prop_map(
            move |weights| {
                let mut triples = Vec::new();
                let mut slots = weights.into_iter();
                for u in 0..n {
                    for v in (u + 1)..n {
                        if let Some(Some(w)) = slots.next() {
                            triples.push((u, v, w));
                        }
                    }
                }
                Graph::from_triples(n, &triples).unwrap()
            },
        )
    })
}

/// Best connected cut over every 2-coloring of the vertices
fn brute_force(graph: &Graph) -> Option<u64> {
    let n = graph.vertex_count();
    let mut best = None;
    for mask in 0u32..(1 << n) {
        let crosses = |u: usize, v: usize| ((mask >> u) & 1) != ((mask >> v) & 1);
        if !graph.is_connected_by(|e| crosses(e.u, e.v)) {
            continue;
        }
        let weight: u64 = graph
            .edges()
            .iter()
            .filter(|e| crosses(e.u, e.v))
            .map(|e| e.weight)
            .sum();
        best = best.max(Some(weight));
    }
    best
}

fn config(algorithm: Algorithm) -> SearchConfig {
    SearchConfig::default()
        .with_algorithm(algorithm)
        .with_threads(2)
        .with_distributed(DistributedConfig::default().with_workers(2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_variants_find_the_true_optimum(graph in small_graph()) {
        let expected = brute_force(&graph);
        for algorithm in Algorithm::ALL {
            let result = solve(&graph, &config(algorithm)).unwrap();
            prop_assert_eq!(result.cost(), expected, "{}", algorithm);
        }
    }

    #[test]
    fn prop_pruning_never_loses_the_optimum(graph in small_graph()) {
        let pruned = solve(&graph, &config(Algorithm::Sequential)).unwrap();
        let exhaustive =
            solve(&graph, &config(Algorithm::Sequential).with_pruning(false)).unwrap();
        prop_assert_eq!(pruned.cost(), exhaustive.cost());
    }

    #[test]
    fn prop_solutions_are_connected_and_properly_colored(graph in small_graph()) {
        for algorithm in Algorithm::ALL {
            let result = solve(&graph, &config(algorithm)).unwrap();
            if let Some(solution) = result.solution {
                prop_assert!(solution.is_properly_colored(), "{}", algorithm);
                prop_assert!(solution.is_connected(), "{}", algorithm);
                prop_assert_eq!(solution.edge_weight_sum(), solution.cost);
            }
        }
    }

    #[test]
    fn prop_mid_search_states_survive_transport(graph in small_graph(), depth in 0usize..4) {
        // walk down the first child `depth` times
        let brancher = Brancher::new(&graph, Bounds::disabled());
        let mut state = SearchState::root(&graph);
        for _ in 0..depth {
            let mut first = None;
            brancher.expand(&state, 0, |child| {
                if first.is_none() {
                    first = Some(child);
                }
            });
            match first {
                Some(child) => state = child,
                None => break,
            }
        }

        let decoded = decode_state(&encode_state(&state), &graph).unwrap();
        prop_assert_eq!(decoded.cost, state.cost);
        prop_assert_eq!(decoded.edge_index, state.edge_index);
        prop_assert_eq!(&decoded.colors, &state.colors);
        prop_assert_eq!(decoded, state);
    }
}
