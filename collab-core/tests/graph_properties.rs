// Property tests for the collaboration graph invariants.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use collab_core::CollaborationGraph;
use collab_core::analyze::CollaborationNetwork;
use collab_core::query::{self, filter};
use collab_core::types::{ChatIdentity, Employee, InteractionKind, RecordOutcome};

const POOL: usize = 8;

fn employee_id(i: usize) -> String {
    format!("E{i}")
}

fn arb_kind() -> impl Strategy<Value = InteractionKind> {
    prop_oneof![
        Just(InteractionKind::Issue),
        Just(InteractionKind::Bug),
        Just(InteractionKind::CodeReview),
        Just(InteractionKind::Discussion),
    ]
}

/// (a, b, kind, minutes offset)
fn arb_log() -> impl Strategy<Value = Vec<(usize, usize, InteractionKind, i64)>> {
    proptest::collection::vec((0..POOL, 0..POOL, arb_kind(), 0i64..10_000), 0..60)
}

fn build(log: &[(usize, usize, InteractionKind, i64)]) -> CollaborationGraph {
    let mut graph = CollaborationGraph::new();
    for i in 0..POOL {
        graph
            .add_employee(Employee::new(
                employee_id(i),
                format!("Name {i}"),
                format!("e{i}@example.com"),
                "Ops",
            ))
            .unwrap();
    }
    let base = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    for (n, &(a, b, kind, minutes)) in log.iter().enumerate() {
        let outcome = graph
            .record_interaction_by_employee(
                format!("P-{n}"),
                &employee_id(a),
                &employee_id(b),
                kind,
                base + Duration::minutes(minutes),
            )
            .unwrap();
        assert_eq!(outcome == RecordOutcome::Recorded, a != b);
    }
    graph
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn adjacency_is_symmetric_and_counts_pairs(log in arb_log()) {
        let graph = build(&log);
        let adjacency = graph.adjacency();

        for (a, row) in &adjacency {
            prop_assert!(!row.contains_key(a));
            for (b, w) in row {
                prop_assert_eq!(adjacency[b].get(a), Some(w));
                prop_assert!(*w > 0);
            }
        }

        let recorded = log.iter().filter(|(a, b, _, _)| a != b).count();
        prop_assert_eq!(graph.interactions().len(), recorded);

        let total: u64 = query::undirected_edges(&adjacency)
            .iter()
            .map(|(_, _, w)| u64::from(*w))
            .sum();
        prop_assert_eq!(total, recorded as u64);
        prop_assert!(graph.verify_adjacency());
    }

    #[test]
    fn snapshot_round_trip_preserves_queries(log in arb_log()) {
        let graph = build(&log);
        let loaded = CollaborationGraph::deserialize(&graph.serialize()).unwrap();

        prop_assert_eq!(loaded.employees(), graph.employees());
        prop_assert_eq!(loaded.interactions(), graph.interactions());
        prop_assert_eq!(loaded.adjacency(), graph.adjacency());
        for i in 0..POOL {
            let id = employee_id(i);
            prop_assert_eq!(loaded.top_collaborators(&id, 3), graph.top_collaborators(&id, 3));
        }
    }

    #[test]
    fn filtered_view_is_subgraph(log in arb_log(), cutoff in 0i64..10_000) {
        let graph = build(&log);
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap() + Duration::minutes(cutoff);
        let full = graph.adjacency();
        let windowed = graph.filtered_adjacency(filter::since(start));

        prop_assert_eq!(windowed.len(), full.len());
        for (a, row) in &windowed {
            for (b, w) in row {
                prop_assert!(full[a][b] >= *w);
            }
        }
    }

    #[test]
    fn shortest_path_endpoints_and_hops(log in arb_log(), from in 0..POOL, to in 0..POOL) {
        let graph = build(&log);
        let (from, to) = (employee_id(from), employee_id(to));
        let path = graph.shortest_path(&from, &to);
        let adjacency = graph.adjacency();

        let hops = hop_distance(&adjacency, &from, &to);
        if let (Some(first), Some(last)) = (path.first(), path.last()) {
            prop_assert_eq!(first.as_str(), from.as_str());
            prop_assert_eq!(last.as_str(), to.as_str());
            for pair in path.windows(2) {
                prop_assert!(adjacency[&pair[0]].contains_key(&pair[1]));
            }
            prop_assert_eq!(Some(path.len() - 1), hops);
        } else {
            prop_assert_ne!(&from, &to);
            prop_assert_eq!(hops, None);
        }
    }

    #[test]
    fn arbitrary_text_round_trips(
        people in proptest::collection::vec((awkward_text(), awkward_text(), awkward_text()), 1..6),
        log in proptest::collection::vec((0usize..6, 0usize..6, awkward_text()), 0..12),
    ) {
        let mut graph = CollaborationGraph::new();
        let mut ids = Vec::new();
        for (id, name, external_id) in &people {
            if id.is_empty() {
                continue;
            }
            let employee = Employee::new(id.as_str(), name.as_str(), format!("{name}@x"), external_id.as_str());
            if graph.add_employee(employee).is_ok() {
                ids.push(id.clone());
                let _ = graph.add_chat_identity(ChatIdentity::new(external_id.as_str(), name.as_str(), id.as_str()));
            }
        }
        prop_assume!(!ids.is_empty());

        let t = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        for (a, b, issue_key) in &log {
            let (a, b) = (&ids[a % ids.len()], &ids[b % ids.len()]);
            graph
                .record_interaction_by_employee(issue_key.as_str(), a, b, InteractionKind::Discussion, t)
                .unwrap();
        }

        let loaded = CollaborationGraph::deserialize(&graph.serialize()).unwrap();
        prop_assert_eq!(loaded.employees(), graph.employees());
        prop_assert_eq!(loaded.chat_identities(), graph.chat_identities());
        prop_assert_eq!(loaded.interactions(), graph.interactions());
        prop_assert_eq!(loaded.adjacency(), graph.adjacency());
    }
}

/// Strings weighted towards characters the document codec must escape:
/// quotes, backslashes, control characters and non-BMP code points.
fn awkward_text() -> impl Strategy<Value = String> {
    let ch = prop_oneof![
        3 => any::<char>(),
        1 => Just('"'),
        1 => Just('\\'),
        1 => Just('\n'),
        1 => Just('\u{0}'),
        1 => Just('\u{1f}'),
        1 => Just('\u{7f}'),
        1 => Just('\u{1F600}'),
        1 => Just('/'),
    ];
    prop_oneof![
        any::<String>(),
        proptest::collection::vec(ch, 0..10).prop_map(|cs| cs.into_iter().collect::<String>()),
    ]
}

/// Hop count of a fewest-edge path, from petgraph's Dijkstra with unit
/// edge costs.
fn hop_distance(adjacency: &collab_core::types::Adjacency, from: &str, to: &str) -> Option<usize> {
    let network = CollaborationNetwork::from_adjacency(adjacency);
    let start = *network.node_to_index.get(from)?;
    let goal = *network.node_to_index.get(to)?;
    petgraph::algo::dijkstra(&network.graph, start, Some(goal), |_| 1usize)
        .get(&goal)
        .copied()
}
