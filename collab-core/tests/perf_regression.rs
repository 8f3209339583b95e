use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};

use collab_core::CollaborationGraph;
use collab_core::types::{Employee, InteractionKind};

fn threshold_ms(var: &str, default_ms: u64) -> Duration {
    let ms = std::env::var(var)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}

fn synthetic_graph(employees: usize, interactions: usize) -> CollaborationGraph {
    let mut graph = CollaborationGraph::new();
    for i in 0..employees {
        graph
            .add_employee(Employee::new(
                format!("E{i:05}"),
                format!("Employee {i}"),
                format!("e{i}@example.com"),
                "Engineering",
            ))
            .unwrap();
    }

    let base = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    for n in 0..interactions {
        let a = n % employees;
        let b = (a * 31 + n / employees + 1) % employees;
        graph
            .record_interaction_by_employee(
                format!("PERF-{n}"),
                &format!("E{a:05}"),
                &format!("E{b:05}"),
                InteractionKind::ALL[n % 4],
                base + chrono::Duration::seconds(n as i64),
            )
            .unwrap();
    }
    graph
}

#[test]
#[ignore = "performance gate; run explicitly in CI/dev workflows"]
fn perf_recording_under_threshold() {
    let t0 = Instant::now();
    let graph = synthetic_graph(2_000, 100_000);
    let elapsed = t0.elapsed();

    assert!(graph.verify_adjacency());
    assert!(
        elapsed <= threshold_ms("COLLAB_PERF_RECORD_MS", 3000),
        "recording exceeded threshold: {elapsed:?}"
    );
}

#[test]
#[ignore = "performance gate; run explicitly in CI/dev workflows"]
fn perf_shortest_path_under_threshold() {
    let graph = synthetic_graph(10_000, 40_000);

    let t0 = Instant::now();
    for i in 0..100 {
        let _ = graph.shortest_path("E00000", &format!("E{:05}", 9_999 - i));
    }
    let elapsed = t0.elapsed();

    assert!(
        elapsed <= threshold_ms("COLLAB_PERF_PATH_MS", 5000),
        "shortest path exceeded threshold: {elapsed:?}"
    );
}

#[test]
#[ignore = "performance gate; run explicitly in CI/dev workflows"]
fn perf_snapshot_round_trip_under_threshold() {
    let graph = synthetic_graph(2_000, 50_000);

    let t0 = Instant::now();
    let text = graph.serialize();
    let loaded = CollaborationGraph::deserialize(&text).unwrap();
    let elapsed = t0.elapsed();

    assert_eq!(loaded.interactions().len(), graph.interactions().len());
    assert!(
        elapsed <= threshold_ms("COLLAB_PERF_SNAPSHOT_MS", 5000),
        "snapshot round trip exceeded threshold: {elapsed:?}"
    );
}
