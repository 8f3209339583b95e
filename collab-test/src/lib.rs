// Integration test utilities and fixture graphs for collab.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, TimeZone, Utc};

use collab_core::CollaborationGraph;
use collab_core::types::{ChatIdentity, Employee, InteractionKind};

/// Fixed instant used by fixtures that need reproducible timestamps.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap()
}

/// Four employees A–D mapped to chat identities u1–u4.
///
/// Interactions (all by identity):
///   u1–u2 twice, u1–u3 once, u2–u4 once, u3–u4 once.
///
/// So `neighbors(A) == {B: 2, C: 1}` and both `A,B,D` and `A,C,D` are
/// shortest paths from A to D.
pub fn four_employee_scenario() -> CollaborationGraph {
    let mut graph = CollaborationGraph::new();
    for (id, name, dept) in [
        ("A", "Ada", "Platform"),
        ("B", "Ben", "Platform"),
        ("C", "Cy", "Data"),
        ("D", "Dee", "Security"),
    ] {
        graph
            .add_employee(Employee::new(
                id,
                name,
                format!("{}@example.com", name.to_lowercase()),
                dept,
            ))
            .expect("fixture employee");
    }
    for (n, id) in ["A", "B", "C", "D"].into_iter().enumerate() {
        graph
            .add_chat_identity(ChatIdentity::new(
                format!("u{}", n + 1),
                id.to_lowercase(),
                id,
            ))
            .expect("fixture identity");
    }

    let t0 = epoch();
    for (i, (key, a, b, kind)) in [
        ("ISSUE-1", "u1", "u2", InteractionKind::Issue),
        ("BUG-2", "u2", "u1", InteractionKind::Bug),
        ("CR-3", "u1", "u3", InteractionKind::CodeReview),
        ("ISSUE-4", "u2", "u4", InteractionKind::Issue),
        ("DISC-5", "u3", "u4", InteractionKind::Discussion),
    ]
    .into_iter()
    .enumerate()
    {
        graph
            .record_interaction_by_identity(key, a, b, kind, t0 + Duration::days(i as i64))
            .expect("fixture interaction");
    }
    graph
}

/// The built-in eight-employee sample, anchored at `now`.
pub fn eight_employee_sample(now: DateTime<Utc>) -> CollaborationGraph {
    collab_core::sample::eight_employee_sample(now).expect("sample graph")
}

/// A snapshot document written to a temporary directory.
#[derive(Debug)]
pub struct SnapshotFile {
    pub dir: tempfile::TempDir,
    pub path: PathBuf,
}

impl SnapshotFile {
    /// Serialize `graph` into `<tempdir>/collab.json`.
    pub fn write(graph: &CollaborationGraph) -> Self {
        Self::write_text(&graph.serialize())
    }

    /// Write raw document text, for malformed-input cases.
    pub fn write_text(text: &str) -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        let path = dir.path().join("collab.json");
        std::fs::write(&path, text).expect("write snapshot");
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document back and load it.
    pub fn load(&self) -> anyhow::Result<CollaborationGraph> {
        let text = std::fs::read_to_string(&self.path)?;
        Ok(CollaborationGraph::deserialize(&text)?)
    }

    /// Parse the document with a general JSON parser.
    pub fn as_json(&self) -> anyhow::Result<serde_json::Value> {
        let text = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
