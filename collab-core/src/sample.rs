//! Built-in sample dataset: eight employees across six teams.
//!
//! Used by `collab demo` and by the fixture crate. Timestamps are relative to
//! the `now` passed in, so windowed queries behave the same on every run.

use chrono::{DateTime, Duration, Utc};

use crate::error::GraphError;
use crate::store::CollaborationGraph;
use crate::types::{ChatIdentity, Employee, InteractionKind};

const EMPLOYEES: [(&str, &str, &str, &str); 8] = [
    ("E-2001", "Alice", "alice@acme.com", "Platform"),
    ("E-2002", "Bob", "bob@acme.com", "SRE"),
    ("E-2003", "Cara", "cara@acme.com", "Payments"),
    ("E-2004", "Dave", "dave@acme.com", "Platform"),
    ("E-2005", "Eve", "eve@acme.com", "Security"),
    ("E-2006", "Frank", "frank@acme.com", "Mobile"),
    ("E-2007", "Grace", "grace@acme.com", "Data"),
    ("E-2008", "Heidi", "heidi@acme.com", "UX"),
];

const IDENTITIES: [(&str, &str, &str); 8] = [
    ("U101", "alice", "E-2001"),
    ("U102", "bob", "E-2002"),
    ("U103", "cara", "E-2003"),
    ("U104", "dave", "E-2004"),
    ("U105", "eve", "E-2005"),
    ("U106", "frank", "E-2006"),
    ("U107", "grace", "E-2007"),
    ("U108", "heidi", "E-2008"),
];

/// (issue, identity a, identity b, kind, hours before `now`)
const INTERACTIONS: [(&str, &str, &str, InteractionKind, i64); 18] = [
    ("ISSUE-800", "U101", "U102", InteractionKind::Issue, 3 * 24),
    ("BUG-801", "U101", "U102", InteractionKind::Bug, 24),
    ("CR-802", "U101", "U103", InteractionKind::CodeReview, 2 * 24),
    ("ISSUE-803", "U101", "U104", InteractionKind::Issue, 10 * 24),
    ("BUG-804", "U102", "U104", InteractionKind::Bug, 5 * 24),
    ("DISC-805", "U102", "U105", InteractionKind::Discussion, 7),
    ("ISSUE-806", "U103", "U107", InteractionKind::Issue, 6 * 24),
    ("CR-807", "U104", "U106", InteractionKind::CodeReview, 4 * 24),
    ("ISSUE-808", "U105", "U106", InteractionKind::Issue, 24),
    ("BUG-809", "U105", "U108", InteractionKind::Bug, 2 * 24),
    ("DISC-810", "U106", "U107", InteractionKind::Discussion, 3 * 24),
    ("CR-811", "U107", "U108", InteractionKind::CodeReview, 24),
    ("ISSUE-812", "U101", "U102", InteractionKind::Issue, 2 * 24),
    ("DISC-813", "U105", "U106", InteractionKind::Discussion, 12),
    // Older than two weeks.
    ("ISSUE-750", "U101", "U108", InteractionKind::Issue, 40 * 24),
    ("BUG-751", "U102", "U103", InteractionKind::Bug, 20 * 24),
    ("DISC-752", "U104", "U107", InteractionKind::Discussion, 25 * 24),
    ("ISSUE-753", "U106", "U102", InteractionKind::Issue, 31 * 24),
];

/// Build the sample graph with interactions placed relative to `now`.
pub fn eight_employee_sample(now: DateTime<Utc>) -> Result<CollaborationGraph, GraphError> {
    let mut graph = CollaborationGraph::new();
    for (id, name, email, department) in EMPLOYEES {
        graph.add_employee(Employee::new(id, name, email, department))?;
    }
    for (external_id, handle, employee_id) in IDENTITIES {
        graph.add_chat_identity(ChatIdentity::new(external_id, handle, employee_id))?;
    }
    for (issue, a, b, kind, hours_ago) in INTERACTIONS {
        graph.record_interaction_by_identity(issue, a, b, kind, now - Duration::hours(hours_ago))?;
    }
    Ok(graph)
}
