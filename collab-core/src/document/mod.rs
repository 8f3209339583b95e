//! Snapshot documents: the textual form of a whole [`CollaborationGraph`].
//!
//! A document is an object with three arrays of flat string records:
//!
//! ```text
//! {
//!   "employees": [ {"id":..,"name":..,"email":..,"department":..} ],
//!   "chatIdentities": [ {"externalId":..,"handle":..,"employeeId":..} ],
//!   "interactions": [ {"issueKey":..,"employeeA":..,"employeeB":..,"type":..,"timestamp":..} ]
//! }
//! ```
//!
//! Loading is best-effort per record and fatal per document: a missing
//! array fails the load, a bad record is skipped with a warning. The
//! adjacency is never read from a document; it is replayed from the loaded
//! interactions.

mod reader;
mod writer;

use chrono::{DateTime, Utc};
use tracing::{info, trace, warn};

use crate::error::{DocumentError, GraphError};
use crate::store::CollaborationGraph;
use crate::types::{ChatIdentity, Employee, Interaction, InteractionKind, RecordOutcome};

use reader::{RawRecord, RecordSlot};

pub use writer::escape_string;

/// Array and field names used in documents.
pub mod fields {
    pub const EMPLOYEES: &str = "employees";
    pub const CHAT_IDENTITIES: &str = "chatIdentities";
    pub const INTERACTIONS: &str = "interactions";
    /// Array name written by older exports for chat identities.
    pub const LEGACY_CHAT_IDENTITIES: &str = "slackUsers";

    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const DEPARTMENT: &str = "department";

    pub const EXTERNAL_ID: &str = "externalId";
    /// Field name written by older exports for the external id.
    pub const LEGACY_EXTERNAL_ID: &str = "slackId";
    pub const HANDLE: &str = "handle";
    pub const EMPLOYEE_ID: &str = "employeeId";

    pub const ISSUE_KEY: &str = "issueKey";
    pub const EMPLOYEE_A: &str = "employeeA";
    pub const EMPLOYEE_B: &str = "employeeB";
    pub const TYPE: &str = "type";
    pub const TIMESTAMP: &str = "timestamp";
}

const IDENTITY_ARRAYS: [&str; 2] = [fields::CHAT_IDENTITIES, fields::LEGACY_CHAT_IDENTITIES];

/// Loaded and skipped record counts for one array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordCounts {
    pub loaded: usize,
    pub skipped: usize,
}

/// What a load kept and what it dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub employees: RecordCounts,
    pub chat_identities: RecordCounts,
    pub interactions: RecordCounts,
}

impl LoadReport {
    pub fn total_skipped(&self) -> usize {
        self.employees.skipped + self.chat_identities.skipped + self.interactions.skipped
    }
}

/// Why a single record was not loaded.
#[derive(thiserror::Error, Debug)]
enum RecordIssue {
    #[error("{0}")]
    Syntax(DocumentError),

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid `{field}` value {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("{0}")]
    Rejected(GraphError),

    #[error("self-interaction")]
    SelfInteraction,
}

impl CollaborationGraph {
    /// Render the whole graph as a snapshot document.
    pub fn serialize(&self) -> String {
        writer::write_document(self)
    }

    /// Load a graph from a snapshot document, skipping unusable records.
    pub fn deserialize(text: &str) -> Result<Self, DocumentError> {
        deserialize_with_report(text).map(|(graph, _)| graph)
    }
}

/// Load a graph and report how many records of each array were skipped.
pub fn deserialize_with_report(
    text: &str,
) -> Result<(CollaborationGraph, LoadReport), DocumentError> {
    let mut doc = reader::parse_document(text)?;

    for keys in [
        &[fields::EMPLOYEES][..],
        &IDENTITY_ARRAYS[..],
        &[fields::INTERACTIONS][..],
    ] {
        if !doc.has_array(keys) {
            return Err(DocumentError::MalformedDocument(format!(
                "missing top-level array `{}`",
                keys[0]
            )));
        }
    }

    let employees = doc.take_array(&[fields::EMPLOYEES]).unwrap_or_default();
    let identities = doc.take_array(&IDENTITY_ARRAYS).unwrap_or_default();
    let interactions = doc.take_array(&[fields::INTERACTIONS]).unwrap_or_default();

    let mut graph = CollaborationGraph::new();
    let mut report = LoadReport::default();

    load_array(fields::EMPLOYEES, employees, &mut report.employees, |r| {
        let employee = employee_from(r)?;
        graph.add_employee(employee).map_err(RecordIssue::Rejected)
    });

    load_array(fields::CHAT_IDENTITIES, identities, &mut report.chat_identities, |r| {
        let identity = identity_from(r)?;
        graph.add_chat_identity(identity).map_err(RecordIssue::Rejected)
    });

    load_array(fields::INTERACTIONS, interactions, &mut report.interactions, |r| {
        let interaction = interaction_from(r)?;
        match graph.append_to_log(interaction).map_err(RecordIssue::Rejected)? {
            RecordOutcome::Recorded => Ok(()),
            RecordOutcome::IgnoredSelfInteraction => Err(RecordIssue::SelfInteraction),
        }
    });

    graph.rebuild_adjacency();

    info!(
        employees = report.employees.loaded,
        chat_identities = report.chat_identities.loaded,
        interactions = report.interactions.loaded,
        skipped = report.total_skipped(),
        "Loaded collaboration graph"
    );

    Ok((graph, report))
}

fn load_array<F>(array: &str, slots: Vec<RecordSlot>, counts: &mut RecordCounts, mut load: F)
where
    F: FnMut(&RawRecord) -> Result<(), RecordIssue>,
{
    for (index, slot) in slots.into_iter().enumerate() {
        let result = slot
            .map_err(RecordIssue::Syntax)
            .and_then(|record| load(&record));
        match result {
            Ok(()) => counts.loaded += 1,
            Err(RecordIssue::SelfInteraction) => {
                trace!(array, index, "Skipped self-interaction record");
                counts.skipped += 1;
            }
            Err(issue) => {
                warn!(array, index, reason = %issue, "Skipped record");
                counts.skipped += 1;
            }
        }
    }
}

fn required<'r>(record: &'r RawRecord, field: &'static str) -> Result<&'r str, RecordIssue> {
    record
        .get(field)
        .map(String::as_str)
        .ok_or(RecordIssue::MissingField(field))
}

fn optional<'r>(record: &'r RawRecord, field: &str) -> &'r str {
    record.get(field).map_or("", String::as_str)
}

fn employee_from(record: &RawRecord) -> Result<Employee, RecordIssue> {
    let id = required(record, fields::ID)?;
    if id.is_empty() {
        return Err(RecordIssue::MissingField(fields::ID));
    }
    Ok(Employee::new(
        id,
        optional(record, fields::NAME),
        optional(record, fields::EMAIL),
        optional(record, fields::DEPARTMENT),
    ))
}

fn identity_from(record: &RawRecord) -> Result<ChatIdentity, RecordIssue> {
    let external_id = required(record, fields::EXTERNAL_ID)
        .or_else(|_| required(record, fields::LEGACY_EXTERNAL_ID))
        .map_err(|_| RecordIssue::MissingField(fields::EXTERNAL_ID))?;
    let employee_id = required(record, fields::EMPLOYEE_ID)?;
    Ok(ChatIdentity::new(
        external_id,
        optional(record, fields::HANDLE),
        employee_id,
    ))
}

fn interaction_from(record: &RawRecord) -> Result<Interaction, RecordIssue> {
    let issue_key = required(record, fields::ISSUE_KEY)?;
    let employee_a = required(record, fields::EMPLOYEE_A)?;
    let employee_b = required(record, fields::EMPLOYEE_B)?;
    let kind_text = required(record, fields::TYPE)?;
    let timestamp_text = required(record, fields::TIMESTAMP)?;

    let kind: InteractionKind = kind_text.parse().map_err(|_| RecordIssue::InvalidField {
        field: fields::TYPE,
        value: kind_text.to_string(),
    })?;
    // Years outside 0000..=9999 carry a sign and extra digits, which
    // `parse_from_rfc3339` rejects; the `FromStr` impl accepts them.
    let timestamp = timestamp_text
        .parse::<DateTime<Utc>>()
        .map_err(|_| RecordIssue::InvalidField {
            field: fields::TIMESTAMP,
            value: timestamp_text.to_string(),
        })?;

    Ok(Interaction {
        issue_key: issue_key.to_string(),
        employee_a: employee_a.into(),
        employee_b: employee_b.into(),
        kind,
        timestamp,
    })
}
