// Snapshot writer: emits the document layout read by `reader`.
//
// Output is deterministic: employees sorted by id, identities by external id,
// interactions in log order. The result is also valid JSON.

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::store::CollaborationGraph;

use super::fields;

pub(crate) fn write_document(graph: &CollaborationGraph) -> String {
    let employees: Vec<String> = graph
        .employees()
        .values()
        .map(|e| {
            record(&[
                (fields::ID, e.id.as_str()),
                (fields::NAME, e.name.as_str()),
                (fields::EMAIL, e.email.as_str()),
                (fields::DEPARTMENT, e.department.as_str()),
            ])
        })
        .collect();

    let identities: Vec<String> = graph
        .chat_identities()
        .values()
        .map(|i| {
            record(&[
                (fields::EXTERNAL_ID, i.external_id.as_str()),
                (fields::HANDLE, i.handle.as_str()),
                (fields::EMPLOYEE_ID, i.employee_id.as_str()),
            ])
        })
        .collect();

    let interactions: Vec<String> = graph
        .interactions()
        .iter()
        .map(|i| {
            let timestamp = format_timestamp(&i.timestamp);
            record(&[
                (fields::ISSUE_KEY, i.issue_key.as_str()),
                (fields::EMPLOYEE_A, i.employee_a.as_str()),
                (fields::EMPLOYEE_B, i.employee_b.as_str()),
                (fields::TYPE, i.kind.as_str()),
                (fields::TIMESTAMP, timestamp.as_str()),
            ])
        })
        .collect();

    let mut out = String::from("{\n");
    write_array(&mut out, fields::EMPLOYEES, &employees);
    out.push_str(",\n");
    write_array(&mut out, fields::CHAT_IDENTITIES, &identities);
    out.push_str(",\n");
    write_array(&mut out, fields::INTERACTIONS, &interactions);
    out.push_str("\n}\n");
    out
}

fn write_array(out: &mut String, key: &str, records: &[String]) {
    let _ = write!(out, "  \"{key}\": [");
    if records.is_empty() {
        out.push(']');
        return;
    }
    out.push('\n');
    for (i, rec) in records.iter().enumerate() {
        out.push_str("    ");
        out.push_str(rec);
        if i + 1 < records.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("  ]");
}

fn record(pairs: &[(&str, &str)]) -> String {
    let body: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("\"{k}\":\"{}\"", escape_string(v)))
        .collect();
    format!("{{{}}}", body.join(","))
}

/// RFC 3339 in UTC with a `Z` suffix and only as many fractional digits as needed.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Escape quote, backslash and every control character.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < ' ' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
