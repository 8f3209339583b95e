// Mermaid flowchart exporter, for notebooks and markdown that render ```mermaid blocks.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::config::ExportSection;
use crate::query::undirected_edges;
use crate::types::{Adjacency, Employee, EmployeeId};

use super::traits::Exporter;

#[derive(Debug, Clone)]
pub struct MermaidExporter {
    /// Flowchart direction: `TD`, `TB`, `BT`, `LR` or `RL`.
    pub direction: String,
}

impl Default for MermaidExporter {
    fn default() -> Self {
        Self::from_config(&ExportSection::default())
    }
}

impl MermaidExporter {
    pub fn from_config(config: &ExportSection) -> Self {
        Self {
            direction: config.mermaid_direction.clone(),
        }
    }
}

impl Exporter for MermaidExporter {
    fn name(&self) -> &'static str {
        "mermaid"
    }

    fn file_extension(&self) -> &'static str {
        "mmd"
    }

    fn render(&self, adjacency: &Adjacency, employees: &BTreeMap<EmployeeId, Employee>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "graph {};", self.direction);

        for employee in employees.values() {
            let _ = writeln!(
                out,
                "  {}[\"{}<br/>{}\"];",
                mermaid_safe_id(employee.id.as_str()),
                escape_mermaid(&employee.name),
                escape_mermaid(&employee.department)
            );
        }

        for (u, v, weight) in undirected_edges(adjacency) {
            let _ = writeln!(
                out,
                "  {} ---|{weight}| {};",
                mermaid_safe_id(u.as_str()),
                mermaid_safe_id(v.as_str())
            );
        }

        out
    }
}

/// Map an employee id onto Mermaid's node id alphabet.
///
/// Characters outside `[A-Za-z0-9_]` become `_`; ids that would not start
/// with a letter get an `N_` prefix. Distinct ids may collide after mapping
/// (`E-1` and `E_1`).
pub fn mermaid_safe_id(id: &str) -> String {
    if id.is_empty() {
        return "N_".to_string();
    }
    let base: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if base.starts_with(|c: char| c.is_ascii_alphabetic()) {
        base
    } else {
        format!("N_{base}")
    }
}

/// Escape display text for a quoted Mermaid label. Line breaks become
/// `<br/>` so a node statement stays on one line.
pub fn escape_mermaid(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("<br/>"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}
