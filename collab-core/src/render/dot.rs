// Graphviz DOT exporter: undirected `graph` with weight-labeled edges.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::config::ExportSection;
use crate::query::undirected_edges;
use crate::types::{Adjacency, Employee, EmployeeId};

use super::traits::Exporter;

#[derive(Debug, Clone)]
pub struct DotExporter {
    pub graph_name: String,
    /// Attribute list for the `node [...]` default statement.
    pub node_style: String,
}

impl Default for DotExporter {
    fn default() -> Self {
        Self::from_config(&ExportSection::default())
    }
}

impl DotExporter {
    pub fn from_config(config: &ExportSection) -> Self {
        Self {
            graph_name: config.dot_graph_name.clone(),
            node_style: config.dot_node_style.clone(),
        }
    }
}

impl Exporter for DotExporter {
    fn name(&self) -> &'static str {
        "dot"
    }

    fn file_extension(&self) -> &'static str {
        "dot"
    }

    fn render(&self, adjacency: &Adjacency, employees: &BTreeMap<EmployeeId, Employee>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "graph {} {{", graph_id(&self.graph_name));
        if !self.node_style.is_empty() {
            let _ = writeln!(out, "  node [{}];", self.node_style);
        }

        for employee in employees.values() {
            let _ = writeln!(
                out,
                "  \"{}\" [label=\"{}\\n{}\"];",
                escape_dot(employee.id.as_str()),
                escape_dot(&employee.name),
                escape_dot(&employee.department)
            );
        }

        for (u, v, weight) in undirected_edges(adjacency) {
            let _ = writeln!(
                out,
                "  \"{}\" -- \"{}\" [label=\"{weight}\"];",
                escape_dot(u.as_str()),
                escape_dot(v.as_str())
            );
        }

        out.push_str("}\n");
        out
    }
}

/// Escape a string for use inside a double-quoted DOT id.
pub fn escape_dot(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Bare identifiers are used as-is; anything else is quoted.
fn graph_id(name: &str) -> String {
    let bare = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if bare {
        name.to_string()
    } else {
        format!("\"{}\"", escape_dot(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::incremental::increment_edge;

    fn registry(employees: &[Employee]) -> BTreeMap<EmployeeId, Employee> {
        employees.iter().map(|e| (e.id.clone(), e.clone())).collect()
    }

    #[test]
    fn renders_nodes_and_single_edges() {
        let employees = registry(&[
            Employee::new("E-1", "Alice", "alice@acme.com", "Platform"),
            Employee::new("E-2", "Bob", "bob@acme.com", "SRE"),
            Employee::new("E-3", "Cara", "cara@acme.com", "Payments"),
        ]);
        let mut adj = Adjacency::new();
        increment_edge(&mut adj, &"E-2".into(), &"E-1".into(), 2);
        increment_edge(&mut adj, &"E-1".into(), &"E-3".into(), 1);

        let out = DotExporter::default().render(&adj, &employees);
        insta::assert_snapshot!(out, @r#"
graph EmployeeConnections {
  node [shape=circle, style=filled, fillcolor=lightyellow];
  "E-1" [label="Alice\nPlatform"];
  "E-2" [label="Bob\nSRE"];
  "E-3" [label="Cara\nPayments"];
  "E-1" -- "E-2" [label="2"];
  "E-1" -- "E-3" [label="1"];
}
"#);
    }

    #[test]
    fn escapes_quotes_and_backslashes() {
        let employees = registry(&[Employee::new(
            "E-\"9\"",
            "Dr. \"Q\"",
            "q@acme.com",
            "R\\D",
        )]);
        let out = DotExporter::default().render(&Adjacency::new(), &employees);
        assert!(out.contains(r#""E-\"9\"" [label="Dr. \"Q\"\nR\\D"];"#));
    }

    #[test]
    fn graph_name_quoted_when_needed() {
        assert_eq!(graph_id("Team_Graph"), "Team_Graph");
        assert_eq!(graph_id("my graph"), "\"my graph\"");
        assert_eq!(graph_id("2025"), "\"2025\"");
        assert_eq!(graph_id(""), "\"\"");
    }

    #[test]
    fn render_is_deterministic() {
        let employees = registry(&[
            Employee::new("B", "Bob", "", "SRE"),
            Employee::new("A", "Alice", "", "Platform"),
        ]);
        let mut adj = Adjacency::new();
        increment_edge(&mut adj, &"A".into(), &"B".into(), 1);
        let exporter = DotExporter::default();
        assert_eq!(
            exporter.render(&adj, &employees),
            exporter.render(&adj, &employees)
        );
    }
}
