use std::collections::BTreeMap;

use crate::types::{Adjacency, Employee, EmployeeId};

/// Common interface for diagram text generators.
///
/// Exporters are pure: the same adjacency and registry always produce
/// byte-identical output.
pub trait Exporter: Send + Sync {
    /// Human-readable name for this exporter.
    fn name(&self) -> &'static str;

    /// Conventional file extension for the output, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Render every registered employee as a node and every weighted pair in
    /// `adjacency` as one undirected edge.
    fn render(&self, adjacency: &Adjacency, employees: &BTreeMap<EmployeeId, Employee>) -> String;
}
