// Network analysis: petgraph projection of the collaboration adjacency and
// summary statistics over it.

use std::collections::HashMap;

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

use crate::query::undirected_edges;
use crate::types::{Adjacency, EmployeeId};

// ── In-memory graph ────────────────────────────────────────────────

/// A petgraph `UnGraph` built from an adjacency snapshot, with
/// `EmployeeId` ↔ `NodeIndex` mapping.
#[derive(Debug)]
pub struct CollaborationNetwork {
    pub graph: UnGraph<EmployeeId, u32>,
    pub node_to_index: HashMap<EmployeeId, NodeIndex>,
}

impl CollaborationNetwork {
    /// One node per adjacency row, one edge per unordered pair weighted by
    /// interaction count.
    pub fn from_adjacency(adjacency: &Adjacency) -> Self {
        let mut graph = UnGraph::<EmployeeId, u32>::with_capacity(adjacency.len(), 0);
        let mut node_to_index: HashMap<EmployeeId, NodeIndex> = HashMap::new();

        for id in adjacency.keys() {
            let idx = graph.add_node(id.clone());
            node_to_index.insert(id.clone(), idx);
        }

        for (u, v, weight) in undirected_edges(adjacency) {
            if let (Some(&a), Some(&b)) = (node_to_index.get(u), node_to_index.get(v)) {
                graph.add_edge(a, b, weight);
            }
        }

        Self {
            graph,
            node_to_index,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of connected groups; an employee with no interactions counts as its own group.
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    pub fn degree(&self, id: &str) -> usize {
        self.node_to_index
            .get(id)
            .map_or(0, |&idx| self.graph.neighbors(idx).count())
    }
}

// ── Statistics ─────────────────────────────────────────────────────

/// Summary counts for a collaboration graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub employees: usize,
    pub chat_identities: usize,
    pub interactions: usize,
    /// Distinct collaborating pairs.
    pub edges: usize,
    /// Sum of all edge weights; equals `interactions` for an unfiltered graph.
    pub total_weight: u64,
    /// Employees with no recorded interactions.
    pub isolated: usize,
    pub components: usize,
}

impl GraphStats {
    pub(crate) fn compute(
        adjacency: &Adjacency,
        chat_identities: usize,
        interactions: usize,
    ) -> Self {
        let network = CollaborationNetwork::from_adjacency(adjacency);
        let total_weight = network
            .graph
            .edge_weights()
            .map(|w| u64::from(*w))
            .sum();
        let isolated = adjacency.values().filter(|row| row.is_empty()).count();

        Self {
            employees: adjacency.len(),
            chat_identities,
            interactions,
            edges: network.edge_count(),
            total_weight,
            isolated,
            components: network.component_count(),
        }
    }
}
