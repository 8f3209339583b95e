use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::analyze::GraphStats;
use crate::error::GraphError;
use crate::query;
use crate::render::Exporter;
use crate::types::{
    Adjacency, AdjacencyRow, ChatIdentity, Employee, EmployeeId, ExternalId, Interaction,
    InteractionKind, RecordOutcome,
};

use super::incremental::{build_adjacency, increment_edge};

/// Undirected, weighted collaboration graph of employees.
///
/// Owns the employee registry, chat identity mappings, the append-only
/// interaction log and the adjacency index derived from it. The weight of
/// edge `(a, b)` is the number of logged interactions between `a` and `b`.
///
/// Mutations take `&mut self` and queries `&self`; every query returns an
/// owned snapshot or a shared borrow, so callers cannot bypass the
/// registration checks. A failed mutation leaves the graph unchanged.
#[derive(Debug, Clone, Default)]
pub struct CollaborationGraph {
    employees: BTreeMap<EmployeeId, Employee>,
    identities: BTreeMap<ExternalId, ChatIdentity>,
    identity_index: HashMap<ExternalId, EmployeeId>,
    interactions: Vec<Interaction>,
    adjacency: Adjacency,
}

impl CollaborationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ───────────────────────────────────────────────

    pub fn add_employee(&mut self, employee: Employee) -> Result<(), GraphError> {
        if self.employees.contains_key(&employee.id) {
            return Err(GraphError::DuplicateKey {
                entity: "employee",
                key: employee.id.to_string(),
            });
        }
        debug!(employee = %employee.id, "Registered employee");
        self.adjacency.entry(employee.id.clone()).or_default();
        self.employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    /// Map a chat identity onto a registered employee.
    pub fn add_chat_identity(&mut self, identity: ChatIdentity) -> Result<(), GraphError> {
        if !self.employees.contains_key(&identity.employee_id) {
            return Err(GraphError::UnknownEmployee(identity.employee_id.to_string()));
        }
        if self.identities.contains_key(&identity.external_id) {
            return Err(GraphError::DuplicateKey {
                entity: "chat identity",
                key: identity.external_id.to_string(),
            });
        }
        debug!(
            external_id = %identity.external_id,
            employee = %identity.employee_id,
            "Registered chat identity"
        );
        self.identity_index
            .insert(identity.external_id.clone(), identity.employee_id.clone());
        self.identities.insert(identity.external_id.clone(), identity);
        Ok(())
    }

    // ── Recording ──────────────────────────────────────────────────

    /// Record an interaction between two chat identities.
    pub fn record_interaction_by_identity(
        &mut self,
        issue_key: impl Into<String>,
        external_a: &str,
        external_b: &str,
        kind: InteractionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<RecordOutcome, GraphError> {
        let employee_a = self.resolve_identity(external_a).cloned();
        let employee_b = self.resolve_identity(external_b).cloned();
        let (Some(employee_a), Some(employee_b)) = (employee_a, employee_b) else {
            let missing = if self.resolve_identity(external_a).is_none() {
                external_a
            } else {
                external_b
            };
            return Err(GraphError::UnknownIdentity(missing.to_string()));
        };
        self.record_interaction_by_employee(
            issue_key,
            employee_a.as_str(),
            employee_b.as_str(),
            kind,
            timestamp,
        )
    }

    /// Record an interaction between two registered employees.
    ///
    /// An interaction of an employee with themselves is accepted and
    /// discarded: the call succeeds with
    /// [`RecordOutcome::IgnoredSelfInteraction`] and nothing is logged.
    pub fn record_interaction_by_employee(
        &mut self,
        issue_key: impl Into<String>,
        employee_a: &str,
        employee_b: &str,
        kind: InteractionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<RecordOutcome, GraphError> {
        let employee_a = EmployeeId::from(employee_a);
        let employee_b = EmployeeId::from(employee_b);
        let interaction = Interaction {
            issue_key: issue_key.into(),
            employee_a: employee_a.clone(),
            employee_b: employee_b.clone(),
            kind,
            timestamp,
        };
        let outcome = self.append_to_log(interaction)?;
        if outcome == RecordOutcome::Recorded {
            increment_edge(&mut self.adjacency, &employee_a, &employee_b, 1);
            debug!(a = %employee_a, b = %employee_b, kind = %kind, "Recorded interaction");
        }
        Ok(outcome)
    }

    /// Validate and append to the log without touching the adjacency.
    ///
    /// Callers must either increment the edge or rebuild the adjacency.
    pub(crate) fn append_to_log(
        &mut self,
        interaction: Interaction,
    ) -> Result<RecordOutcome, GraphError> {
        for id in [&interaction.employee_a, &interaction.employee_b] {
            if !self.employees.contains_key(id) {
                return Err(GraphError::UnknownEmployee(id.to_string()));
            }
        }
        if interaction.employee_a == interaction.employee_b {
            trace!(
                issue = %interaction.issue_key,
                employee = %interaction.employee_a,
                "Ignored self-interaction"
            );
            return Ok(RecordOutcome::IgnoredSelfInteraction);
        }
        self.interactions.push(interaction);
        Ok(RecordOutcome::Recorded)
    }

    // ── Registry lookups ───────────────────────────────────────────

    pub fn employees(&self) -> &BTreeMap<EmployeeId, Employee> {
        &self.employees
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.get(id)
    }

    pub fn contains_employee(&self, id: &str) -> bool {
        self.employees.contains_key(id)
    }

    /// Display name for an employee, or the id itself when unregistered.
    pub fn name_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.employees.get(id).map_or(id, |e| e.name.as_str())
    }

    pub fn chat_identities(&self) -> &BTreeMap<ExternalId, ChatIdentity> {
        &self.identities
    }

    /// The employee a chat identity is mapped to.
    pub fn resolve_identity(&self, external_id: &str) -> Option<&EmployeeId> {
        self.identity_index.get(external_id)
    }

    /// The full interaction log in recording order.
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Neighbors of `employee_id` with interaction counts. Empty for an
    /// employee without interactions or an unknown id.
    pub fn neighbors(&self, employee_id: &str) -> AdjacencyRow {
        self.adjacency.get(employee_id).cloned().unwrap_or_default()
    }

    /// The `limit` most frequent collaborators, heaviest first, ties by
    /// ascending id.
    pub fn top_collaborators(&self, employee_id: &str, limit: usize) -> Vec<(EmployeeId, u32)> {
        self.adjacency
            .get(employee_id)
            .map(|row| query::top_collaborators(row, limit))
            .unwrap_or_default()
    }

    /// Fewest-hop chain of collaborators from `from` to `to`, inclusive.
    ///
    /// Empty when either employee is unregistered or they are not connected.
    /// Among equal-length paths the result follows ascending-id BFS
    /// expansion; it is deterministic but not otherwise meaningful.
    pub fn shortest_path(&self, from: &str, to: &str) -> Vec<EmployeeId> {
        if !self.contains_employee(from) || !self.contains_employee(to) {
            return Vec::new();
        }
        query::shortest_path(&self.adjacency, from, to)
    }

    /// Snapshot of the live adjacency index.
    pub fn adjacency(&self) -> Adjacency {
        self.adjacency.clone()
    }

    /// Adjacency rebuilt from the interactions accepted by `predicate`.
    ///
    /// Every registered employee has a row. The live index is not touched.
    pub fn filtered_adjacency<F>(&self, predicate: F) -> Adjacency
    where
        F: Fn(&Interaction) -> bool,
    {
        build_adjacency(self.employees.keys(), &self.interactions, predicate)
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats::compute(
            &self.adjacency,
            self.identities.len(),
            self.interactions.len(),
        )
    }

    // ── Replay ─────────────────────────────────────────────────────

    /// Replace the adjacency index with a fresh replay of the full log.
    pub fn rebuild_adjacency(&mut self) {
        self.adjacency = build_adjacency(self.employees.keys(), &self.interactions, |_| true);
    }

    /// Whether the incrementally maintained index equals a replay of the log.
    pub fn verify_adjacency(&self) -> bool {
        self.adjacency == build_adjacency(self.employees.keys(), &self.interactions, |_| true)
    }

    // ── Export ─────────────────────────────────────────────────────

    pub fn export(&self, exporter: &dyn Exporter) -> String {
        exporter.render(&self.adjacency, &self.employees)
    }

    /// Export only the interactions accepted by `predicate`.
    pub fn export_filtered<F>(&self, exporter: &dyn Exporter, predicate: F) -> String
    where
        F: Fn(&Interaction) -> bool,
    {
        exporter.render(&self.filtered_adjacency(predicate), &self.employees)
    }
}
