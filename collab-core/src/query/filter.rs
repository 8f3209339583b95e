//! Reusable interaction predicates for windowed views.
//!
//! Each constructor returns a plain `Fn(&Interaction) -> bool` that can be
//! passed to [`CollaborationGraph::filtered_adjacency`](crate::store::CollaborationGraph::filtered_adjacency)
//! or any exporter's filtered variant. Predicates only read the interaction.

use chrono::{DateTime, Duration, Utc};

use crate::types::{EmployeeId, Interaction, InteractionKind};

/// Interactions strictly after `start`.
pub fn since(start: DateTime<Utc>) -> impl Fn(&Interaction) -> bool {
    move |i| i.timestamp > start
}

/// Interactions in the half-open range `[start, end)`.
pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> impl Fn(&Interaction) -> bool {
    move |i| i.timestamp >= start && i.timestamp < end
}

/// Interactions strictly after `now - window`.
pub fn within_last(window: Duration, now: DateTime<Utc>) -> impl Fn(&Interaction) -> bool {
    since(now - window)
}

pub fn of_kind(kind: InteractionKind) -> impl Fn(&Interaction) -> bool {
    move |i| i.kind == kind
}

pub fn of_kinds(kinds: &[InteractionKind]) -> impl Fn(&Interaction) -> bool + use<> {
    let kinds = kinds.to_vec();
    move |i| kinds.contains(&i.kind)
}

/// Interactions where `employee` is one of the two participants.
pub fn involving(employee: impl Into<EmployeeId>) -> impl Fn(&Interaction) -> bool {
    let employee = employee.into();
    move |i| i.involves(employee.as_str())
}

/// Both predicates must accept.
pub fn and<F, G>(f: F, g: G) -> impl Fn(&Interaction) -> bool
where
    F: Fn(&Interaction) -> bool,
    G: Fn(&Interaction) -> bool,
{
    move |i| f(i) && g(i)
}
