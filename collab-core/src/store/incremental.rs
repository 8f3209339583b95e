// Adjacency maintenance: incremental edge updates and full log replay.
//
// The live adjacency is a write-through cache over the interaction log.
// `build_adjacency` is the single replay routine: filtered views, rebuilds,
// verification and document loading all go through it.

use crate::types::{Adjacency, EmployeeId, Interaction};

/// Add `delta` to the undirected edge `a`–`b`, creating rows as needed.
///
/// Self-edges are never stored.
pub(crate) fn increment_edge(adjacency: &mut Adjacency, a: &EmployeeId, b: &EmployeeId, delta: u32) {
    if a == b {
        return;
    }
    *adjacency
        .entry(a.clone())
        .or_default()
        .entry(b.clone())
        .or_insert(0) += delta;
    *adjacency
        .entry(b.clone())
        .or_default()
        .entry(a.clone())
        .or_insert(0) += delta;
}

/// Fold the interaction log into an adjacency, counting only interactions
/// accepted by `predicate`.
///
/// Every id in `employees` gets a row, empty when none of its interactions
/// pass, so the result has the same key set as the live index.
pub fn build_adjacency<'a, I, F>(employees: I, log: &[Interaction], predicate: F) -> Adjacency
where
    I: IntoIterator<Item = &'a EmployeeId>,
    F: Fn(&Interaction) -> bool,
{
    let mut adjacency: Adjacency = employees
        .into_iter()
        .map(|id| (id.clone(), Default::default()))
        .collect();

    for interaction in log {
        if !predicate(interaction) {
            continue;
        }
        increment_edge(
            &mut adjacency,
            &interaction.employee_a,
            &interaction.employee_b,
            1,
        );
    }

    adjacency
}

/// Check that every weight is mirrored in the opposite row.
pub fn is_symmetric(adjacency: &Adjacency) -> bool {
    adjacency.iter().all(|(a, row)| {
        row.iter().all(|(b, weight)| {
            adjacency
                .get(b)
                .and_then(|back| back.get(a))
                .is_some_and(|w| w == weight)
        })
    })
}
