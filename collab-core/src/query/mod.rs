// Query engine: pure algorithms over an adjacency snapshot.
//
// Used by `CollaborationGraph` for the live index and by callers holding a
// filtered view, so every query works on time- or type-windowed graphs too.

pub mod filter;

use std::collections::{HashMap, HashSet, VecDeque};

use crate::types::{Adjacency, AdjacencyRow, EmployeeId};

/// The `limit` heaviest entries of a row, heaviest first.
///
/// Equal weights are ordered by ascending employee id.
pub fn top_collaborators(row: &AdjacencyRow, limit: usize) -> Vec<(EmployeeId, u32)> {
    if limit == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<(EmployeeId, u32)> =
        row.iter().map(|(id, w)| (id.clone(), *w)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

/// Breadth-first shortest path from `from` to `to`, counting hops only.
///
/// Edge weights are ignored. Neighbors are expanded in ascending id order and
/// the search stops at the first discovery of `to`, so among equal-length
/// paths the one found first in that order wins. Returns `[from]` when the
/// endpoints are equal and an empty path when `to` is unreachable.
pub fn shortest_path(adjacency: &Adjacency, from: &str, to: &str) -> Vec<EmployeeId> {
    if from == to {
        return vec![EmployeeId::from(from)];
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut prev: HashMap<&str, &str> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    visited.insert(from);
    queue.push_back(from);

    while let Some(u) = queue.pop_front() {
        let Some(row) = adjacency.get(u) else {
            continue;
        };
        for v in row.keys() {
            let v = v.as_str();
            if !visited.insert(v) {
                continue;
            }
            prev.insert(v, u);
            if v == to {
                return reconstruct_path(&prev, from, to);
            }
            queue.push_back(v);
        }
    }

    Vec::new()
}

/// Walk predecessor links back from `end`; empty if they never reach `start`.
fn reconstruct_path(prev: &HashMap<&str, &str>, start: &str, end: &str) -> Vec<EmployeeId> {
    let mut path = vec![EmployeeId::from(end)];
    let mut current = end;
    while let Some(&p) = prev.get(current) {
        path.push(EmployeeId::from(p));
        current = p;
    }
    if current != start {
        return Vec::new();
    }
    path.reverse();
    path
}

/// Each unordered pair once, as `(lower id, higher id, weight)` in ascending order.
pub fn undirected_edges(adjacency: &Adjacency) -> Vec<(&EmployeeId, &EmployeeId, u32)> {
    adjacency
        .iter()
        .flat_map(|(u, row)| {
            row.iter()
                .filter(move |(v, _)| u < *v)
                .map(move |(v, w)| (u, v, *w))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::incremental::increment_edge;

    fn graph(edges: &[(&str, &str, u32)]) -> Adjacency {
        let mut adj = Adjacency::new();
        for (a, b, w) in edges {
            increment_edge(&mut adj, &EmployeeId::from(*a), &EmployeeId::from(*b), *w);
        }
        adj
    }

    fn ids(path: &[EmployeeId]) -> Vec<&str> {
        path.iter().map(EmployeeId::as_str).collect()
    }

    #[test]
    fn top_orders_by_weight_then_id() {
        let adj = graph(&[("A", "D", 1), ("A", "C", 3), ("A", "B", 1)]);
        let top = top_collaborators(&adj["A"], 10);
        let names: Vec<_> = top.iter().map(|(id, w)| (id.as_str(), *w)).collect();
        assert_eq!(names, vec![("C", 3), ("B", 1), ("D", 1)]);
    }

    #[test]
    fn top_respects_limit() {
        let adj = graph(&[("A", "B", 2), ("A", "C", 1)]);
        assert!(top_collaborators(&adj["A"], 0).is_empty());
        assert_eq!(top_collaborators(&adj["A"], 1).len(), 1);
        assert_eq!(top_collaborators(&adj["A"], 5).len(), 2);
    }

    #[test]
    fn path_ignores_weights() {
        // Heavy two-hop route vs light direct edge: direct wins.
        let adj = graph(&[("A", "B", 50), ("B", "C", 50), ("A", "C", 1)]);
        assert_eq!(ids(&shortest_path(&adj, "A", "C")), vec!["A", "C"]);
    }

    #[test]
    fn path_tie_break_ascending_id() {
        let adj = graph(&[("A", "C", 1), ("C", "D", 1), ("A", "B", 1), ("B", "D", 1)]);
        assert_eq!(ids(&shortest_path(&adj, "A", "D")), vec!["A", "B", "D"]);
    }

    #[test]
    fn path_to_self_and_unreachable() {
        let adj = graph(&[("A", "B", 1), ("C", "D", 1)]);
        assert_eq!(ids(&shortest_path(&adj, "A", "A")), vec!["A"]);
        assert!(shortest_path(&adj, "A", "D").is_empty());
        assert!(shortest_path(&adj, "A", "Z").is_empty());
        assert!(shortest_path(&adj, "Z", "A").is_empty());
    }

    #[test]
    fn path_multi_hop() {
        let adj = graph(&[("A", "B", 1), ("B", "C", 1), ("C", "D", 1), ("D", "E", 1)]);
        assert_eq!(
            ids(&shortest_path(&adj, "E", "A")),
            vec!["E", "D", "C", "B", "A"]
        );
    }

    #[test]
    fn edges_listed_once() {
        let adj = graph(&[("B", "A", 2), ("C", "A", 1)]);
        let edges: Vec<_> = undirected_edges(&adj)
            .into_iter()
            .map(|(u, v, w)| (u.as_str(), v.as_str(), w))
            .collect();
        assert_eq!(edges, vec![("A", "B", 2), ("A", "C", 1)]);
    }
}
