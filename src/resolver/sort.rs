//! Cycle detection and topological ordering
//!
//! ## Algorithm
//!
//! Cycle detection uses DFS with three-color marking:
//!
//! 1. **Unvisited**: node hasn't been processed
//! 2. **InProgress**: node is on the current DFS path
//! 3. **Done**: node and everything it requires has been processed
//!
//! Reaching an `InProgress` node again is a back edge; the slice of the current
//! path starting at that node is the cycle.
//!
//! Ordering then uses Kahn's algorithm with an ordered ready set, which yields
//! the lexicographically smallest topological order: whenever several units
//! have all their requirements placed, the one with the smallest id goes next.
//!
//! ```text
//! a requires -
//! b requires a
//! c requires a
//! d requires -
//!
//! order: a, b, c, d
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{Result, plan};

/// Adjacency list: unit id -> ids it requires
pub type Requirements = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// DFS state for cycle detection
struct CycleSearch<'a> {
    deps: &'a Requirements,
    marks: HashMap<&'a str, Mark>,
    /// Current DFS path, used to report the exact cycle
    path: Vec<&'a str>,
}

impl<'a> CycleSearch<'a> {
    fn visit(&mut self, node: &'a str) -> Result<()> {
        match self.marks.get(node).copied().unwrap_or(Mark::Unvisited) {
            Mark::Done => return Ok(()),
            Mark::InProgress => {
                let start = self.path.iter().position(|n| *n == node).unwrap_or(0);
                let mut cycle: Vec<String> =
                    self.path[start..].iter().map(|n| (*n).to_string()).collect();
                cycle.push(node.to_string());
                return Err(plan::circular(cycle));
            }
            Mark::Unvisited => {}
        }

        self.marks.insert(node, Mark::InProgress);
        self.path.push(node);

        let deps = self.deps;
        if let Some(children) = deps.get(node) {
            for child in children {
                self.visit(child)?;
            }
        }

        self.path.pop();
        self.marks.insert(node, Mark::Done);
        Ok(())
    }
}

/// Fail with `CircularDependency` if the graph has a cycle
///
/// Roots and edges are visited in ascending id order, so the reported cycle is
/// the same on every run.
pub fn detect_cycle(deps: &Requirements) -> Result<()> {
    let mut search = CycleSearch {
        deps,
        marks: HashMap::new(),
        path: Vec::new(),
    };

    for node in deps.keys() {
        search.visit(node)?;
    }
    Ok(())
}

/// Order all nodes so every requirement precedes its dependents
///
/// Ties are broken by ascending id. Requirements that are not themselves keys
/// of `deps` are treated as already satisfied.
///
/// # Errors
///
/// Returns `CircularDependency` if the graph is not acyclic.
pub fn topological_sort(deps: &Requirements) -> Result<Vec<String>> {
    detect_cycle(deps)?;

    let mut pending: BTreeMap<&str, usize> = BTreeMap::new();
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();

    for (node, requires) in deps {
        let in_graph = requires.iter().filter(|r| deps.contains_key(*r));
        let mut count = 0;
        for dep in in_graph {
            dependents.entry(dep.as_str()).or_default().push(node.as_str());
            count += 1;
        }
        pending.insert(node.as_str(), count);
    }

    let mut ready: BTreeSet<&str> = pending
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(node, _)| *node)
        .collect();

    let mut result = Vec::with_capacity(deps.len());
    while let Some(node) = ready.pop_first() {
        result.push(node.to_string());
        for dependent in dependents.get(node).into_iter().flatten() {
            if let Some(count) = pending.get_mut(dependent) {
                *count -= 1;
                if *count == 0 {
                    ready.insert(*dependent);
                }
            }
        }
    }

    Ok(result)
}
