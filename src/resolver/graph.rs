//! Dependency graph over a unit selection
//!
//! The graph covers the selected units plus their transitive `requires`
//! closure. Selecting a unit implicitly selects everything it requires; this
//! is the only auto-resolution the planner performs.
//!
//! ## Graph Structure
//!
//! ```text
//! BTreeMap<String, BTreeSet<String>>
//!    ↓              ↓
//!  unit id       [required ids]
//! ```

use std::collections::BTreeSet;

use crate::error::Result;
use crate::manifest::Catalog;
use crate::resolver::sort::{self, Requirements};

/// Selection expanded to its requirement closure, known to be acyclic
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    requested: BTreeSet<String>,
    deps: Requirements,
}

impl DependencyGraph {
    /// Expand `selected` and check the result for cycles
    ///
    /// # Errors
    ///
    /// Returns `UnknownUnit` for ids missing from the catalog and
    /// `CircularDependency` naming the cycle if the closure is cyclic.
    pub fn build(catalog: &Catalog, selected: &BTreeSet<String>) -> Result<Self> {
        let mut deps = Requirements::new();
        let mut stack: Vec<String> = selected.iter().rev().cloned().collect();

        while let Some(id) = stack.pop() {
            if deps.contains_key(&id) {
                continue;
            }
            let unit = catalog.unit(&id)?;
            for dep in unit.requires.iter().rev() {
                if !deps.contains_key(dep) {
                    stack.push(dep.clone());
                }
            }
            deps.insert(id, unit.requires.clone());
        }

        sort::detect_cycle(&deps)?;

        Ok(Self {
            requested: selected.clone(),
            deps,
        })
    }

    /// Every unit in the closure, ascending
    pub fn closure(&self) -> impl Iterator<Item = &String> {
        self.deps.keys()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.deps.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    /// Whether `id` was pulled in by a requirement rather than requested
    pub fn is_auto_included(&self, id: &str) -> bool {
        self.contains(id) && !self.requested.contains(id)
    }

    /// First unit (by id) in the closure that directly requires `id`
    pub fn required_by(&self, id: &str) -> Option<&str> {
        self.deps
            .iter()
            .find(|(_, requires)| requires.contains(id))
            .map(|(unit, _)| unit.as_str())
    }

    /// Deterministic installation order: requirements first, ties by id
    pub fn topological_order(&self) -> Result<Vec<String>> {
        sort::topological_sort(&self.deps)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::PlinthError;
    use crate::manifest::test_support::{catalog, unit};

    fn select(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|id| (*id).to_string()).collect()
    }

    #[test]
    fn test_closure_includes_transitive_requirements() {
        let catalog = catalog(vec![
            unit("a"),
            unit("b").requires(&["a"]),
            unit("c").requires(&["b"]),
            unit("unrelated"),
        ]);

        let graph = DependencyGraph::build(&catalog, &select(&["c"])).expect("graph builds");
        let closure: Vec<&str> = graph.closure().map(String::as_str).collect();
        assert_eq!(closure, vec!["a", "b", "c"]);
        assert!(graph.is_auto_included("a"));
        assert!(!graph.is_auto_included("c"));
        assert!(!graph.contains("unrelated"));
    }

    #[test]
    fn test_required_by() {
        let catalog = catalog(vec![unit("a"), unit("b").requires(&["a"])]);
        let graph = DependencyGraph::build(&catalog, &select(&["b"])).expect("graph builds");
        assert_eq!(graph.required_by("a"), Some("b"));
        assert_eq!(graph.required_by("b"), None);
    }

    #[test]
    fn test_cycle_in_closure() {
        let catalog = catalog(vec![
            unit("a").requires(&["b"]),
            unit("b").requires(&["a"]),
            unit("c"),
        ]);

        let err = DependencyGraph::build(&catalog, &select(&["a"])).expect_err("cycle");
        assert!(matches!(err, PlinthError::CircularDependency { .. }));
    }

    #[test]
    fn test_order_is_deterministic() {
        let catalog = catalog(vec![
            unit("languages/python").requires(&["foundation/core"]),
            unit("foundation/core"),
            unit("infrastructure/docker").requires(&["foundation/core"]),
            unit("standards/testing"),
        ]);
        let selection = select(&[
            "standards/testing",
            "infrastructure/docker",
            "languages/python",
        ]);

        let first = DependencyGraph::build(&catalog, &selection)
            .and_then(|g| g.topological_order())
            .expect("order");
        let second = DependencyGraph::build(&catalog, &selection)
            .and_then(|g| g.topological_order())
            .expect("order");

        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                "foundation/core",
                "infrastructure/docker",
                "languages/python",
                "standards/testing",
            ]
        );
    }
}
