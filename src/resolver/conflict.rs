//! Mutual exclusion checks
//!
//! Two units conflict when either lists the other in `conflicts`. The
//! detector reports every conflicting pair at once so the caller can show the
//! complete list instead of a fix-one-rerun loop.

use std::collections::BTreeSet;

use crate::error::{Result, plan};
use crate::manifest::Catalog;

/// Checks unit sets against the catalog's declared conflicts
#[derive(Debug, Clone, Copy)]
pub struct ConflictDetector<'a> {
    catalog: &'a Catalog,
}

impl<'a> ConflictDetector<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// All conflicting pairs among `ids`, each as `(smaller, larger)`, sorted
    ///
    /// Ids missing from the catalog are ignored.
    pub fn find(&self, ids: &BTreeSet<String>) -> Vec<(String, String)> {
        let units: Vec<_> = ids.iter().filter_map(|id| self.catalog.get(id)).collect();
        let mut pairs = Vec::new();

        for (i, first) in units.iter().enumerate() {
            for second in &units[i + 1..] {
                if first.conflicts_with(&second.id) || second.conflicts_with(&first.id) {
                    pairs.push((first.id.clone(), second.id.clone()));
                }
            }
        }

        pairs
    }

    /// Fail with `Conflict` listing every pair if any exist
    pub fn check(&self, ids: &BTreeSet<String>) -> Result<()> {
        let pairs = self.find(ids);
        if pairs.is_empty() {
            Ok(())
        } else {
            Err(plan::conflict(pairs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlinthError;
    use crate::manifest::test_support::{catalog, unit};

    fn ids(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|id| (*id).to_string()).collect()
    }

    #[test]
    fn test_one_sided_declaration_is_enough() {
        let catalog = catalog(vec![unit("b"), unit("c").conflicts(&["b"])]);
        let pairs = ConflictDetector::new(&catalog).find(&ids(&["b", "c"]));
        assert_eq!(pairs, vec![("b".to_string(), "c".to_string())]);
    }

    #[test]
    fn test_mutual_declaration_reported_once() {
        let catalog = catalog(vec![
            unit("ruff").conflicts(&["pylint"]),
            unit("pylint").conflicts(&["ruff"]),
        ]);
        let pairs = ConflictDetector::new(&catalog).find(&ids(&["ruff", "pylint"]));
        assert_eq!(pairs, vec![("pylint".to_string(), "ruff".to_string())]);
    }

    #[test]
    fn test_all_pairs_reported() {
        let catalog = catalog(vec![
            unit("a").conflicts(&["b", "c"]),
            unit("b"),
            unit("c"),
            unit("d").conflicts(&["b"]),
        ]);
        let err = ConflictDetector::new(&catalog)
            .check(&ids(&["a", "b", "c", "d"]))
            .unwrap_err();

        let PlinthError::Conflict { pairs } = err else {
            panic!("expected conflict error");
        };
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "b".to_string()),
                ("a".to_string(), "c".to_string()),
                ("b".to_string(), "d".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_conflict_when_only_one_selected() {
        let catalog = catalog(vec![unit("a").conflicts(&["b"]), unit("b")]);
        assert!(ConflictDetector::new(&catalog).check(&ids(&["a"])).is_ok());
    }

    #[test]
    fn test_conflict_error_message_lists_pairs() {
        let err = plan::conflict(vec![("B".to_string(), "C".to_string())]);
        assert_eq!(err.to_string(), "Conflicting units selected: (B, C)");
    }
}
