//! Raw catalog declarations as written in the catalog file
//!
//! ```yaml
//! units:
//!   - id: languages/python
//!     category: language
//!     status: stable
//!     requires: [foundation/core]
//!     conflicts: []
//!     options:
//!       linter:
//!         values: [ruff, pylint, flake8]
//!         default: ruff
//!     install:
//!       command: make python-setup
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::manifest::unit::{Category, InstallAction, Status};

/// Top-level catalog document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    /// Catalog name (display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub units: Vec<UnitDeclaration>,
}

/// One unit as declared, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDeclaration {
    pub id: String,
    pub category: Category,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, OptionDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<InstallAction>,
}

#[cfg(test)]
impl UnitDeclaration {
    /// Minimal stable declaration for building catalogs in tests
    pub fn new(id: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            category,
            status: Status::Stable,
            description: None,
            requires: Vec::new(),
            conflicts: Vec::new(),
            options: BTreeMap::new(),
            install: None,
        }
    }

    #[must_use]
    pub fn requires(mut self, ids: &[&str]) -> Self {
        self.requires = ids.iter().map(|id| (*id).to_string()).collect();
        self
    }

    #[must_use]
    pub fn conflicts(mut self, ids: &[&str]) -> Self {
        self.conflicts = ids.iter().map(|id| (*id).to_string()).collect();
        self
    }

    #[must_use]
    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn option(mut self, name: &str, values: &[&str], default: Option<&str>) -> Self {
        self.options.insert(
            name.to_string(),
            OptionDeclaration {
                values: values.iter().map(|v| (*v).to_string()).collect(),
                default: default.map(str::to_string),
            },
        );
        self
    }
}

/// Allowed values of an option and its default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionDeclaration {
    pub values: Vec<String>,
    /// Falls back to the first listed value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}
