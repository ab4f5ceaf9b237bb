//! Plugin catalog loading
//!
//! The catalog is loaded once per process from a [`CatalogSource`], validated,
//! and then only read. Loading turns raw [`UnitDeclaration`]s into [`Unit`]s:
//!
//! - requirement and conflict lists become sets
//! - option defaults are resolved (first value when omitted)
//! - every reference, option and install action is validated
//!
//! ## Usage
//!
//! ```rust,ignore
//! let catalog = manifest::load(&YamlFileSource::new("plinth.catalog.yaml"))?;
//! let python = catalog.unit("languages/python")?;
//! ```

pub mod document;
pub mod source;
pub mod unit;
pub mod validation;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{PlinthError, Result};

pub use document::{CatalogDocument, OptionDeclaration, UnitDeclaration};
pub use source::{CatalogSource, InMemorySource, YamlFileSource};
pub use unit::{Category, CopySpec, InstallAction, Status, Unit, UnitOption};

/// Validated, immutable collection of units keyed by id
#[derive(Debug, Clone)]
pub struct Catalog {
    name: Option<String>,
    units: BTreeMap<String, Unit>,
    base_dir: Option<PathBuf>,
    digest: String,
    origin: String,
}

impl Catalog {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Look up a unit
    pub fn get(&self, id: &str) -> Option<&Unit> {
        self.units.get(id)
    }

    /// Look up a unit, failing with `UnknownUnit`
    pub fn unit(&self, id: &str) -> Result<&Unit> {
        self.units.get(id).ok_or_else(|| PlinthError::UnknownUnit {
            id: id.to_string(),
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.units.contains_key(id)
    }

    /// All units in ascending id order
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Directory relative copy sources are resolved against
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// BLAKE3 digest of the catalog source
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

/// Load and validate a catalog
///
/// # Errors
///
/// Returns a catalog error when the source cannot be read, or when any unit
/// fails validation (duplicate ids, unknown references, self dependencies,
/// invalid options, conflicts with own requirements, bad install actions).
pub fn load(source: &dyn CatalogSource) -> Result<Catalog> {
    let raw = source.read()?;

    let mut units = BTreeMap::new();
    for declaration in raw.document.units {
        if units.contains_key(&declaration.id) {
            return Err(PlinthError::DuplicateUnit { id: declaration.id });
        }
        let unit = build_unit(declaration)?;
        units.insert(unit.id.clone(), unit);
    }

    validation::validate_units(&units)?;

    tracing::debug!(
        origin = %raw.origin,
        units = units.len(),
        digest = %raw.digest,
        "catalog loaded"
    );

    Ok(Catalog {
        name: raw.document.name,
        units,
        base_dir: raw.base_dir,
        digest: raw.digest,
        origin: raw.origin,
    })
}

fn build_unit(declaration: UnitDeclaration) -> Result<Unit> {
    if declaration.id.trim().is_empty() {
        return Err(PlinthError::CatalogParseFailed {
            path: "<catalog>".to_string(),
            reason: "unit with empty id".to_string(),
        });
    }

    let mut options = BTreeMap::new();
    for (name, decl) in declaration.options {
        let default = match decl.default {
            Some(default) => default,
            None => decl.values.first().cloned().ok_or_else(|| {
                crate::error::catalog::invalid_option(
                    &declaration.id,
                    &name,
                    "no allowed values declared",
                )
            })?,
        };
        options.insert(
            name,
            UnitOption {
                values: decl.values,
                default,
            },
        );
    }

    Ok(Unit {
        id: declaration.id,
        category: declaration.category,
        status: declaration.status,
        description: declaration.description,
        requires: declaration.requires.into_iter().collect(),
        conflicts: declaration.conflicts.into_iter().collect(),
        options,
        install: declaration.install,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Load a catalog from declarations, panicking on validation errors
    pub fn catalog(units: Vec<UnitDeclaration>) -> Catalog {
        try_catalog(units).expect("test catalog should be valid")
    }

    pub fn try_catalog(units: Vec<UnitDeclaration>) -> Result<Catalog> {
        load(&InMemorySource::new(CatalogDocument { name: None, units }))
    }

    pub fn unit(id: &str) -> UnitDeclaration {
        UnitDeclaration::new(id, Category::Standard)
    }
}
