//! Bundled unit installers
//!
//! [`CatalogInstaller`] dispatches on the `install` declaration of each unit:
//! - `command`: run a shell line in the project ([`command`])
//! - `copy`: copy a directory tree into the project ([`copy`])
//! - nothing: a marker unit that only records that it was selected

pub mod command;
pub mod copy;

use std::collections::BTreeMap;
use std::path::Path;

use crate::engine::{InstallError, UnitInstaller};
use crate::manifest::{Catalog, CopySpec, InstallAction};

/// Installs units according to their catalog declaration
#[derive(Debug, Clone, Copy)]
pub struct CatalogInstaller<'a> {
    catalog: &'a Catalog,
}

impl<'a> CatalogInstaller<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    fn copy(&self, unit_id: &str, spec: &CopySpec, project: &Path) -> Result<(), InstallError> {
        let source = if spec.from.is_absolute() {
            spec.from.clone()
        } else {
            let base = self.catalog.base_dir().ok_or_else(|| {
                InstallError::new(format!(
                    "relative copy source '{}' needs a catalog file to resolve against",
                    spec.from.display()
                ))
            })?;
            base.join(&spec.from)
        };
        let destination = project.join(&spec.to);

        let summary = copy::copy_tree(&source, &destination)?;
        tracing::debug!(
            unit = %unit_id,
            copied = summary.copied,
            unchanged = summary.unchanged,
            "copied unit files"
        );
        Ok(())
    }
}

impl UnitInstaller for CatalogInstaller<'_> {
    fn install(
        &self,
        unit_id: &str,
        chosen_options: &BTreeMap<String, String>,
        project: &Path,
    ) -> Result<(), InstallError> {
        let unit = self
            .catalog
            .get(unit_id)
            .ok_or_else(|| InstallError::new(format!("unit '{unit_id}' is not in the catalog")))?;

        match &unit.install {
            None => {
                tracing::debug!(unit = %unit_id, "marker unit, nothing to run");
                Ok(())
            }
            Some(InstallAction::Command { command: line }) => {
                command::run(line, unit_id, chosen_options, project)
            }
            Some(InstallAction::Copy { copy: spec }) => self.copy(unit_id, spec, project),
        }
    }
}
