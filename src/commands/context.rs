//! Project and catalog resolution shared by all commands

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Result, fs as fs_error};
use crate::manifest::{self, Catalog, InMemorySource, YamlFileSource};
use crate::project::Project;

/// Catalog path meaning "read from stdin"
const STDIN_CATALOG: &str = "-";

/// Resolved global options
#[derive(Debug, Clone)]
pub struct Context {
    pub project: Project,
    catalog: Option<PathBuf>,
    pub quiet: bool,
}

impl Context {
    /// Find the project from `--project` or the current directory
    ///
    /// Searches upward for `.plinth/`. When none exists, the start directory
    /// is used as an uninitialized project.
    pub fn resolve(project: Option<PathBuf>, catalog: Option<PathBuf>, quiet: bool) -> Result<Self> {
        let start = match project {
            Some(path) => path,
            None => std::env::current_dir()
                .map_err(|e| fs_error::io_error(format!("Failed to get current directory: {e}")))?,
        };

        let project = match Project::find_from(&start) {
            Some(root) => Project::open(&root)?,
            None => Project::detached(&start),
        };

        Ok(Self {
            project,
            catalog,
            quiet,
        })
    }

    /// Create `.plinth/` if the project has not been initialized yet
    pub fn ensure_initialized(&mut self) -> Result<()> {
        if !Project::exists(&self.project.root) {
            self.project = Project::init(&self.project.root, None)?;
        }
        Ok(())
    }

    /// Explicit `--catalog`, if any
    pub fn catalog_override(&self) -> Option<&Path> {
        self.catalog.as_deref()
    }

    /// Load and validate the catalog
    pub fn load_catalog(&self) -> Result<Catalog> {
        if self.catalog_override() == Some(Path::new(STDIN_CATALOG)) {
            let mut yaml = String::new();
            std::io::stdin()
                .read_to_string(&mut yaml)
                .map_err(|e| fs_error::io_error(format!("Failed to read catalog from stdin: {e}")))?;
            // Relative copy sources resolve against the project
            let source = InMemorySource::from_yaml(&yaml)?.with_base_dir(&self.project.root);
            return manifest::load(&source);
        }

        let path = self.project.catalog_path(self.catalog_override());
        manifest::load(&YamlFileSource::new(path))
    }
}
