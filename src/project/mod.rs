//! Project management for Plinth
//!
//! This module handles:
//! - Project detection and initialization
//! - Resolving the catalog path from flags, config and defaults
//! - Opening the install state, locked or read-only
//!
//! ## Project Structure
//!
//! ```text
//! .plinth/
//! ├── config.yaml   # Project configuration
//! ├── state.json    # Install records
//! ├── .lock         # Advisory lock file
//! └── .gitignore    # Ignores the lock file
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::error::{PlinthError, Result, fs as fs_error};
use crate::state::{InstallStateStore, JsonFileBackend, MemoryBackend, StateBackend, StateLock};

/// Plinth project directory name
pub const PROJECT_DIR: &str = ".plinth";

/// Project config filename
pub const CONFIG_FILE: &str = "config.yaml";

/// Install state filename
pub const STATE_FILE: &str = "state.json";

/// Catalog used when neither flags nor config name one
pub const DEFAULT_CATALOG: &str = "plinth.catalog.yaml";

/// Represents a Plinth project
#[derive(Debug, Clone)]
pub struct Project {
    /// Root directory of the project (where .plinth is located)
    pub root: PathBuf,

    /// Path to the .plinth directory
    pub plinth_dir: PathBuf,

    /// Project configuration (config.yaml)
    pub config: ProjectConfig,
}

impl Project {
    /// Detect if a project exists at the given path
    pub fn exists(root: &Path) -> bool {
        root.join(PROJECT_DIR).is_dir()
    }

    /// Find a project by searching upward from the given path
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if Self::exists(&current) {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Open an existing project
    pub fn open(root: &Path) -> Result<Self> {
        let plinth_dir = root.join(PROJECT_DIR);

        if !plinth_dir.is_dir() {
            return Err(PlinthError::ProjectNotFound {
                path: root.display().to_string(),
            });
        }

        let config = ProjectConfig::load(&plinth_dir.join(CONFIG_FILE))?;

        Ok(Self {
            root: root.to_path_buf(),
            plinth_dir,
            config,
        })
    }

    /// A project at `root` that has not been initialized
    ///
    /// Read-only commands work against it: config is the default and install
    /// state is empty.
    pub fn detached(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            plinth_dir: root.join(PROJECT_DIR),
            config: ProjectConfig::default(),
        }
    }

    /// Initialize a new project at the given path
    ///
    /// Existing configuration is kept; only `catalog` is updated when given.
    pub fn init(root: &Path, catalog: Option<PathBuf>) -> Result<Self> {
        let plinth_dir = root.join(PROJECT_DIR);
        fs::create_dir_all(&plinth_dir).map_err(|e| fs_error::write_failed(&plinth_dir, e))?;

        // Create .gitignore to exclude lock file
        let gitignore_path = plinth_dir.join(".gitignore");
        fs::write(&gitignore_path, ".lock\n")
            .map_err(|e| fs_error::write_failed(&gitignore_path, e))?;

        let config_path = plinth_dir.join(CONFIG_FILE);
        let mut config = ProjectConfig::load(&config_path)?;
        if catalog.is_some() {
            config.catalog = catalog;
        }
        config.save(&config_path)?;

        tracing::debug!(root = %root.display(), "initialized project");
        Ok(Self {
            root: root.to_path_buf(),
            plinth_dir,
            config,
        })
    }

    pub fn state_path(&self) -> PathBuf {
        self.plinth_dir.join(STATE_FILE)
    }

    /// Catalog to load: explicit path, then config, then the default name
    pub fn catalog_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.config.catalog_path(&self.root))
            .unwrap_or_else(|| self.root.join(DEFAULT_CATALOG))
    }

    /// Acquire the project lock, failing fast if another run holds it
    pub fn lock(&self) -> Result<StateLock> {
        StateLock::acquire(&self.plinth_dir)
    }

    /// Open a read-only copy of the install state without taking the lock
    ///
    /// Mutations on the returned store stay in memory.
    pub fn read_state(&self) -> Result<InstallStateStore> {
        let snapshot = JsonFileBackend::new(self.state_path()).load()?;
        InstallStateStore::open(Box::new(MemoryBackend::with_snapshot(snapshot)))
    }

    /// Take the lock, then open install state for writing
    pub fn open_state(&self) -> Result<InstallStateStore> {
        let lock = self.lock()?;
        InstallStateStore::open_locked(Box::new(JsonFileBackend::new(self.state_path())), lock)
    }
}
