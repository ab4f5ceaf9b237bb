//! Persistence backends for install records
//!
//! A backend reads and writes the complete record set of one project at once.
//! [`JsonFileBackend`] replaces the state file atomically (temp file in the same
//! directory, then rename), so a crash mid-write leaves either the old or the
//! new state on disk, never a torn file.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{PlinthError, Result, state};
use crate::state::record::InstallRecord;
use crate::state::snapshot::StateSnapshot;

/// Current state file format version
pub const STATE_VERSION: u32 = 1;

/// Storage for a project's records
pub trait StateBackend {
    /// Read the whole record set. A missing store is an empty snapshot.
    fn load(&self) -> Result<StateSnapshot>;

    /// Replace the whole record set atomically
    fn store(&self, snapshot: &StateSnapshot) -> Result<()>;
}

/// On-disk shape of `state.json`
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StateFile {
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    catalog_digest: Option<String>,
    #[serde(default)]
    records: Vec<InstallRecord>,
}

/// Records stored as pretty-printed JSON
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateBackend for JsonFileBackend {
    fn load(&self) -> Result<StateSnapshot> {
        if !self.path.exists() {
            return Ok(StateSnapshot::new());
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| state::read_failed(&self.path, e))?;
        let file: StateFile =
            serde_json::from_str(&content).map_err(|e| state::read_failed(&self.path, e))?;

        if file.version != STATE_VERSION {
            return Err(PlinthError::UnsupportedStateVersion {
                version: file.version,
            });
        }

        let mut records = BTreeMap::new();
        for record in file.records {
            let id = record.unit_id.clone();
            if records.insert(id.clone(), record).is_some() {
                return Err(state::read_failed(
                    &self.path,
                    format!("duplicate record for unit '{id}'"),
                ));
            }
        }

        Ok(StateSnapshot {
            records,
            catalog_digest: file.catalog_digest,
        })
    }

    fn store(&self, snapshot: &StateSnapshot) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| state::write_failed(&self.path, e))?;

        let file = StateFile {
            version: STATE_VERSION,
            catalog_digest: snapshot.catalog_digest.clone(),
            records: snapshot.records.values().cloned().collect(),
        };
        let mut json =
            serde_json::to_string_pretty(&file).map_err(|e| state::write_failed(&self.path, e))?;
        json.push('\n');

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| state::write_failed(&self.path, e))?;
        temp.write_all(json.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| state::write_failed(&self.path, e))?;
        temp.persist(&self.path)
            .map_err(|e| state::write_failed(&self.path, e.error))?;

        Ok(())
    }
}

/// Records kept in memory; clones share the same storage
///
/// Backs read-only views of on-disk state, and tests that simulate a process
/// restart by opening a second store over the same backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<StateSnapshot>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot
    pub fn with_snapshot(snapshot: StateSnapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(snapshot)),
        }
    }
}

impl StateBackend for MemoryBackend {
    fn load(&self) -> Result<StateSnapshot> {
        self.inner
            .lock()
            .map(|guard| guard.clone())
            .map_err(|e| state::read_failed(Path::new("<memory>"), e))
    }

    fn store(&self, snapshot: &StateSnapshot) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| state::write_failed(Path::new("<memory>"), e))?;
        *guard = snapshot.clone();
        Ok(())
    }
}
