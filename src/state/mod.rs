//! Durable install progress for a target project
//!
//! This module handles:
//! - The per-unit [`InstallRecord`] state machine
//! - Persisting the record set through a [`StateBackend`]
//! - Mutual exclusion between runs via [`StateLock`]
//! - A Markdown projection of the records for humans
//!
//! Every mutation is written through to the backend before the call returns,
//! so the on-disk state is never behind what the engine has acted on.

pub mod backend;
pub mod lock;
pub mod record;
pub mod render;
pub mod snapshot;

use std::collections::BTreeMap;

use crate::error::{PlinthError, Result, state};

pub use backend::{JsonFileBackend, MemoryBackend, StateBackend};
pub use lock::StateLock;
pub use record::{InstallRecord, InstallState};
pub use snapshot::StateSnapshot;

/// Records of one project plus the backend they live in
pub struct InstallStateStore {
    backend: Box<dyn StateBackend>,
    snapshot: StateSnapshot,
    _lock: Option<StateLock>,
}

impl std::fmt::Debug for InstallStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallStateStore")
            .field("records", &self.snapshot.len())
            .field("locked", &self._lock.is_some())
            .finish()
    }
}

impl InstallStateStore {
    /// Open without a lock (read-only commands, dry runs, tests)
    pub fn open(backend: Box<dyn StateBackend>) -> Result<Self> {
        let snapshot = backend.load()?;
        Ok(Self {
            backend,
            snapshot,
            _lock: None,
        })
    }

    /// Open while holding the project lock for the lifetime of the store
    pub fn open_locked(backend: Box<dyn StateBackend>, lock: StateLock) -> Result<Self> {
        let mut store = Self::open(backend)?;
        store._lock = Some(lock);
        Ok(store)
    }

    /// Current records
    pub fn snapshot(&self) -> &StateSnapshot {
        &self.snapshot
    }

    pub fn record(&self, unit_id: &str) -> Option<&InstallRecord> {
        self.snapshot.get(unit_id)
    }

    /// Remember which catalog the records refer to; written with the next change
    pub fn set_catalog_digest(&mut self, digest: &str) {
        self.snapshot.catalog_digest = Some(digest.to_string());
    }

    /// Return records of a crashed run (`in_progress`) to `pending`
    pub fn recover_interrupted(&mut self) -> Result<Vec<String>> {
        let stale: Vec<String> = self
            .snapshot
            .records()
            .filter(|r| r.state == InstallState::InProgress)
            .map(|r| r.unit_id.clone())
            .collect();

        if stale.is_empty() {
            return Ok(stale);
        }

        let mut next = self.snapshot.clone();
        for id in &stale {
            tracing::warn!(unit = %id, "previous run was interrupted; unit will be re-attempted");
            if let Some(record) = next.records.get_mut(id) {
                record.transition(InstallState::Pending, None)?;
            }
        }
        self.commit(next)?;
        Ok(stale)
    }

    /// Ensure every planned unit has a `pending` record with its chosen options
    ///
    /// Failed and interrupted records are reset for retry. All changes are
    /// written in a single store call.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` if a planned unit is already completed.
    pub fn prepare<'a, I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a BTreeMap<String, String>)>,
    {
        let mut next = self.snapshot.clone();
        for (unit_id, options) in entries {
            match next.records.get_mut(unit_id) {
                None => next.insert(InstallRecord::pending(unit_id, options.clone())),
                Some(record) => {
                    match record.state {
                        InstallState::Pending => {}
                        InstallState::Failed | InstallState::InProgress => {
                            record.transition(InstallState::Pending, None)?;
                        }
                        InstallState::Completed => {
                            return Err(state::invalid_transition(
                                unit_id,
                                InstallState::Completed,
                                InstallState::Pending,
                            ));
                        }
                    }
                    record.chosen_options = options.clone();
                }
            }
        }
        self.commit(next)
    }

    pub fn mark_in_progress(&mut self, unit_id: &str) -> Result<()> {
        self.transition(unit_id, InstallState::InProgress, None)
    }

    /// Marking an already completed unit is a no-op
    pub fn mark_completed(&mut self, unit_id: &str) -> Result<()> {
        if self.snapshot.is_completed(unit_id) {
            return Ok(());
        }
        self.transition(unit_id, InstallState::Completed, None)
    }

    pub fn mark_failed(&mut self, unit_id: &str, detail: impl Into<String>) -> Result<()> {
        self.transition(unit_id, InstallState::Failed, Some(detail.into()))
    }

    /// Explicit retry: `failed` back to `pending` with the error cleared
    pub fn reset_failed(&mut self, unit_id: &str) -> Result<()> {
        self.transition(unit_id, InstallState::Pending, None)
    }

    fn transition(
        &mut self,
        unit_id: &str,
        to: InstallState,
        error_detail: Option<String>,
    ) -> Result<()> {
        let mut next = self.snapshot.clone();
        let record = next
            .records
            .get_mut(unit_id)
            .ok_or_else(|| PlinthError::RecordNotFound {
                unit: unit_id.to_string(),
            })?;
        record.transition(to, error_detail)?;
        self.commit(next)
    }

    /// Persist first; memory only changes once the backend accepted the write
    fn commit(&mut self, next: StateSnapshot) -> Result<()> {
        self.backend.store(&next)?;
        self.snapshot = next;
        Ok(())
    }
}
