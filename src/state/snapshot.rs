//! Point-in-time view of a project's install records

use std::collections::BTreeMap;

use crate::state::record::{InstallRecord, InstallState};

/// All records of one project, keyed by unit id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSnapshot {
    pub(crate) records: BTreeMap<String, InstallRecord>,
    pub(crate) catalog_digest: Option<String>,
}

impl StateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, unit_id: &str) -> Option<&InstallRecord> {
        self.records.get(unit_id)
    }

    pub fn state_of(&self, unit_id: &str) -> Option<InstallState> {
        self.records.get(unit_id).map(|r| r.state)
    }

    pub fn is_completed(&self, unit_id: &str) -> bool {
        self.state_of(unit_id) == Some(InstallState::Completed)
    }

    /// Ids of completed units, ascending
    pub fn completed_ids(&self) -> impl Iterator<Item = &String> {
        self.records
            .values()
            .filter(|r| r.state == InstallState::Completed)
            .map(|r| &r.unit_id)
    }

    /// Records in ascending unit id order
    pub fn records(&self) -> impl Iterator<Item = &InstallRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count(&self, state: InstallState) -> usize {
        self.records.values().filter(|r| r.state == state).count()
    }

    /// Digest of the catalog the records were last written against
    pub fn catalog_digest(&self) -> Option<&str> {
        self.catalog_digest.as_deref()
    }

    /// Insert or replace a record
    pub fn insert(&mut self, record: InstallRecord) {
        self.records.insert(record.unit_id.clone(), record);
    }
}
