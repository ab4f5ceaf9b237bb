//! Common test utilities for Plinth integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Catalog file name the binary looks for by default
pub const CATALOG_FILE: &str = "plinth.catalog.yaml";

/// Command for the real plinth binary, isolated from the developer's env
#[allow(deprecated)]
pub fn plinth_cmd() -> Command {
    let mut cmd = Command::cargo_bin("plinth").expect("plinth binary should be built");
    cmd.env_remove("PLINTH_PROJECT");
    cmd.env_remove("PLINTH_CATALOG");
    cmd.env_remove("PLINTH_LOG");
    cmd
}

/// A temporary project directory for integration tests
pub struct TestProject {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create an empty, uninitialized project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a project with `.plinth/` and the given catalog
    pub fn with_catalog(yaml: &str) -> Self {
        let project = Self::new();
        project.write_catalog(yaml);
        std::fs::create_dir_all(project.path.join(".plinth"))
            .expect("Failed to create .plinth directory");
        project
    }

    /// Command running in the project directory
    pub fn cmd(&self) -> Command {
        let mut cmd = plinth_cmd();
        cmd.current_dir(&self.path);
        cmd
    }

    pub fn write_catalog(&self, yaml: &str) {
        self.write_file(CATALOG_FILE, yaml);
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Parsed `.plinth/state.json`
    pub fn state(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_file(".plinth/state.json")).expect("state.json is JSON")
    }

    /// Recorded state of one unit, if any
    pub fn record_state(&self, unit: &str) -> Option<String> {
        if !self.file_exists(".plinth/state.json") {
            return None;
        }
        self.state()["records"]
            .as_array()?
            .iter()
            .find(|r| r["unit_id"] == unit)
            .and_then(|r| r["state"].as_str())
            .map(str::to_string)
    }

    /// Error detail of one unit's record, if any
    pub fn record_error(&self, unit: &str) -> Option<String> {
        self.state()["records"]
            .as_array()?
            .iter()
            .find(|r| r["unit_id"] == unit)
            .and_then(|r| r["error_detail"].as_str())
            .map(str::to_string)
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = TestProject::new();
        assert!(project.path.exists());
        assert!(!project.file_exists(".plinth"));
    }

    #[test]
    fn test_project_file_operations() {
        let project = TestProject::with_catalog("units: []\n");
        project.write_file("nested/file.txt", "content");
        assert_eq!(project.read_file("nested/file.txt"), "content");
        assert!(project.file_exists(CATALOG_FILE));
        assert_eq!(project.record_state("anything"), None);
    }
}
