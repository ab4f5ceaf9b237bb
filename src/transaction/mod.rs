//! Transaction support for file installers
//!
//! Installers that write into the project record every change here, so a
//! failure part way through leaves the project as it was before the unit
//! started.
//!
//! ## Usage
//!
//! ```ignore
//! let mut transaction = Transaction::new();
//! transaction.backup_file(&existing)?;
//! fs::write(&existing, new_content)?;
//! transaction.track_file_created(&fresh);
//!
//! // On success:
//! transaction.commit();
//!
//! // On error (automatic via Drop if not committed):
//! // rollback happens automatically
//! ```

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, fs as fs_error};

/// Original content of a file overwritten during the transaction
#[derive(Debug, Clone)]
struct FileBackup {
    path: PathBuf,
    content: Vec<u8>,
}

/// A set of file system changes that is undone unless committed
#[derive(Debug, Default)]
pub struct Transaction {
    /// Files created during this transaction
    created_files: HashSet<PathBuf>,

    /// Files overwritten during this transaction (with original content)
    modified_files: Vec<FileBackup>,

    /// Directories created during this transaction
    created_dirs: HashSet<PathBuf>,

    committed: bool,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the current content of `path` before it is overwritten
    ///
    /// Backing up the same file twice keeps the first (original) content.
    pub fn backup_file(&mut self, path: &Path) -> Result<()> {
        if self.modified_files.iter().any(|b| b.path == path) || self.created_files.contains(path)
        {
            return Ok(());
        }
        let content = fs::read(path).map_err(|e| fs_error::read_failed(path, e))?;
        self.modified_files.push(FileBackup {
            path: path.to_path_buf(),
            content,
        });
        Ok(())
    }

    /// Track a file that was created during this transaction
    pub fn track_file_created(&mut self, path: impl Into<PathBuf>) {
        self.created_files.insert(path.into());
    }

    /// Track a directory that was created during this transaction
    pub fn track_dir_created(&mut self, path: impl Into<PathBuf>) {
        self.created_dirs.insert(path.into());
    }

    /// Number of tracked changes
    pub fn len(&self) -> usize {
        self.created_files.len() + self.modified_files.len() + self.created_dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Commit the transaction (prevent rollback)
    pub fn commit(mut self) {
        self.committed = true;
    }

    /// Undo every tracked change
    ///
    /// Best effort: individual failures are logged and the remaining changes
    /// are still undone.
    pub fn rollback(&mut self) {
        if self.committed {
            return;
        }

        for path in &self.created_files {
            if path.exists() {
                if let Err(e) = fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove file during rollback");
                }
            }
        }

        for backup in &self.modified_files {
            if let Err(e) = fs::write(&backup.path, &backup.content) {
                tracing::warn!(path = %backup.path.display(), error = %e, "failed to restore file during rollback");
            }
        }

        // Deepest first so nested directories empty out before their parents
        let mut dirs: Vec<_> = self.created_dirs.iter().collect();
        dirs.sort_by_key(|p| std::cmp::Reverse(p.components().count()));
        for path in dirs {
            let empty = fs::read_dir(path)
                .map(|mut d| d.next().is_none())
                .unwrap_or(false);
            if empty {
                let _ = fs::remove_dir(path);
            }
        }

        tracing::debug!(changes = self.len(), "rolled back transaction");
        self.committed = true;
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.committed {
            self.rollback();
        }
    }
}
