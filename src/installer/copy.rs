//! Directory copy installer
//!
//! Copies a source tree into the project. Files whose content already matches
//! are left alone, so re-running after a crash only copies what is missing.
//! Every created or overwritten path is tracked in a [`Transaction`] and
//! restored if the copy fails part way.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::engine::InstallError;
use crate::hash;
use crate::transaction::Transaction;

/// Files touched by one copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopySummary {
    pub copied: usize,
    pub unchanged: usize,
}

/// Copy everything under `source` into `destination`
pub fn copy_tree(source: &Path, destination: &Path) -> Result<CopySummary, InstallError> {
    if !source.is_dir() {
        return Err(InstallError::new(format!(
            "copy source '{}' is not a directory",
            source.display()
        )));
    }

    let mut transaction = Transaction::new();
    let mut summary = CopySummary::default();

    if !destination.exists() {
        create_dir_all_tracked(destination, &mut transaction)?;
    }

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| InstallError::new(format!("failed to walk source: {e}")))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| InstallError::new(e.to_string()))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            if !target.is_dir() {
                fs::create_dir(&target).map_err(|e| write_error(&target, &e))?;
                transaction.track_dir_created(&target);
            }
            continue;
        }

        if target.is_dir() {
            return Err(InstallError::new(format!(
                "cannot overwrite directory '{}' with a file",
                target.display()
            )));
        }

        if target.exists() {
            if hash::same_content(entry.path(), &target)? {
                summary.unchanged += 1;
                continue;
            }
            transaction.backup_file(&target)?;
        } else {
            transaction.track_file_created(&target);
        }

        fs::copy(entry.path(), &target).map_err(|e| write_error(&target, &e))?;
        summary.copied += 1;
    }

    transaction.commit();
    Ok(summary)
}

/// Create `dir` and any missing parents, tracking each one created
fn create_dir_all_tracked(dir: &Path, transaction: &mut Transaction) -> Result<(), InstallError> {
    let mut missing = Vec::new();
    let mut current = Some(dir);
    while let Some(path) = current {
        if path.exists() {
            break;
        }
        missing.push(path);
        current = path.parent();
    }

    for path in missing.into_iter().rev() {
        fs::create_dir(path).map_err(|e| write_error(path, &e))?;
        transaction.track_dir_created(path);
    }
    Ok(())
}

fn write_error(path: &Path, err: &std::io::Error) -> InstallError {
    InstallError::new(format!("failed to write '{}': {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn source_tree(root: &Path) {
        fs::create_dir_all(root.join("config")).unwrap();
        fs::write(root.join("config").join("lint.toml"), "line-length = 100\n").unwrap();
        fs::write(root.join("README.md"), "# Template\n").unwrap();
    }

    #[test]
    fn test_copy_into_empty_project() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        source_tree(src.path());

        let summary = copy_tree(src.path(), dst.path()).unwrap();

        assert_eq!(summary.copied, 2);
        assert_eq!(
            fs::read_to_string(dst.path().join("config").join("lint.toml")).unwrap(),
            "line-length = 100\n"
        );
    }

    #[test]
    fn test_rerun_skips_identical_files() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        source_tree(src.path());

        copy_tree(src.path(), dst.path()).unwrap();
        let summary = copy_tree(src.path(), dst.path()).unwrap();

        assert_eq!(
            summary,
            CopySummary {
                copied: 0,
                unchanged: 2
            }
        );
    }

    #[test]
    fn test_creates_nested_destination() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        source_tree(src.path());
        let target = dst.path().join("tools").join("lint");

        copy_tree(src.path(), &target).unwrap();
        assert!(target.join("README.md").exists());
    }

    #[test]
    fn test_failure_rolls_back_partial_copy() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("a")).unwrap();
        fs::write(src.path().join("a").join("x.txt"), "new").unwrap();
        fs::write(src.path().join("m.txt"), "replacement").unwrap();
        fs::write(src.path().join("z.txt"), "blocked").unwrap();

        fs::write(dst.path().join("m.txt"), "original").unwrap();
        // A directory where a file must go makes the copy fail after a/ and m.txt
        fs::create_dir(dst.path().join("z.txt")).unwrap();

        let err = copy_tree(src.path(), dst.path()).unwrap_err();
        assert!(err.message().contains("cannot overwrite directory"));

        assert!(!dst.path().join("a").exists());
        assert_eq!(
            fs::read_to_string(dst.path().join("m.txt")).unwrap(),
            "original"
        );
    }

    #[test]
    fn test_missing_source() {
        let dst = TempDir::new().unwrap();
        let err = copy_tree(&dst.path().join("absent"), dst.path()).unwrap_err();
        assert!(err.message().contains("is not a directory"));
    }
}
