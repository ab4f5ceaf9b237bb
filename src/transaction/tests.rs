//! Tests for transaction support

use super::*;
use tempfile::TempDir;

#[test]
fn test_transaction_commit_keeps_changes() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("created.txt");

    let mut transaction = Transaction::new();
    fs::write(&file, "content").unwrap();
    transaction.track_file_created(&file);
    transaction.commit();

    assert!(file.exists());
}

#[test]
fn test_transaction_rollback_created_files() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("created.txt");

    {
        let mut transaction = Transaction::new();
        fs::write(&file, "content").unwrap();
        transaction.track_file_created(&file);
        // Dropped without commit
    }

    assert!(!file.exists());
}

#[test]
fn test_transaction_restores_overwritten_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("settings.toml");
    fs::write(&file, "original").unwrap();

    {
        let mut transaction = Transaction::new();
        transaction.backup_file(&file).unwrap();
        fs::write(&file, "first").unwrap();
        transaction.backup_file(&file).unwrap();
        fs::write(&file, "second").unwrap();
    }

    assert_eq!(fs::read_to_string(&file).unwrap(), "original");
}

#[test]
fn test_transaction_removes_created_dirs_deepest_first() {
    let temp = TempDir::new().unwrap();
    let outer = temp.path().join("outer");
    let inner = outer.join("inner");

    {
        let mut transaction = Transaction::new();
        fs::create_dir(&outer).unwrap();
        transaction.track_dir_created(&outer);
        fs::create_dir(&inner).unwrap();
        transaction.track_dir_created(&inner);
        let file = inner.join("file.txt");
        fs::write(&file, "x").unwrap();
        transaction.track_file_created(&file);
    }

    assert!(!outer.exists());
}

#[test]
fn test_transaction_keeps_non_empty_dirs() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("shared");

    {
        let mut transaction = Transaction::new();
        fs::create_dir(&dir).unwrap();
        transaction.track_dir_created(&dir);
        // Written by someone else, not tracked
        fs::write(dir.join("foreign.txt"), "keep").unwrap();
    }

    assert!(dir.join("foreign.txt").exists());
}

#[test]
fn test_backup_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    let mut transaction = Transaction::new();
    assert!(transaction.backup_file(&temp.path().join("missing")).is_err());
    assert!(transaction.is_empty());
}
