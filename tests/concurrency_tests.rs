//! Project lock tests
//!
//! The test process holds `.plinth/.lock` while the binary runs, standing in
//! for a second installation in progress.

mod common;

use common::TestProject;
use fslock::LockFile;
use predicates::prelude::*;

const CATALOG: &str = r"
units:
  - id: base
    category: foundation
";

fn hold_lock(project: &TestProject) -> LockFile {
    let mut lock = LockFile::open(&project.path.join(".plinth/.lock")).expect("open lock file");
    assert!(lock.try_lock().expect("try lock"), "lock should be free");
    lock
}

#[test]
fn test_install_fails_fast_while_locked() {
    let project = TestProject::with_catalog(CATALOG);
    let _lock = hold_lock(&project);

    project
        .cmd()
        .args(["install", "base", "--yes"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Another installation is running"));

    assert!(!project.file_exists(".plinth/state.json"));
}

#[test]
fn test_reset_fails_while_locked() {
    let project = TestProject::with_catalog(CATALOG);
    let _lock = hold_lock(&project);

    project
        .cmd()
        .args(["reset", "base", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Another installation is running"));
}

#[test]
fn test_read_only_commands_ignore_lock() {
    let project = TestProject::with_catalog(CATALOG);
    let _lock = hold_lock(&project);

    project.cmd().arg("status").assert().success();
    project.cmd().args(["plan", "base"]).assert().success();
    project.cmd().arg("list").assert().success();
}

#[test]
fn test_lock_released_after_run() {
    let project = TestProject::with_catalog(CATALOG);

    project.cmd().args(["install", "base"]).assert().success();

    let _lock = hold_lock(&project);
    assert_eq!(project.record_state("base").as_deref(), Some("completed"));
}
