//! Plan command integration tests
//!
//! Planning never writes to the project; these tests also check that.

mod common;

use common::TestProject;
use predicates::prelude::*;

const CATALOG: &str = r"
units:
  - id: a
    category: foundation
  - id: b
    category: standard
    requires: [a]
  - id: c
    category: standard
    requires: [a]
    conflicts: [b]
  - id: py
    category: language
    requires: [a]
    options:
      linter:
        values: [ruff, flake8]
        default: ruff
  - id: loop-x
    category: standard
    requires: [loop-y]
  - id: loop-y
    category: standard
    requires: [loop-x]
";

fn plan_json(project: &TestProject, args: &[&str]) -> serde_json::Value {
    let output = project
        .cmd()
        .arg("plan")
        .args(args)
        .arg("--json")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "plan failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_plan_orders_requirements_first() {
    let project = TestProject::with_catalog(CATALOG);

    let plan = plan_json(&project, &["py"]);
    let ids: Vec<&str> = plan["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["unit_id"].as_str().unwrap())
        .collect();

    assert_eq!(ids, vec!["a", "py"]);
    assert_eq!(plan["entries"][0]["auto_included"], true);
    assert_eq!(plan["entries"][1]["chosen_options"]["linter"], "ruff");
}

#[test]
fn test_plan_is_byte_identical_across_runs() {
    let project = TestProject::with_catalog(CATALOG);

    let first = project.cmd().args(["plan", "py", "b", "--json"]).output().unwrap();
    let second = project.cmd().args(["plan", "b", "py", "--json"]).output().unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_plan_option_override() {
    let project = TestProject::with_catalog(CATALOG);

    let plan = plan_json(&project, &["py", "-o", "py:linter=flake8"]);
    assert_eq!(plan["entries"][1]["chosen_options"]["linter"], "flake8");
}

#[test]
fn test_plan_rejects_disallowed_option_value() {
    let project = TestProject::with_catalog(CATALOG);

    project
        .cmd()
        .args(["plan", "py", "-o", "py:linter=pylint"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pylint"))
        .stderr(predicate::str::contains("ruff, flake8"));
}

#[test]
fn test_plan_rejects_malformed_option() {
    let project = TestProject::with_catalog(CATALOG);

    project
        .cmd()
        .args(["plan", "py", "-o", "linter=ruff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid option 'linter=ruff'"));
}

#[test]
fn test_plan_conflict_names_pair() {
    let project = TestProject::with_catalog(CATALOG);

    project
        .cmd()
        .args(["plan", "b", "c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Conflicting units selected: (b, c)"));
}

#[test]
fn test_plan_cycle_names_path() {
    let project = TestProject::with_catalog(CATALOG);

    project
        .cmd()
        .args(["plan", "loop-x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loop-x -> loop-y -> loop-x"));
}

#[test]
fn test_plan_uses_config_units() {
    let project = TestProject::with_catalog(CATALOG);
    project.write_file(".plinth/config.yaml", "units: [b]\n");

    let plan = plan_json(&project, &[]);
    assert_eq!(plan["entries"].as_array().unwrap().len(), 2);
}

#[test]
fn test_plan_without_selection() {
    let project = TestProject::with_catalog(CATALOG);

    project
        .cmd()
        .arg("plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No units selected"));
}

#[test]
fn test_plan_writes_nothing() {
    let project = TestProject::with_catalog(CATALOG);

    project.cmd().args(["plan", "py"]).assert().success();

    assert!(!project.file_exists(".plinth/state.json"));
}
