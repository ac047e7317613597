//! CLI surface tests: help, version, completions and init

mod common;

use common::{TestProject, registrar_cmd};
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    registrar_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("enable"))
        .stdout(predicate::str::contains("install"));
}

#[test]
fn test_version_command() {
    registrar_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "registrar {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_completions_bash() {
    registrar_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("registrar"));
}

#[test]
fn test_completions_unknown_shell() {
    registrar_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell: tcsh"));
}

#[test]
fn test_init_creates_default_config() {
    let project = TestProject::empty();

    project
        .cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("registrar.yaml"));

    let config = project.read_file("registrar.yaml");
    assert!(config.contains("packages_dir: modules"));
    assert!(config.contains("base_import: from app.extensions import db"));
}

#[test]
fn test_init_twice_requires_force() {
    let project = TestProject::new();

    project
        .cmd()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration already exists"));

    project.cmd().args(["init", "--force"]).assert().success();
}

#[test]
fn test_init_with_project_flag() {
    let project = TestProject::empty();
    let target = project.path.join("app");

    project
        .cmd()
        .arg("init")
        .arg("--project")
        .arg(&target)
        .assert()
        .success();

    assert!(project.file_exists("app/registrar.yaml"));
}

#[test]
fn test_project_from_env() {
    let project = TestProject::new();
    let elsewhere = TestProject::empty();

    registrar_cmd()
        .current_dir(&elsewhere.path)
        .env("REGISTRAR_PROJECT", &project.path)
        .arg("sync")
        .assert()
        .success();

    assert!(project.file_exists(common::REGISTRY));
}

#[test]
fn test_invalid_config_is_reported() {
    let project = TestProject::empty();
    project.write_file("registrar.yaml", "base_symbol: \"not an identifier\"\n");

    project
        .cmd()
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_command_outside_project_fails() {
    let project = TestProject::empty();

    project
        .cmd()
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project configuration not found"));
}

#[test]
fn test_project_found_from_subdirectory() {
    let project = TestProject::new();
    project.write_file("src/modules/.keep", "");

    registrar_cmd()
        .current_dir(project.path.join("src/modules"))
        .arg("sync")
        .assert()
        .success();

    assert!(project.file_exists(common::REGISTRY));
}
