use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn pesto_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pesto").unwrap();
    cmd.env("PESTO_HOME", home).env_remove("RUST_LOG");
    cmd
}

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("pesto.json"),
        r#"{"name": "app", "deps": [{"path": "rules_local"}]}"#,
    )
    .unwrap();
    fs::create_dir(tmp.path().join("rules_local")).unwrap();
    fs::write(
        tmp.path().join("rules_local").join("pesto.json"),
        r#"{"name": "rules_local", "initializer": {"path": "@rules_local//:init.bzl", "method": "setup"}}"#,
    )
    .unwrap();
    tmp
}

#[test]
fn test_generates_files_in_current_directory() {
    let tmp = project();

    pesto_cmd(tmp.path())
        .current_dir(tmp.path())
        .arg("pesto.json")
        .assert()
        .success()
        .stderr(predicate::str::contains("Resolved"));

    let load = fs::read_to_string(tmp.path().join("load.bzl")).unwrap();
    assert!(load.starts_with("# This file is generated. Do not modify."));
    assert!(load.contains(r#"local_repository(name = "rules_local", path = "rules_local")"#));
    let init = fs::read_to_string(tmp.path().join("init.bzl")).unwrap();
    assert!(init.contains("    setup()"));
}

#[test]
fn test_out_dir_option() {
    let tmp = project();
    let out = tmp.path().join("generated");

    pesto_cmd(tmp.path())
        .arg(tmp.path().join("pesto.json"))
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("load.bzl").is_file());
    assert!(out.join("init.bzl").is_file());
}

#[test]
fn test_dry_run_prints_to_stdout() {
    let tmp = project();

    pesto_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["pesto.json", "--dry-run", "--tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("def pesto_load():"))
        .stdout(predicate::str::contains("def pesto_init():"))
        .stdout(predicate::str::contains("rules_local path rules_local => local"));

    assert!(!tmp.path().join("load.bzl").exists());
}

#[test]
fn test_config_renames_outputs() {
    let tmp = project();
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.toml"),
        "[output]\nload-file = \"deps.bzl\"\n",
    )
    .unwrap();

    pesto_cmd(home.path())
        .current_dir(tmp.path())
        .arg("pesto.json")
        .assert()
        .success();

    assert!(tmp.path().join("deps.bzl").is_file());
    assert!(tmp.path().join("init.bzl").is_file());
}

#[test]
fn test_missing_manifest_fails() {
    let tmp = TempDir::new().unwrap();

    pesto_cmd(tmp.path())
        .current_dir(tmp.path())
        .arg("pesto.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No manifest found"));
}

#[test]
fn test_invalid_manifest_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("pesto.json"), r#"{"deps": []}"#).unwrap();

    pesto_cmd(tmp.path())
        .current_dir(tmp.path())
        .arg("pesto.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Manifest error"));
}

#[test]
fn test_requires_manifest_argument() {
    let tmp = TempDir::new().unwrap();

    pesto_cmd(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("MANIFEST"));
}
