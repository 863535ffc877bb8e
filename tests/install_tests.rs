//! Install command integration tests

#![cfg(unix)]

mod common;

use common::{TestStore, manifest, pack};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_install_directory() {
    let store = TestStore::new();
    let id = store.install("app", &manifest("x", "1.0.0", None), &[]);

    assert_eq!(store.packages(), vec![id.clone()]);
    assert!(store.version_path(&id).join("index.js").is_file());
    assert_eq!(store.current(), None);
    assert!(
        store.root.join("package.json").symlink_metadata().is_ok(),
        "manifest link should be created"
    );
}

#[test]
fn test_install_prints_identity() {
    let store = TestStore::new();
    let dir = store.create_package("app", &manifest("x", "1.0.0", None));

    store
        .cmd()
        .arg("install")
        .arg(&dir)
        .args(["--npm", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed"))
        .stdout(predicate::str::contains("(x 1.0.0)"));
}

#[test]
fn test_install_archive_and_activate() {
    let store = TestStore::new();
    let dir = store.create_package("app", &manifest("x", "1.0.0", None));
    let tarball = store.sources.join("x-1.0.0.tgz");
    pack(&dir, &tarball);

    store
        .cmd()
        .arg("install")
        .arg(&tarball)
        .args(["--npm", "true", "--activate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[*current]"));

    let id = store.resolve("0");
    assert_eq!(store.current(), Some(id));
    assert!(!store.root.join("package.new").exists());
    assert!(!store.root.join("package.new.tar.gz").exists());

    let linked = fs::read_to_string(store.root.join("package.json")).unwrap();
    assert!(linked.contains("\"1.0.0\""));
}

#[test]
fn test_newest_version_sorts_first() {
    let store = TestStore::new();
    let first = store.install("a", &manifest("x", "1.0.0", None), &[]);
    let second = store.install("b", &manifest("x", "1.1.0", None), &[]);

    assert_eq!(store.packages(), vec![second.clone(), first.clone()]);
    assert_eq!(store.resolve("0"), second);
    assert_eq!(store.resolve("1"), first);
}

#[test]
fn test_duplicate_identity_requires_force() {
    let store = TestStore::new();
    store.install("a", &manifest("x", "1.0.0", None), &[]);
    let dup = store.create_package("b", &manifest("x", "1.0.0", None));

    store
        .cmd()
        .arg("install")
        .arg(&dup)
        .args(["--npm", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Version with name 'x' and version '1.0.0' is already installed",
        ));
    assert_eq!(store.packages().len(), 1);

    store
        .cmd()
        .arg("install")
        .arg(&dup)
        .args(["--npm", "true", "--force"])
        .assert()
        .success();
    assert_eq!(store.packages().len(), 2);
}

#[test]
fn test_incompatible_package_is_rejected() {
    let store = TestStore::new();
    let dir = store.create_package(
        "app",
        &manifest("x", "1.0.0", Some(r#"{"compatibility": ">=99.0.0"}"#)),
    );

    store
        .cmd()
        .arg("install")
        .arg(&dir)
        .args(["--npm", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("doesn't satisfy version required"))
        .stderr(predicate::str::contains(">=99.0.0"));

    assert!(store.packages().is_empty());
}

#[test]
fn test_failing_preinstall_commits_nothing() {
    let store = TestStore::new();
    let dir = store.create_package(
        "app",
        &manifest("x", "1.0.0", Some(r#"{"hooks": {"preinstall": "exit 1"}}"#)),
    );

    store
        .cmd()
        .arg("install")
        .arg(&dir)
        .args(["--npm", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Command \"exit 1\" failed with exit code: 1",
        ));

    assert!(store.packages().is_empty());
}

#[test]
fn test_failing_hook_stderr_is_shown() {
    let store = TestStore::new();
    let dir = store.create_package(
        "app",
        &manifest(
            "x",
            "1.0.0",
            Some(r#"{"hooks": {"preinstall": "echo boom-detail >&2; exit 1"}}"#),
        ),
    );

    store
        .cmd()
        .arg("install")
        .arg(&dir)
        .args(["--npm", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed with exit code: 1"))
        .stderr(predicate::str::contains("boom-detail"));
}

#[test]
fn test_disabled_hook_has_no_side_effect() {
    let store = TestStore::new();
    let sentinel = store.temp.path().join("sentinel");
    let hooks = format!(r#"{{"hooks": {{"postinstall": "touch {}"}}}}"#, sentinel.display());

    store.install(
        "app",
        &manifest("x", "1.0.0", Some(&hooks)),
        &["--disable-hook", "postinstall"],
    );

    assert!(!sentinel.exists());
    assert_eq!(store.packages().len(), 1);
}

#[test]
fn test_disabled_hook_from_config() {
    let store = TestStore::new();
    fs::write(store.config_path(), "disabled_hooks: [postinstall]\n").unwrap();
    let sentinel = store.temp.path().join("sentinel");
    let hooks = format!(r#"{{"hooks": {{"postinstall": "touch {}"}}}}"#, sentinel.display());

    store.install("app", &manifest("x", "1.0.0", Some(&hooks)), &[]);

    assert!(!sentinel.exists());
}

#[test]
fn test_dependency_manager_invocations() {
    let store = TestStore::new();
    let log = store.temp.path().join("npm.log");
    let dir = store.create_package("app", &manifest("x", "1.0.0", None));

    store
        .cmd()
        .arg("install")
        .arg(&dir)
        .args(["--npm", &format!("echo >> {}", log.display())])
        .assert()
        .success();

    let calls = fs::read_to_string(&log).unwrap();
    assert_eq!(
        calls.lines().collect::<Vec<_>>(),
        vec!["install --production", "prune --production"]
    );
}

#[test]
fn test_ci_mode_without_lock_artifact() {
    let store = TestStore::new();
    let dir = store.create_package("app", &manifest("x", "1.0.0", None));

    store
        .cmd()
        .arg("install")
        .arg(&dir)
        .args(["--npm", "true", "--sync-mode", "ci"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("package-lock.json"));

    assert!(store.packages().is_empty());
}

#[test]
fn test_missing_source() {
    let store = TestStore::new();

    store
        .cmd()
        .args(["install", "/nonexistent/app.tgz", "--npm", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
