//! Common test utilities for rollout integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway store plus a place for package sources
pub struct TestStore {
    /// Temporary directory holding everything below
    pub temp: TempDir,
    /// Store root passed to every command
    pub root: PathBuf,
    /// Directory where source packages are created
    pub sources: PathBuf,
}

impl TestStore {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().join("root");
        let sources = temp.path().join("sources");
        fs::create_dir_all(&sources).expect("Failed to create sources directory");
        Self {
            temp,
            root,
            sources,
        }
    }

    /// Config file location given to the binary; absent unless written
    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join("config.yaml")
    }

    /// Command for the rollout binary, isolated from the user's config
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("rollout").expect("Failed to find rollout binary");
        cmd.env("ROLLOUT_ROOT", &self.root)
            .env("ROLLOUT_CONFIG", self.config_path())
            .env_remove("ROLLOUT_LOG")
            .env_remove("ROLLOUT_AUTH");
        cmd
    }

    /// Create a package directory with a manifest and an entry file
    pub fn create_package(&self, name: &str, manifest: &str) -> PathBuf {
        let dir = self.sources.join(name);
        fs::create_dir_all(&dir).expect("Failed to create package directory");
        fs::write(dir.join("package.json"), manifest).expect("Failed to write package.json");
        fs::write(dir.join("index.js"), "module.exports = {};\n").expect("Failed to write index.js");
        dir
    }

    /// Install a package with a no-op dependency manager and return its id
    pub fn install(&self, name: &str, manifest: &str, extra: &[&str]) -> String {
        let dir = self.create_package(name, manifest);
        self.cmd()
            .arg("install")
            .arg(&dir)
            .args(["--npm", "true"])
            .args(extra)
            .assert()
            .success();
        self.resolve("0")
    }

    /// Id a version reference resolves to
    pub fn resolve(&self, target: &str) -> String {
        let output = self
            .cmd()
            .args(["resolve", target])
            .output()
            .expect("Failed to run rollout resolve");
        assert!(output.status.success(), "resolve {target} failed");
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Installed version ids, newest first, read straight from disk
    pub fn packages(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.root.join("packages")) else {
            return Vec::new();
        };
        let mut ids: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        ids.sort_unstable_by(|a, b| b.cmp(a));
        ids
    }

    /// Id the current pointer names, if any
    pub fn current(&self) -> Option<String> {
        fs::read_link(self.root.join("package"))
            .ok()
            .and_then(|target| target.file_name().map(|n| n.to_string_lossy().into_owned()))
    }

    /// Path of an installed version
    pub fn version_path(&self, id: &str) -> PathBuf {
        self.root.join("packages").join(id)
    }
}

/// Manifest with a name, a version and optional `rollout` section
pub fn manifest(name: &str, version: &str, rollout: Option<&str>) -> String {
    match rollout {
        Some(section) => {
            format!(r#"{{"name": "{name}", "version": "{version}", "rollout": {section}}}"#)
        }
        None => format!(r#"{{"name": "{name}", "version": "{version}"}}"#),
    }
}

/// Pack a directory into an npm-pack style `.tar.gz`
pub fn pack(src: &Path, dest: &Path) {
    let file = fs::File::create(dest).expect("Failed to create archive");
    let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder
        .append_dir_all("package", src)
        .expect("Failed to append package directory");
    builder
        .into_inner()
        .expect("Failed to finish tar stream")
        .finish()
        .expect("Failed to finish gzip stream");
}
