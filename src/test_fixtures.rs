//! Test fixtures shared by unit tests
//!
//! Helpers to build package directories and archives, serve a single
//! HTTP response, and set up an orchestrator over a throwaway store.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_package, orchestrator, quiet_install};
//!
//! #[test]
//! fn my_test() {
//!     let temp = TempDir::new().unwrap();
//!     let src = create_package(&temp.path().join("src"), r#"{"name": "x"}"#);
//!     let rollout = orchestrator(&temp);
//!     rollout.install(&src.display().to_string(), &quiet_install()).unwrap();
//! }
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

use crate::operations::{InstallOptions, Orchestrator};

/// Tool version the test orchestrator reports
pub const TOOL_VERSION: &str = "0.3.0";

/// Create a package directory with the given manifest and an entry file.
///
/// # Panics
///
/// Panics if the files cannot be written.
pub fn create_package(dir: &Path, manifest: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create package directory");
    fs::write(dir.join("package.json"), manifest).expect("Failed to write package.json");
    fs::write(dir.join("index.js"), "module.exports = {};\n").expect("Failed to write index.js");
    dir.to_path_buf()
}

/// Pack `src` into an npm-pack style `.tar.gz` at `dest`.
///
/// # Panics
///
/// Panics if the archive cannot be written.
pub fn pack(src: &Path, dest: &Path) {
    let file = File::create(dest).expect("Failed to create archive");
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    builder
        .append_dir_all("package", src)
        .expect("Failed to append package directory");
    builder
        .into_inner()
        .expect("Failed to finish tar stream")
        .finish()
        .expect("Failed to finish gzip stream");
}

/// Serve exactly one HTTP response on a local port.
///
/// When `expected_auth` is given, a request without that `Authorization`
/// header gets a 401 instead. Returns the URL and the server thread.
///
/// # Panics
///
/// Panics if the listener cannot be bound.
#[must_use]
pub fn serve_once(
    status: u16,
    body: Vec<u8>,
    expected_auth: Option<&str>,
) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    let expected = expected_auth.map(|auth| format!("authorization: {}", auth.to_lowercase()));

    let handle = thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let request = String::from_utf8_lossy(&request).to_lowercase();
        let (status, body) = match &expected {
            Some(header) if !request.contains(header.as_str()) => (401, Vec::new()),
            _ => (status, body),
        };

        let head = format!(
            "HTTP/1.1 {status} Test\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(&body);
    });

    (format!("http://{addr}/package.tgz"), handle)
}

/// Orchestrator over `<temp>/root`.
#[must_use]
pub fn orchestrator(temp: &TempDir) -> Orchestrator {
    Orchestrator::new(&temp.path().join("root"), TOOL_VERSION)
}

/// Install options that replace the dependency manager with a no-op.
#[must_use]
pub fn quiet_install() -> InstallOptions {
    InstallOptions {
        npm: "true".to_string(),
        ..InstallOptions::default()
    }
}

/// Create a source package under `<temp>/<name>` and return it as a source string.
pub fn source_package(temp: &TempDir, name: &str, manifest: &str) -> String {
    create_package(&temp.path().join(name), manifest)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_package() {
        let temp = TempDir::new().unwrap();
        let dir = create_package(&temp.path().join("pkg"), "{}");
        assert!(dir.join("package.json").is_file());
        assert!(dir.join("index.js").is_file());
    }

    #[test]
    fn test_pack_uses_package_prefix() {
        let temp = TempDir::new().unwrap();
        let dir = create_package(&temp.path().join("pkg"), "{}");
        let tarball = temp.path().join("pkg.tgz");
        pack(&dir, &tarball);

        let decoder = flate2::read::GzDecoder::new(File::open(&tarball).unwrap());
        let mut archive = tar::Archive::new(decoder);
        let names: Vec<PathBuf> = archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().into_owned())
            .collect();
        assert!(names.contains(&PathBuf::from("package/package.json")));
    }
}
