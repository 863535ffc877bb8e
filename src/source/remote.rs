//! Remote package download

use std::fs::{self, File};
use std::path::Path;

use crate::error::{self, Result};

use super::Credentials;

/// Download `url` to `dest`, applying basic-auth credentials when given
///
/// Any non-success status is an error; a partially written file is removed.
pub fn download(url: &str, dest: &Path, auth: Option<&Credentials>) -> Result<()> {
    let client = reqwest::blocking::Client::new();

    let mut request = client.get(url);
    if let Some(creds) = auth {
        request = request.basic_auth(&creds.user, Some(&creds.password));
    }

    let mut response = request
        .send()
        .map_err(|e| error::source::download_failed(url, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(error::source::download_failed(
            url,
            format!("non-success response status: {status}"),
        ));
    }

    let mut file = File::create(dest).map_err(|e| error::fs::write_failed(dest, &e))?;
    if let Err(e) = response.copy_to(&mut file) {
        drop(file);
        let _ = fs::remove_file(dest);
        return Err(error::source::download_failed(url, e.to_string()));
    }

    tracing::debug!("Downloaded {} to {}", url, dest.display());
    Ok(())
}
