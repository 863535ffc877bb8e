//! Gzipped tarball extraction

use std::fs::File;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

use crate::error::{self, Result};

/// Extract the `.tar.gz` at `archive` into `dest`
///
/// Entries that would land outside `dest` are skipped by `tar`.
pub fn extract(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| error::fs::read_failed(archive, &e))?;
    let mut tarball = Archive::new(GzDecoder::new(file));
    tarball.set_preserve_permissions(true);

    tarball.unpack(dest).map_err(|e| {
        error::source::invalid(
            archive.display().to_string(),
            format!("failed to extract archive: {e}"),
        )
    })
}
