//! Staged extraction that publishes the destination only on success.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::ArchiveError;
use crate::ExtractionReport;
use crate::Result;
use crate::extraction::ExtractionEngine;
use crate::types::DestDir;

const STAGING_PREFIX: &str = ".ziparch-staging-";

/// Extracts into a staging directory next to `dest`, then renames it into
/// place.
///
/// On any failure the staging directory is removed and `dest` is left as it
/// was. `dest` must not exist or must be an empty directory, and must be
/// strictly inside the engine's boundary so its parent can hold the staging
/// directory.
///
/// # Errors
///
/// Returns the same errors as [`ExtractionEngine::extract`], plus:
/// - `InvalidConfig` if `dest` is the boundary root itself
/// - `Io` with kind `AlreadyExists` if `dest` is a file or a non-empty
///   directory
pub fn extract_atomic(
    engine: &ExtractionEngine<'_>,
    archive_path: &Path,
    dest: &Path,
) -> Result<ExtractionReport> {
    let final_dest = engine.prepare(archive_path, dest)?;
    let parent = staging_parent(engine, &final_dest)?;
    ensure_vacant(final_dest.as_path())?;

    fs::create_dir_all(parent)?;
    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(parent)?;
    debug!(staging = %staging.path().display(), "staging extraction");

    let report = engine.extract(archive_path, staging.path())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(staging.path(), fs::Permissions::from_mode(0o755))?;
    }

    if final_dest.as_path().is_dir() {
        fs::remove_dir(final_dest.as_path())?;
    }
    fs::rename(staging.path(), final_dest.as_path())?;
    // the staging path no longer exists; disarm cleanup
    let _ = staging.keep();

    debug!(dest = %final_dest.as_path().display(), "committed staged extraction");
    Ok(report)
}

fn staging_parent<'d>(engine: &ExtractionEngine<'_>, dest: &'d DestDir) -> Result<&'d Path> {
    let parent = dest.as_path().parent();
    match parent {
        Some(parent) if dest.as_path() != engine.boundary().as_path() => Ok(parent),
        _ => Err(ArchiveError::InvalidConfig {
            reason: format!(
                "atomic extraction needs a destination below {}",
                engine.boundary().as_path().display()
            ),
        }),
    }
}

fn ensure_vacant(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            if fs::read_dir(path)?.next().is_some() {
                return Err(occupied(path));
            }
            Ok(())
        }
        Ok(_) => Err(occupied(path)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn occupied(path: &Path) -> ArchiveError {
    ArchiveError::Io(std::io::Error::new(
        ErrorKind::AlreadyExists,
        format!("destination is not empty: {}", path.display()),
    ))
}
