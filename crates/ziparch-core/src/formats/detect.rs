//! Archive path validation.

use std::path::Path;

use crate::ArchiveError;
use crate::Result;

const ZIP_SUFFIX: &str = ".zip";

/// Checks that `path` ends in `.zip`, ignoring ASCII case.
///
/// The check is on the path text, so a file named `.zip` qualifies.
///
/// # Errors
///
/// Returns `ArchiveError::InvalidExtension` otherwise.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ziparch_core::formats::ensure_zip_extension;
///
/// assert!(ensure_zip_extension(Path::new("backup.ZIP")).is_ok());
/// assert!(ensure_zip_extension(Path::new("backup.tar")).is_err());
/// ```
pub fn ensure_zip_extension(path: &Path) -> Result<()> {
    let text = path.as_os_str().to_string_lossy();
    let matches = text.len() >= ZIP_SUFFIX.len()
        && text
            .get(text.len() - ZIP_SUFFIX.len()..)
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(ZIP_SUFFIX));

    if matches {
        Ok(())
    } else {
        Err(ArchiveError::InvalidExtension {
            path: path.to_path_buf(),
        })
    }
}

/// Checks the suffix of `path`, then that the file exists.
///
/// An existence probe that itself fails (e.g. permission denied) is not
/// treated as missing; the subsequent open reports the real error.
///
/// # Errors
///
/// Returns `ArchiveError::InvalidExtension` or `ArchiveError::NotFound`.
pub fn validate_archive_path(path: &Path) -> Result<()> {
    ensure_zip_extension(path)?;
    if matches!(path.try_exists(), Ok(false)) {
        return Err(ArchiveError::NotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
