//! Validated destination directory type.

use std::fs::create_dir_all;
use std::path::Path;
use std::path::PathBuf;

use tracing::warn;

use crate::ArchiveError;
use crate::Result;
use crate::security::path::normalize;
use crate::types::Boundary;

/// A destination directory proven to lie within a [`Boundary`].
///
/// The path is absolute and lexically cleaned. Construction never touches
/// the filesystem, so a rejected destination leaves no directories behind;
/// call [`DestDir::create`] once validation has passed.
///
/// # Examples
///
/// ```no_run
/// use ziparch_core::types::Boundary;
/// use ziparch_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let boundary = Boundary::current_dir()?;
/// let dest = DestDir::resolve("output", &boundary)?;
/// dest.create()?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Resolves `path` to an absolute path and checks it against `boundary`.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::PathTraversal` if the resolved path is outside
    /// the boundary, or an I/O error if the working directory cannot be
    /// determined.
    pub fn resolve(path: impl AsRef<Path>, boundary: &Boundary) -> Result<Self> {
        let path = path.as_ref();
        let resolved = normalize(path)?;

        if !boundary.contains(&resolved) {
            warn!(
                dest = %resolved.display(),
                boundary = %boundary.as_path().display(),
                "destination directory is outside the boundary"
            );
            return Err(ArchiveError::PathTraversal {
                path: path.to_path_buf(),
            });
        }

        Ok(Self(resolved))
    }

    /// Creates the directory and any missing ancestors.
    ///
    /// Idempotent: an existing directory is left as is.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if creation fails (including when a file
    /// already occupies the path).
    pub fn create(&self) -> Result<()> {
        create_dir_all(&self.0)?;
        Ok(())
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}
