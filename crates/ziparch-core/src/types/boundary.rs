//! Filesystem boundary that extraction destinations must stay within.

use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::security::path::is_contained;
use crate::security::path::normalize;

/// An absolute, lexically cleaned root directory.
///
/// Extraction destinations are proven to be this directory or one of its
/// descendants before anything is created. The default boundary is the
/// process working directory.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ziparch_core::types::Boundary;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let boundary = Boundary::new("/srv/uploads")?;
/// assert!(boundary.contains(Path::new("/srv/uploads/batch-1")));
/// assert!(!boundary.contains(Path::new("/srv/other")));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary(PathBuf);

impl Boundary {
    /// Creates a boundary rooted at `root`.
    ///
    /// Relative roots are resolved against the working directory. The
    /// directory does not need to exist.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the working directory cannot be determined.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self(normalize(root.as_ref())?))
    }

    /// Creates a boundary rooted at the process working directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the working directory cannot be determined.
    pub fn current_dir() -> Result<Self> {
        Self::new(std::env::current_dir()?)
    }

    /// Returns the root as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns `true` if the absolute `candidate` is the root or below it.
    #[inline]
    #[must_use]
    pub fn contains(&self, candidate: &Path) -> bool {
        is_contained(&self.0, candidate)
    }
}
