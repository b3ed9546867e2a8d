//! Validated entry target path.

use std::path::Path;
use std::path::PathBuf;

use tracing::warn;

use crate::ArchiveError;
use crate::Result;
use crate::security::path::clean_path;
use crate::security::path::is_contained;

use super::DestDir;

/// The on-disk target of an archive entry, proven to lie within a
/// [`DestDir`].
///
/// The entry name is joined to the destination and lexically cleaned. An
/// absolute entry name replaces the destination during the join and is
/// therefore rejected. Names made of `.` components only resolve to the
/// destination itself.
///
/// # Security Properties
///
/// - Can ONLY be constructed through [`SafePath::validate`]
/// - NO `From<PathBuf>` implementation
/// - Containment is lexical: symlinks already on disk are not followed
///
/// # Examples
///
/// ```
/// use ziparch_core::types::Boundary;
/// use ziparch_core::types::DestDir;
/// use ziparch_core::types::SafePath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let boundary = Boundary::new("/srv")?;
/// let dest = DestDir::resolve("/srv/out", &boundary)?;
///
/// let safe = SafePath::validate("docs/readme.txt", &dest)?;
/// assert!(safe.as_path().ends_with("out/docs/readme.txt"));
///
/// assert!(SafePath::validate("../escape.txt", &dest).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Joins `entry_name` to `dest` and checks containment.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::PathTraversal` carrying the raw entry name if
    /// the cleaned target is outside `dest`.
    pub fn validate(entry_name: &str, dest: &DestDir) -> Result<Self> {
        let target = clean_path(&dest.as_path().join(entry_name));

        if !is_contained(dest.as_path(), &target) {
            warn!(
                entry = entry_name,
                target = %target.display(),
                "archive entry escapes destination"
            );
            return Err(ArchiveError::PathTraversal {
                path: PathBuf::from(entry_name),
            });
        }

        Ok(Self(target))
    }

    /// Returns the target as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns `true` if the target is the destination directory itself.
    #[inline]
    #[must_use]
    pub fn is_dest_root(&self, dest: &DestDir) -> bool {
        self.0 == dest.as_path()
    }
}
