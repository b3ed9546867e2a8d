//! Lexical path normalization and containment checks.
//!
//! Everything here works on path strings only. Symbolic links are never
//! resolved, so a link inside the root that points elsewhere is not
//! detected: the check proves *logical* containment.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;

/// Lexically cleans a path.
///
/// - `.` components are dropped
/// - `..` removes the preceding normal component
/// - `..` directly under the root (or a prefix) is discarded
/// - leading `..` of a relative path are kept
/// - an empty result becomes `.`
///
/// No filesystem access is performed.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use std::path::PathBuf;
/// use ziparch_core::security::clean_path;
///
/// assert_eq!(clean_path(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
/// assert_eq!(clean_path(Path::new("/../etc")), PathBuf::from("/etc"));
/// assert_eq!(clean_path(Path::new("../a/..")), PathBuf::from(".."));
/// ```
#[must_use]
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    let mut normal_depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => cleaned.push(prefix.as_os_str()),
            Component::RootDir => cleaned.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if normal_depth > 0 {
                    cleaned.pop();
                    normal_depth -= 1;
                } else if !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            Component::Normal(name) => {
                cleaned.push(name);
                normal_depth += 1;
            }
        }
    }

    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// Resolves `path` against an absolute `base` and cleans the result.
///
/// An absolute `path` ignores `base`.
#[must_use]
pub fn normalize_against(base: &Path, path: &Path) -> PathBuf {
    clean_path(&base.join(path))
}

/// Resolves `path` against the current working directory and cleans it.
///
/// # Errors
///
/// Returns an I/O error if the working directory cannot be determined.
pub fn normalize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(clean_path(path));
    }
    let cwd = std::env::current_dir()?;
    Ok(normalize_against(&cwd, path))
}

/// Returns `true` if `candidate` is `root` or lies below it.
///
/// Both paths are cleaned before comparison. Comparison is component-wise,
/// so `/data/app` is contained in `/data` but `/data-old` is not. Callers
/// should pass absolute paths; see [`normalize`].
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ziparch_core::security::is_contained;
///
/// assert!(is_contained(Path::new("/out"), Path::new("/out")));
/// assert!(is_contained(Path::new("/out"), Path::new("/out/a/../b.txt")));
/// assert!(!is_contained(Path::new("/out"), Path::new("/out/../etc/passwd")));
/// assert!(!is_contained(Path::new("/out"), Path::new("/outside")));
/// ```
#[must_use]
pub fn is_contained(root: &Path, candidate: &Path) -> bool {
    let root = clean_path(root);
    let candidate = clean_path(candidate);
    candidate.starts_with(&root)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path_basic() {
        assert_eq!(clean_path(Path::new("/a/./b")), PathBuf::from("/a/b"));
        assert_eq!(clean_path(Path::new("/a/b/..")), PathBuf::from("/a"));
        assert_eq!(clean_path(Path::new("/a/b/../../..")), PathBuf::from("/"));
        assert_eq!(clean_path(Path::new("a/../..")), PathBuf::from(".."));
        assert_eq!(clean_path(Path::new("")), PathBuf::from("."));
        assert_eq!(clean_path(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn test_clean_path_keeps_leading_parents() {
        assert_eq!(clean_path(Path::new("../../x")), PathBuf::from("../../x"));
        assert_eq!(clean_path(Path::new("../a/../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_normalize_against() {
        let base = Path::new("/work");
        assert_eq!(
            normalize_against(base, Path::new("out/../dest")),
            PathBuf::from("/work/dest")
        );
        assert_eq!(
            normalize_against(base, Path::new("/abs/path")),
            PathBuf::from("/abs/path")
        );
    }

    #[test]
    fn test_normalize_relative_is_absolute() {
        let normalized = normalize(Path::new("some/dir/..")).unwrap();
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("some"));
    }

    #[test]
    fn test_contained_equal_root() {
        assert!(is_contained(Path::new("/out"), Path::new("/out")));
        assert!(is_contained(Path::new("/out/"), Path::new("/out/.")));
    }

    #[test]
    fn test_contained_descendant() {
        assert!(is_contained(Path::new("/out"), Path::new("/out/a/b.txt")));
        assert!(is_contained(Path::new("/out"), Path::new("/out/a/../b.txt")));
    }

    #[test]
    fn test_not_contained_parent_or_sibling() {
        assert!(!is_contained(Path::new("/out"), Path::new("/")));
        assert!(!is_contained(Path::new("/out"), Path::new("/out/..")));
        assert!(!is_contained(Path::new("/out"), Path::new("/out/../x")));
        assert!(!is_contained(Path::new("/out"), Path::new("/outside/file")));
        assert!(!is_contained(Path::new("/out/a"), Path::new("/out/ab")));
    }

    #[test]
    fn test_root_of_filesystem_contains_everything() {
        assert!(is_contained(Path::new("/"), Path::new("/etc/passwd")));
    }
}
