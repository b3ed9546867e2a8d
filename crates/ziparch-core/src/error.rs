//! Error types for archive creation and extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Represents a specific quota resource that was exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaResource {
    /// Entry count quota exceeded.
    EntryCount {
        /// Number of entries in the archive.
        count: usize,
        /// Maximum allowed entry count.
        max: usize,
    },
    /// Cumulative uncompressed size quota exceeded.
    TotalSize {
        /// Running total in bytes, including the offending entry.
        current: u64,
        /// Maximum allowed total in bytes.
        max: u64,
    },
    /// Integer overflow detected in quota tracking.
    IntegerOverflow,
}

impl std::fmt::Display for QuotaResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntryCount { count, max } => {
                write!(f, "quota exceeded: entry count ({count} > {max})")
            }
            Self::TotalSize { current, max } => {
                write!(f, "quota exceeded: total uncompressed size ({current} > {max})")
            }
            Self::IntegerOverflow => {
                write!(f, "quota exceeded: integer overflow in quota tracking")
            }
        }
    }
}

/// Errors that can occur while creating, extracting, listing or deleting
/// archives.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A source file or the archive itself does not exist.
    #[error("file does not exist: {path}")]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The archive path does not carry the `.zip` suffix.
    #[error("invalid file extension (expected .zip): {path}")]
    InvalidExtension {
        /// The offending archive path.
        path: PathBuf,
    },

    /// A destination or entry path escapes its containing root.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The path that attempted traversal.
        path: PathBuf,
    },

    /// Extraction quota exceeded.
    #[error("{resource}")]
    QuotaExceeded {
        /// Description of the exceeded resource.
        resource: QuotaResource,
    },

    /// Archive is corrupted, unreadable, or could not be finalized.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Configuration values are out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },
}

impl ArchiveError {
    /// Returns `true` if this error represents a security violation.
    ///
    /// Security violations are path traversal attempts and exceeded quotas.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use ziparch_core::ArchiveError;
    ///
    /// let err = ArchiveError::PathTraversal {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = ArchiveError::NotFound {
    ///     path: PathBuf::from("missing.zip"),
    /// };
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::PathTraversal { .. } | Self::QuotaExceeded { .. }
        )
    }

    /// Returns a stable machine-readable code for this error.
    ///
    /// Used by the CLI's JSON output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidExtension { .. } => "INVALID_EXTENSION",
            Self::PathTraversal { .. } => "PATH_TRAVERSAL",
            Self::QuotaExceeded { .. } => "QUOTA_EXCEEDED",
            Self::InvalidArchive(_) => "INVALID_ARCHIVE",
            Self::InvalidConfig { .. } => "INVALID_CONFIG",
        }
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use ziparch_core::ArchiveError;
    ///
    /// let err = ArchiveError::InvalidArchive("bad central directory".to_string());
    /// assert_eq!(err.context(), Some("bad central directory"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) => Some(msg),
            Self::InvalidConfig { reason } => Some(reason),
            _ => None,
        }
    }

    /// Returns the quota resource that was exceeded, if applicable.
    #[must_use]
    pub const fn quota_resource(&self) -> Option<&QuotaResource> {
        match self {
            Self::QuotaExceeded { resource } => Some(resource),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io_err) => Self::Io(io_err),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}
