//! Error conversion utilities for CLI.
//!
//! Converts ziparch-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use ziparch_core::ArchiveError;
use ziparch_core::QuotaResource;

/// Carries the stable error code through anyhow for JSON output.
#[derive(Debug)]
pub struct ErrorCode(pub &'static str);

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Converts `ArchiveError` to user-friendly anyhow error with context
pub fn convert_archive_error(err: ArchiveError, archive: &Path) -> anyhow::Error {
    let code = ErrorCode(err.code());
    let converted = match err {
        ArchiveError::PathTraversal { path } => {
            anyhow!(
                "Security violation: '{}' escapes its target directory while processing '{}'\n\
                 HINT: Archive entries and the destination must stay inside the working directory.",
                path.display(),
                archive.display()
            )
        }
        ArchiveError::QuotaExceeded { resource } => {
            let hint = match &resource {
                QuotaResource::EntryCount { .. } => "Use --max-entries to allow more entries.",
                QuotaResource::TotalSize { .. } => {
                    "Free up disk space, raise --reserve-fraction, or set --max-total-size."
                }
                QuotaResource::IntegerOverflow => {
                    "The archive declares impossible sizes and is likely malicious."
                }
            };
            anyhow!(
                "Extraction limit exceeded for '{}': {}\nHINT: {}",
                archive.display(),
                resource,
                hint
            )
        }
        ArchiveError::NotFound { path } => {
            anyhow!("File not found: {}", path.display())
        }
        ArchiveError::InvalidExtension { path } => {
            anyhow!(
                "Not a ZIP archive: {}\n\
                 HINT: Only paths ending in .zip are accepted.",
                path.display()
            )
        }
        ArchiveError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
        ArchiveError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted or malformed.",
                archive.display(),
                reason
            )
        }
        ArchiveError::InvalidConfig { reason } => {
            anyhow!("Invalid options for '{}': {}", archive.display(), reason)
        }
    };
    converted.context(code)
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, ArchiveError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}

/// Returns the error code attached by [`convert_archive_error`].
pub fn error_code(error: &anyhow::Error) -> &'static str {
    error
        .downcast_ref::<ErrorCode>()
        .map_or("ERROR", |code| code.0)
}

/// Renders the message chain without the code layer.
pub fn error_message(error: &anyhow::Error) -> String {
    if error.downcast_ref::<ErrorCode>().is_some() {
        error
            .chain()
            .nth(1)
            .map_or_else(|| error.to_string(), ToString::to_string)
    } else {
        format!("{error:#}")
    }
}
