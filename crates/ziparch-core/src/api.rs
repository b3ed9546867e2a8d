//! High-level public API for archive extraction and creation.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::ExtractionLimits;
use crate::ExtractionReport;
use crate::Result;
use crate::creation::CreationConfig;
use crate::creation::CreationReport;
use crate::creation::create_zip;
use crate::extraction::ExtractionEngine;
use crate::extraction::extract_atomic;
use crate::formats::validate_archive_path;
use crate::types::Boundary;

/// Extracts a ZIP archive into `output_dir`.
///
/// The destination must resolve to the process working directory or a
/// directory below it. Entries are written in archive order; on failure,
/// entries already written are left in place. Use
/// [`extract_archive_atomic`] to avoid partial output.
///
/// # Arguments
///
/// * `archive_path` - Path to the archive file (must end in `.zip`)
/// * `output_dir` - Directory where files will be extracted
/// * `limits` - Entry count and size budget
///
/// # Errors
///
/// Returns an error if:
/// - the path does not end in `.zip` (`InvalidExtension`)
/// - the archive does not exist (`NotFound`)
/// - the destination or an entry escapes its root (`PathTraversal`)
/// - the entry count or size budget is exceeded (`QuotaExceeded`)
/// - the archive cannot be parsed (`InvalidArchive`)
/// - I/O operations fail (`Io`)
///
/// # Examples
///
/// ```no_run
/// use ziparch_core::ExtractionLimits;
/// use ziparch_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let limits = ExtractionLimits::default();
/// let report = extract_archive("upload.zip", "uploads/batch-1", &limits)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    limits: &ExtractionLimits,
) -> Result<ExtractionReport> {
    let boundary = Boundary::current_dir()?;
    extract_archive_within(archive_path, output_dir, limits, &boundary)
}

/// Extracts a ZIP archive into `output_dir`, which must lie within
/// `boundary`.
///
/// Behaves like [`extract_archive`] with an explicit boundary in place of
/// the working directory.
///
/// # Errors
///
/// Same as [`extract_archive`].
pub fn extract_archive_within<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    limits: &ExtractionLimits,
    boundary: &Boundary,
) -> Result<ExtractionReport> {
    ExtractionEngine::new(limits, boundary).extract(archive_path.as_ref(), output_dir.as_ref())
}

/// Extracts a ZIP archive so that `output_dir` appears only if every entry
/// succeeds.
///
/// Entries are written to a hidden staging directory beside `output_dir`
/// and renamed into place at the end. `output_dir` must not exist or must
/// be an empty directory.
///
/// # Errors
///
/// Same as [`extract_archive`], plus `InvalidConfig` if `output_dir` is the
/// working directory itself and `Io` (`AlreadyExists`) if it is occupied.
pub fn extract_archive_atomic<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    limits: &ExtractionLimits,
) -> Result<ExtractionReport> {
    let boundary = Boundary::current_dir()?;
    let engine = ExtractionEngine::new(limits, &boundary);
    extract_atomic(&engine, archive_path.as_ref(), output_dir.as_ref())
}

/// Creates a ZIP archive from source files.
///
/// Each source is stored under its base name; directory structure is not
/// kept. Extraction, by contrast, preserves stored paths.
///
/// # Errors
///
/// Returns an error if:
/// - `sources` is empty or `config` is invalid (`InvalidConfig`)
/// - a source does not exist (`NotFound`)
/// - a source is not a regular file, two sources share a file name, or
///   I/O fails (`Io`)
///
/// # Examples
///
/// ```no_run
/// use ziparch_core::create_archive;
/// use ziparch_core::creation::CreationConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CreationConfig::default();
/// let report = create_archive("backup.zip", &["notes.txt", "data/report.csv"], &config)?;
/// println!("Added {} files", report.files_added);
/// # Ok(())
/// # }
/// ```
pub fn create_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    output_path: P,
    sources: &[Q],
    config: &CreationConfig,
) -> Result<CreationReport> {
    create_zip(output_path, sources, config)
}

/// Deletes a ZIP archive.
///
/// # Errors
///
/// Returns `InvalidExtension` unless the path ends in `.zip`, `NotFound`
/// if it does not exist, or `Io` if removal fails (including when the path
/// is a directory).
///
/// # Examples
///
/// ```no_run
/// use ziparch_core::delete_archive;
///
/// delete_archive("old-upload.zip")?;
/// # Ok::<(), ziparch_core::ArchiveError>(())
/// ```
pub fn delete_archive<P: AsRef<Path>>(archive_path: P) -> Result<()> {
    let archive_path = archive_path.as_ref();
    validate_archive_path(archive_path)?;
    fs::remove_file(archive_path)?;
    info!(archive = %archive_path.display(), "archive deleted");
    Ok(())
}
