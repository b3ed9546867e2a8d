//! Core extraction engine.
//!
//! Extraction is a fixed sequence of checks. The archive path, the
//! destination and the entry count are all validated before the first entry
//! is touched; after that each entry is validated and written in archive
//! order and the first failure stops the run. Entries already written stay
//! on disk.

use std::fs::File;
use std::fs::OpenOptions;
use std::fs::create_dir_all;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::warn;
use zip::ZipArchive;

use crate::ArchiveError;
use crate::ExtractionLimits;
use crate::ExtractionReport;
use crate::Result;
use crate::extraction::stream::CopyBuffer;
use crate::extraction::stream::copy_validated;
use crate::formats::validate_archive_path;
use crate::security::QuotaTracker;
use crate::security::sanitize_dir_mode;
use crate::security::sanitize_file_mode;
use crate::types::Boundary;
use crate::types::DestDir;
use crate::types::SafePath;

/// Extraction engine bound to a set of limits and a boundary.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use ziparch_core::ExtractionLimits;
/// use ziparch_core::extraction::ExtractionEngine;
/// use ziparch_core::types::Boundary;
///
/// # fn main() -> Result<(), ziparch_core::ArchiveError> {
/// let limits = ExtractionLimits::default();
/// let boundary = Boundary::current_dir()?;
/// let engine = ExtractionEngine::new(&limits, &boundary);
/// let report = engine.extract(Path::new("upload.zip"), Path::new("out"))?;
/// println!("{} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ExtractionEngine<'a> {
    limits: &'a ExtractionLimits,
    boundary: &'a Boundary,
}

impl<'a> ExtractionEngine<'a> {
    /// Creates an engine.
    #[must_use]
    pub fn new(limits: &'a ExtractionLimits, boundary: &'a Boundary) -> Self {
        Self { limits, boundary }
    }

    /// Returns the boundary destinations must stay within.
    #[must_use]
    pub fn boundary(&self) -> &'a Boundary {
        self.boundary
    }

    /// Validates the archive path and resolves the destination.
    ///
    /// Nothing is created.
    ///
    /// # Errors
    ///
    /// `InvalidExtension`, `NotFound` or `PathTraversal`, in that order.
    pub fn prepare(&self, archive_path: &Path, dest: &Path) -> Result<DestDir> {
        validate_archive_path(archive_path)?;
        DestDir::resolve(dest, self.boundary)
    }

    /// Extracts `archive_path` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns the first failure:
    /// - `InvalidExtension` if the path does not end in `.zip`
    /// - `NotFound` if the archive does not exist
    /// - `PathTraversal` if `dest` or any entry escapes its root
    /// - `QuotaExceeded` if the entry count or size budget is exceeded
    /// - `InvalidArchive` if the archive cannot be parsed
    /// - `Io` for filesystem failures
    pub fn extract(&self, archive_path: &Path, dest: &Path) -> Result<ExtractionReport> {
        let start = Instant::now();
        let dest = self.prepare(archive_path, dest)?;
        dest.create()?;

        let file = File::open(archive_path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;

        let mut quota = QuotaTracker::new(*self.limits);
        quota
            .check_entry_count(archive.len())
            .inspect_err(|e| warn!(archive = %archive_path.display(), "{e}"))?;

        debug!(
            archive = %archive_path.display(),
            dest = %dest.as_path().display(),
            entries = archive.len(),
            "extracting archive"
        );

        let mut report = ExtractionReport {
            total_entries: archive.len(),
            ..ExtractionReport::default()
        };
        let mut buffer = CopyBuffer::new();

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let name = entry.name().to_owned();

            let target = SafePath::validate(&name, &dest)?;
            quota
                .record_declared(entry.size())
                .inspect_err(|e| warn!(entry = %name, "{e}"))?;

            if entry.is_dir() {
                if !target.is_dest_root(&dest) {
                    create_directory(target.as_path(), sanitize_dir_mode(entry.unix_mode()))?;
                    report.directories_created += 1;
                    debug!(entry = %name, "created directory");
                }
                continue;
            }

            let mode = sanitize_file_mode(entry.unix_mode());
            let bytes = write_file(&mut entry, target.as_path(), mode, &mut buffer, &mut quota)
                .inspect_err(|e| {
                    if e.is_security_violation() {
                        warn!(entry = %name, "{e}");
                    }
                })?;
            report.files_extracted += 1;
            debug!(entry = %name, declared = entry.size(), bytes, "extracted file");
        }

        report.declared_bytes = quota.declared_bytes();
        report.bytes_written = quota.written_bytes();
        report.duration = start.elapsed();

        info!(
            archive = %archive_path.display(),
            files = report.files_extracted,
            directories = report.directories_created,
            bytes = report.bytes_written,
            "archive extracted"
        );
        Ok(report)
    }
}

/// Creates a directory (and its parents).
///
/// `mode` is applied only when the directory did not exist before; an
/// existing directory keeps its permissions.
fn create_directory(path: &Path, mode: u32) -> Result<()> {
    let existed = path.symlink_metadata().is_ok();
    create_dir_all(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if !existed {
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
        }
    }
    #[cfg(not(unix))]
    let _ = (mode, existed);

    Ok(())
}

/// Writes one file entry, truncating any existing file at `path`.
///
/// An existing file keeps its permissions; `mode` applies to new files.
fn write_file<R: Read>(
    reader: &mut R,
    path: &Path,
    mode: u32,
    buffer: &mut CopyBuffer,
    quota: &mut QuotaTracker,
) -> Result<u64> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let existed = path.symlink_metadata().is_ok();
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }

    let file = options.open(path).map_err(|e| {
        ArchiveError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to create {}: {e}", path.display()),
        ))
    })?;
    let mut writer = BufWriter::with_capacity(64 * 1024, file);
    let bytes = copy_validated(reader, &mut writer, buffer, quota)?;
    writer.flush()?;

    // the mode passed to open() is filtered by the umask
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if !existed {
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
        }
    }
    #[cfg(not(unix))]
    let _ = (mode, existed);

    Ok(bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::ZipTestBuilder;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Boundary) {
        let temp = TempDir::new().unwrap();
        let boundary = Boundary::new(temp.path()).unwrap();
        (temp, boundary)
    }

    #[test]
    fn test_extract_files_and_directories() {
        let (temp, boundary) = setup();
        let archive = temp.path().join("a.zip");
        ZipTestBuilder::new()
            .add_directory("docs/")
            .add_file("docs/readme.txt", b"hello")
            .add_file("top.txt", b"world!")
            .write_to(&archive)
            .unwrap();

        let limits = ExtractionLimits::default();
        let engine = ExtractionEngine::new(&limits, &boundary);
        let report = engine.extract(&archive, &temp.path().join("out")).unwrap();

        assert_eq!(report.total_entries, 3);
        assert_eq!(report.files_extracted, 2);
        assert_eq!(report.directories_created, 1);
        assert_eq!(report.declared_bytes, 11);
        assert_eq!(report.bytes_written, 11);
        assert_eq!(
            fs::read(temp.path().join("out/docs/readme.txt")).unwrap(),
            b"hello"
        );
        assert_eq!(fs::read(temp.path().join("out/top.txt")).unwrap(), b"world!");
    }

    #[test]
    fn test_extract_creates_missing_parents() {
        let (temp, boundary) = setup();
        let archive = temp.path().join("a.zip");
        ZipTestBuilder::new()
            .add_file("x/y/z.txt", b"deep")
            .write_to(&archive)
            .unwrap();

        let limits = ExtractionLimits::default();
        ExtractionEngine::new(&limits, &boundary)
            .extract(&archive, &temp.path().join("out"))
            .unwrap();
        assert_eq!(fs::read(temp.path().join("out/x/y/z.txt")).unwrap(), b"deep");
    }

    #[test]
    fn test_extract_overwrites_existing_file() {
        let (temp, boundary) = setup();
        let archive = temp.path().join("a.zip");
        ZipTestBuilder::new()
            .add_file("f.txt", b"new")
            .write_to(&archive)
            .unwrap();
        fs::create_dir(temp.path().join("out")).unwrap();
        fs::write(temp.path().join("out/f.txt"), "old contents that are longer").unwrap();

        let limits = ExtractionLimits::default();
        ExtractionEngine::new(&limits, &boundary)
            .extract(&archive, &temp.path().join("out"))
            .unwrap();
        assert_eq!(fs::read(temp.path().join("out/f.txt")).unwrap(), b"new");
    }

    #[test]
    fn test_extract_dot_directory_entry_is_noop() {
        let (temp, boundary) = setup();
        let archive = temp.path().join("a.zip");
        ZipTestBuilder::new()
            .add_directory("./")
            .add_file("f.txt", b"x")
            .write_to(&archive)
            .unwrap();

        let limits = ExtractionLimits::default();
        let report = ExtractionEngine::new(&limits, &boundary)
            .extract(&archive, &temp.path().join("out"))
            .unwrap();
        assert_eq!(report.directories_created, 0);
        assert_eq!(report.files_extracted, 1);
    }

    #[test]
    fn test_extract_invalid_archive() {
        let (temp, boundary) = setup();
        let archive = temp.path().join("broken.zip");
        fs::write(&archive, b"this is not a zip file").unwrap();

        let limits = ExtractionLimits::default();
        let result = ExtractionEngine::new(&limits, &boundary).extract(&archive, &temp.path().join("out"));
        assert!(matches!(result, Err(ArchiveError::InvalidArchive(_))));
    }

    #[test]
    fn test_prepare_creates_nothing() {
        let (temp, boundary) = setup();
        let archive = temp.path().join("a.zip");
        ZipTestBuilder::new()
            .add_file("f.txt", b"x")
            .write_to(&archive)
            .unwrap();

        let limits = ExtractionLimits::default();
        let dest = ExtractionEngine::new(&limits, &boundary)
            .prepare(&archive, &temp.path().join("later"))
            .unwrap();
        assert!(!dest.as_path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_applies_sanitized_modes() {
        use std::os::unix::fs::PermissionsExt;

        let (temp, boundary) = setup();
        let archive = temp.path().join("a.zip");
        ZipTestBuilder::new()
            .add_file_with_mode("run.sh", b"#!/bin/sh\n", 0o4755)
            .add_file_with_mode("secret.txt", b"s", 0o600)
            .write_to(&archive)
            .unwrap();

        let limits = ExtractionLimits::default();
        ExtractionEngine::new(&limits, &boundary)
            .extract(&archive, &temp.path().join("out"))
            .unwrap();

        let mode = |name: &str| {
            fs::metadata(temp.path().join("out").join(name))
                .unwrap()
                .permissions()
                .mode()
                & 0o7777
        };
        assert_eq!(mode("run.sh"), 0o755);
        assert_eq!(mode("secret.txt"), 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_directory_keeps_its_mode() {
        use std::os::unix::fs::PermissionsExt;

        let (temp, boundary) = setup();
        let keep = temp.path().join("out/keep");
        fs::create_dir_all(&keep).unwrap();
        fs::set_permissions(&keep, fs::Permissions::from_mode(0o700)).unwrap();

        let archive = temp.path().join("a.zip");
        ZipTestBuilder::new()
            .add_directory_with_mode("keep/", 0o777)
            .add_directory_with_mode("fresh/", 0o750)
            .write_to(&archive)
            .unwrap();

        let limits = ExtractionLimits::default();
        ExtractionEngine::new(&limits, &boundary)
            .extract(&archive, &temp.path().join("out"))
            .unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o7777;
        assert_eq!(mode(&keep), 0o700);
        assert_eq!(mode(&temp.path().join("out/fresh")), 0o750);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_file_keeps_its_mode() {
        use std::os::unix::fs::PermissionsExt;

        let (temp, boundary) = setup();
        let out = temp.path().join("out");
        fs::create_dir(&out).unwrap();
        let target = out.join("notes.txt");
        fs::write(&target, b"old").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o600)).unwrap();

        let archive = temp.path().join("a.zip");
        ZipTestBuilder::new()
            .add_file_with_mode("notes.txt", b"new", 0o777)
            .write_to(&archive)
            .unwrap();

        let limits = ExtractionLimits::default();
        ExtractionEngine::new(&limits, &boundary)
            .extract(&archive, &out)
            .unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new");
        assert_eq!(
            fs::metadata(&target).unwrap().permissions().mode() & 0o7777,
            0o600
        );
    }
}
