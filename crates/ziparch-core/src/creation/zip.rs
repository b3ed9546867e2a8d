//! ZIP archive creation.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use std::time::SystemTime;

use chrono::Datelike;
use chrono::Local;
use chrono::Timelike;
use tracing::debug;
use tracing::info;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::ArchiveError;
use crate::Result;
use crate::creation::config::CreationConfig;
use crate::creation::report::CreationReport;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Creates a ZIP archive at `output` containing each of `sources`.
///
/// Every source must be a regular file. Entries are named after the
/// source's final path component and added in the order given. The first
/// failure aborts the operation; the partially written archive is left in
/// place.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use ziparch_core::creation::CreationConfig;
/// use ziparch_core::creation::create_zip;
///
/// let config = CreationConfig::default();
/// let report = create_zip(
///     Path::new("output.zip"),
///     &[Path::new("notes/a.txt"), Path::new("b.txt")],
///     &config,
/// )?;
/// println!("Added {} files", report.files_added);
/// # Ok::<(), ziparch_core::ArchiveError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - `sources` is empty or the config is invalid (`InvalidConfig`)
/// - a source does not exist (`NotFound`)
/// - a source is not a regular file, two sources share a file name, or any
///   read/write fails (`Io` with `InvalidInput` for the first two)
/// - the archive cannot be finalized (`InvalidArchive`)
pub fn create_zip<P: AsRef<Path>, Q: AsRef<Path>>(
    output: P,
    sources: &[Q],
    config: &CreationConfig,
) -> Result<CreationReport> {
    let output = output.as_ref();
    config.validate()?;
    if sources.is_empty() {
        return Err(ArchiveError::InvalidConfig {
            reason: "no source files given".into(),
        });
    }

    let start = Instant::now();
    let file = File::create(output)?;
    let (writer, mut report) = write_zip(BufWriter::new(file), sources, config)?;
    let file = writer
        .into_inner()
        .map_err(|e| ArchiveError::InvalidArchive(format!("failed to flush archive: {e}")))?;
    file.sync_all()?;

    report.bytes_compressed = file.metadata()?.len();
    report.duration = start.elapsed();

    info!(
        archive = %output.display(),
        files = report.files_added,
        bytes = report.bytes_written,
        compressed = report.bytes_compressed,
        "archive created"
    );
    Ok(report)
}

/// Writes a flat ZIP archive of `sources` into `writer`.
fn write_zip<W: Write + Seek, P: AsRef<Path>>(
    writer: W,
    sources: &[P],
    config: &CreationConfig,
) -> Result<(W, CreationReport)> {
    let mut zip = ZipWriter::new(writer);
    let mut report = CreationReport::default();
    let options = base_options(config);
    let mut names = HashSet::with_capacity(sources.len());
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for source in sources {
        let path = source.as_ref();
        if !path.exists() {
            return Err(ArchiveError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let name = entry_name(path)?;
        if !names.insert(name.clone()) {
            return Err(ArchiveError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("duplicate entry name '{name}' from {}", path.display()),
            )));
        }

        let bytes = add_file(&mut zip, path, &name, options, config, &mut buffer)?;
        debug!(source = %path.display(), entry = %name, bytes, "added file");

        report.files_added += 1;
        report.bytes_written += bytes;
    }

    let writer = zip
        .finish()
        .map_err(|e| ArchiveError::InvalidArchive(format!("failed to finish ZIP archive: {e}")))?;
    Ok((writer, report))
}

fn base_options(config: &CreationConfig) -> SimpleFileOptions {
    match config.compression_level {
        Some(0) => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        level => SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(level.map(i64::from)),
    }
}

/// Returns the base name of `path` as an archive entry name.
fn entry_name(path: &Path) -> Result<String> {
    let name = path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("source has no file name: {}", path.display()),
        )
    })?;

    name.to_str().map(str::to_owned).ok_or_else(|| {
        ArchiveError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("source name is not valid UTF-8: {}", path.display()),
        ))
    })
}

fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    name: &str,
    options: SimpleFileOptions,
    config: &CreationConfig,
    buffer: &mut [u8],
) -> Result<u64> {
    let mut file = File::open(path)?;
    let metadata = file.metadata()?;
    if !metadata.is_file() {
        return Err(ArchiveError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("source is not a regular file: {}", path.display()),
        )));
    }

    let mut file_options = options.last_modified_time(
        metadata
            .modified()
            .ok()
            .and_then(to_zip_datetime)
            .unwrap_or_default(),
    );
    if config.preserve_permissions {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file_options = file_options.unix_permissions(metadata.permissions().mode());
        }
    }

    zip.start_file(name, file_options)
        .map_err(|e| std::io::Error::other(format!("failed to start file in ZIP: {e}")))?;

    let mut bytes_written = 0u64;
    loop {
        let bytes_read = file.read(buffer)?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])?;
        bytes_written += bytes_read as u64;
    }
    Ok(bytes_written)
}

/// Converts a modification time to the ZIP (MS-DOS) timestamp format.
///
/// Returns `None` outside the representable 1980-2107 range.
fn to_zip_datetime(modified: SystemTime) -> Option<zip::DateTime> {
    let local = chrono::DateTime::<Local>::from(modified).naive_local();
    zip::DateTime::from_date_and_time(
        u16::try_from(local.year()).ok()?,
        u8::try_from(local.month()).ok()?,
        u8::try_from(local.day()).ok()?,
        u8::try_from(local.hour()).ok()?,
        u8::try_from(local.minute()).ok()?,
        u8::try_from(local.second()).ok()?,
    )
    .ok()
}
