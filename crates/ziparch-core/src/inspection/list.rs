//! Archive listing implementation.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use crate::Result;
use crate::formats::validate_archive_path;
use crate::inspection::manifest::ArchiveManifest;
use crate::types::ArchiveEntry;

/// Lists archive contents without extracting.
///
/// Entry names are reported exactly as stored, including names that would
/// be rejected on extraction. No files are written.
///
/// # Errors
///
/// Returns error if:
/// - the path does not end in `.zip` (`InvalidExtension`)
/// - the archive does not exist (`NotFound`)
/// - the archive cannot be parsed (`InvalidArchive`)
///
/// # Examples
///
/// ```no_run
/// use ziparch_core::list_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let manifest = list_archive("archive.zip")?;
/// println!("Archive contains {} entries", manifest.total_entries);
/// for entry in manifest.entries {
///     println!("{}: {} bytes", entry.name, entry.size);
/// }
/// # Ok(())
/// # }
/// ```
pub fn list_archive<P: AsRef<Path>>(archive_path: P) -> Result<ArchiveManifest> {
    let archive_path = archive_path.as_ref();
    validate_archive_path(archive_path)?;

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    let mut manifest = ArchiveManifest::new();

    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        manifest.push(ArchiveEntry::new(
            entry.name(),
            entry.size(),
            entry.compressed_size(),
            entry.is_dir(),
            entry.unix_mode(),
        ));
    }

    debug!(
        archive = %archive_path.display(),
        entries = manifest.total_entries,
        "listed archive"
    );
    Ok(manifest)
}
