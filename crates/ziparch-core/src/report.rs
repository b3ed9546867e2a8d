//! Extraction operation reporting.

use std::time::Duration;

/// Report of an archive extraction operation.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of entries in the archive.
    pub total_entries: usize,

    /// Number of files written.
    pub files_extracted: usize,

    /// Number of directory entries materialized. Entries naming the
    /// destination itself are not counted.
    pub directories_created: usize,

    /// Sum of the uncompressed sizes declared by the entries.
    pub declared_bytes: u64,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction operation.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of files and directories materialized.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }

    /// Returns `true` if the written byte count differs from the declared
    /// sizes, which means the archive headers were inaccurate.
    #[must_use]
    pub fn size_mismatch(&self) -> bool {
        self.declared_bytes != self.bytes_written
    }
}
