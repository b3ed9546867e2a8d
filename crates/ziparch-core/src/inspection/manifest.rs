//! Archive manifest types.

use crate::types::ArchiveEntry;

/// Entries of an archive in archive order, with totals.
#[derive(Debug, Clone, Default)]
pub struct ArchiveManifest {
    /// Entries in archive order.
    pub entries: Vec<ArchiveEntry>,

    /// Number of entries.
    pub total_entries: usize,

    /// Sum of declared uncompressed sizes.
    pub total_size: u64,

    /// Sum of compressed sizes.
    pub total_compressed: u64,
}

impl ArchiveManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and updates the totals.
    pub fn push(&mut self, entry: ArchiveEntry) {
        self.total_entries += 1;
        self.total_size = self.total_size.saturating_add(entry.size);
        self.total_compressed = self.total_compressed.saturating_add(entry.compressed_size);
        self.entries.push(entry);
    }

    /// Returns the number of file (non-directory) entries.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_dir).count()
    }
}
