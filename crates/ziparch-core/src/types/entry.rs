//! Archive entry metadata.

/// Metadata of a single archive entry as declared in the central directory.
///
/// `size` is the uncompressed size claimed by the archive. It is not
/// verified against the actual data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name using forward slashes; directories end with `/`.
    pub name: String,

    /// Declared uncompressed size in bytes.
    pub size: u64,

    /// Compressed size in bytes.
    pub compressed_size: u64,

    /// Whether the entry is a directory.
    pub is_dir: bool,

    /// Unix mode bits, if the archive recorded them.
    pub mode: Option<u32>,
}

impl ArchiveEntry {
    /// Creates entry metadata.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        size: u64,
        compressed_size: u64,
        is_dir: bool,
        mode: Option<u32>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            compressed_size,
            is_dir,
            mode,
        }
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 when the compressed size is zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compression_ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return 0.0;
        }
        self.size as f64 / self.compressed_size as f64
    }
}
