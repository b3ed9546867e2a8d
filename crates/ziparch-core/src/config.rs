//! Extraction limits configuration.

use crate::Result;
use crate::security::budget::compute_budget;

/// Default maximum number of entries an archive may contain.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default cumulative uncompressed size budget (500 MB).
pub const DEFAULT_MAX_UNCOMPRESSED_BYTES: u64 = 500 * 1024 * 1024;

/// Limits enforced while extracting an archive.
///
/// Computed once (typically from free disk space) and passed by reference
/// into every extraction call.
///
/// # Examples
///
/// ```
/// use ziparch_core::ExtractionLimits;
///
/// // Use defaults
/// let limits = ExtractionLimits::default();
///
/// // Derive the size budget from free disk space
/// let limits = ExtractionLimits::from_free_space(1000, 4096, 0.5)?;
/// assert_eq!(limits.max_uncompressed_bytes, 2048);
/// # Ok::<(), ziparch_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionLimits {
    /// Maximum number of entries (files and directories) in the archive.
    pub max_entries: usize,

    /// Maximum cumulative declared uncompressed size in bytes.
    pub max_uncompressed_bytes: u64,

    /// Also count the bytes actually produced by decompression.
    ///
    /// When `false`, only the sizes declared in entry headers are checked,
    /// so an archive that understates its header sizes is not caught.
    /// When `true`, the copy aborts as soon as the real running total
    /// exceeds `max_uncompressed_bytes`.
    pub enforce_actual_size: bool,
}

impl Default for ExtractionLimits {
    /// Default values:
    /// - `max_entries`: 1000
    /// - `max_uncompressed_bytes`: 500 MB
    /// - `enforce_actual_size`: false
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_uncompressed_bytes: DEFAULT_MAX_UNCOMPRESSED_BYTES,
            enforce_actual_size: false,
        }
    }
}

impl ExtractionLimits {
    /// Creates limits from explicit values.
    #[must_use]
    pub fn new(max_entries: usize, max_uncompressed_bytes: u64) -> Self {
        Self {
            max_entries,
            max_uncompressed_bytes,
            enforce_actual_size: false,
        }
    }

    /// Creates limits whose size budget is a fraction of free disk space.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::InvalidConfig` if `reserve_fraction` is not in
    /// `(0, 1]`.
    pub fn from_free_space(
        max_entries: usize,
        free_disk_bytes: u64,
        reserve_fraction: f64,
    ) -> Result<Self> {
        let max_uncompressed_bytes = compute_budget(free_disk_bytes, reserve_fraction)?;
        Ok(Self::new(max_entries, max_uncompressed_bytes))
    }

    /// Sets the maximum entry count.
    #[must_use]
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Sets the cumulative uncompressed size budget.
    #[must_use]
    pub fn with_max_uncompressed_bytes(mut self, bytes: u64) -> Self {
        self.max_uncompressed_bytes = bytes;
        self
    }

    /// Enables or disables counting of actually decompressed bytes.
    #[must_use]
    pub fn with_actual_size_enforcement(mut self, enabled: bool) -> Self {
        self.enforce_actual_size = enabled;
        self
    }
}
