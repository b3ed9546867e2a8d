//! Configuration for archive creation operations.

use crate::ArchiveError;
use crate::Result;

/// Default Deflate level used when creating archives.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Configuration for archive creation operations.
///
/// # Examples
///
/// ```
/// use ziparch_core::creation::CreationConfig;
///
/// let config = CreationConfig::default()
///     .with_compression_level(9)
///     .with_preserve_permissions(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationConfig {
    /// Deflate level (0-9).
    ///
    /// `Some(0)` stores entries uncompressed. `None` uses the Deflate
    /// encoder's own default.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Record each source file's Unix permission bits in the archive.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for CreationConfig {
    /// Default values:
    /// - `compression_level`: `Some(6)`
    /// - `preserve_permissions`: `true`
    fn default() -> Self {
        Self {
            compression_level: Some(DEFAULT_COMPRESSION_LEVEL),
            preserve_permissions: true,
        }
    }
}

impl CreationConfig {
    /// Creates a new `CreationConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    ///
    /// Out-of-range levels are reported by [`CreationConfig::validate`].
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Sets whether to preserve permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::InvalidConfig` if the compression level is
    /// above 9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && level > 9
        {
            return Err(ArchiveError::InvalidConfig {
                reason: format!("compression level must be 0-9, got {level}"),
            });
        }
        Ok(())
    }
}
