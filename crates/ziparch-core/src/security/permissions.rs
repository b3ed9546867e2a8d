//! Permission sanitization for extracted entries.
//!
//! Archive modes are reduced to the `0o777` permission bits, so setuid,
//! setgid and sticky bits never reach disk. The owner always keeps read and
//! write access (plus execute on directories) so extraction can proceed.

/// Mode used for files that carry no mode in the archive.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Mode used for directories that carry no mode in the archive.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Returns the mode to apply to an extracted file.
///
/// # Examples
///
/// ```
/// use ziparch_core::security::sanitize_file_mode;
///
/// assert_eq!(sanitize_file_mode(Some(0o4755)), 0o755);
/// assert_eq!(sanitize_file_mode(Some(0o444)), 0o644);
/// assert_eq!(sanitize_file_mode(None), 0o644);
/// ```
#[must_use]
pub fn sanitize_file_mode(mode: Option<u32>) -> u32 {
    mode.map_or(DEFAULT_FILE_MODE, |m| (m & 0o777) | 0o600)
}

/// Returns the mode to apply to an extracted directory.
#[must_use]
pub fn sanitize_dir_mode(mode: Option<u32>) -> u32 {
    mode.map_or(DEFAULT_DIR_MODE, |m| (m & 0o777) | 0o700)
}
