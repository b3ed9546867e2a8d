//! Archive path checks.

pub mod detect;

pub use detect::ensure_zip_extension;
pub use detect::validate_archive_path;
