//! Archive creation module.
//!
//! Source files are stored flat: each entry is named after the source's
//! final path component.

pub mod config;
pub mod report;
pub mod zip;

// Re-exports for public API
pub use config::CreationConfig;
pub use report::CreationReport;
pub use zip::create_zip;
