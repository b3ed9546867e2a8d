//! Safe ZIP packing and extraction.
//!
//! `ziparch-core` creates flat ZIP archives from a list of files and
//! extracts untrusted ZIP archives with protection against zip-slip path
//! traversal and decompression bombs:
//!
//! - the destination must lie within a boundary (the working directory by
//!   default) and every entry must resolve inside the destination
//! - the entry count and the cumulative declared uncompressed size are
//!   bounded by [`ExtractionLimits`], typically derived from free disk space
//!   via [`ExtractionLimits::from_free_space`]
//!
//! Containment is lexical. Symbolic links already present under the
//! destination are not resolved.
//!
//! # Examples
//!
//! ```no_run
//! use ziparch_core::ExtractionLimits;
//! use ziparch_core::create_archive;
//! use ziparch_core::creation::CreationConfig;
//! use ziparch_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! create_archive("bundle.zip", &["a.txt", "b.txt"], &CreationConfig::default())?;
//!
//! let limits = ExtractionLimits::from_free_space(1000, 10 * 1024 * 1024, 0.3)?;
//! let report = extract_archive("bundle.zip", "unpacked", &limits)?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod creation;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod inspection;
pub mod report;
pub mod security;
#[doc(hidden)]
pub mod test_utils;
pub mod types;

// Re-export main API types
pub use api::create_archive;
pub use api::delete_archive;
pub use api::extract_archive;
pub use api::extract_archive_atomic;
pub use api::extract_archive_within;
pub use config::ExtractionLimits;
pub use error::ArchiveError;
pub use error::QuotaResource;
pub use error::Result;
pub use inspection::ArchiveManifest;
pub use inspection::list_archive;
pub use report::ExtractionReport;

// Re-export types module for easier access
pub use types::ArchiveEntry;
pub use types::Boundary;
pub use types::DestDir;
pub use types::SafePath;
