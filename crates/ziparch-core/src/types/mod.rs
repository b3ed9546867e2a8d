//! Validated path types and entry metadata.
//!
//! Security types can only be built through their validating constructors.
//! There are no `From<PathBuf>` implementations.

pub mod boundary;
pub mod dest_dir;
pub mod entry;
pub mod safe_path;

pub use boundary::Boundary;
pub use dest_dir::DestDir;
pub use entry::ArchiveEntry;
pub use safe_path::SafePath;
