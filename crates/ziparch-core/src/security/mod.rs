//! Security validation modules.

pub mod budget;
pub mod path;
pub mod permissions;
pub mod quota;

// Re-export public types and functions
pub use budget::DEFAULT_RESERVE_FRACTION;
pub use budget::compute_budget;
pub use path::clean_path;
pub use path::is_contained;
pub use path::normalize;
pub use permissions::sanitize_dir_mode;
pub use permissions::sanitize_file_mode;
pub use quota::QuotaTracker;
