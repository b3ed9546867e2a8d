//! Archive extraction.

pub mod atomic;
pub mod engine;
pub mod stream;

pub use atomic::extract_atomic;
pub use engine::ExtractionEngine;
