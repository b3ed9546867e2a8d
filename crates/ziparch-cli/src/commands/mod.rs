//! Subcommand implementations.

pub mod completion;
pub mod create;
pub mod delete;
pub mod extract;
pub mod list;
