//! Delete command implementation.

use crate::cli::DeleteArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use ziparch_core::delete_archive;

pub fn execute(args: &DeleteArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    add_archive_context(delete_archive(&args.archive), &args.archive)?;
    formatter.format_deletion(&args.archive)
}
