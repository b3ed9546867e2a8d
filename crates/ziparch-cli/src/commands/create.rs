//! Create command implementation.

use crate::cli::CreateArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use ziparch_core::create_archive;
use ziparch_core::creation::CreationConfig;

pub fn execute(args: &CreateArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let mut config = CreationConfig::default().with_preserve_permissions(!args.no_permissions);
    if let Some(level) = args.level {
        config = config.with_compression_level(level);
    }

    let report = add_archive_context(
        create_archive(&args.output, &args.sources, &config),
        &args.output,
    )?;

    formatter.format_creation_result(&args.output, &report)
}
