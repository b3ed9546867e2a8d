//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::disk;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use std::env;
use tracing::debug;
use ziparch_core::ExtractionLimits;
use ziparch_core::extract_archive;
use ziparch_core::extract_archive_atomic;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let limits = build_limits(args)?;
    debug!(
        max_entries = limits.max_entries,
        max_bytes = limits.max_uncompressed_bytes,
        atomic = args.atomic,
        "extraction limits"
    );

    let report = if args.atomic {
        add_archive_context(
            extract_archive_atomic(&args.archive, &args.dest, &limits),
            &args.archive,
        )?
    } else {
        add_archive_context(
            extract_archive(&args.archive, &args.dest, &limits),
            &args.archive,
        )?
    };

    formatter.format_extraction_result(&args.dest, &report)
}

fn build_limits(args: &ExtractArgs) -> Result<ExtractionLimits> {
    let limits = if let Some(max_total_size) = args.max_total_size {
        ExtractionLimits::new(args.max_entries, max_total_size)
    } else {
        let cwd = env::current_dir().context("failed to get current directory")?;
        let free = disk::available_space(&cwd);
        add_archive_context(
            ExtractionLimits::from_free_space(args.max_entries, free, args.reserve_fraction),
            &args.archive,
        )?
    };

    Ok(limits.with_actual_size_enforcement(args.enforce_actual_size))
}
