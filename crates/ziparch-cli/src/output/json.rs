//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use crate::error::error_code;
use crate::error::error_message;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use ziparch_core::ArchiveEntry;
use ziparch_core::ArchiveManifest;
use ziparch_core::ExtractionReport;
use ziparch_core::creation::CreationReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct EntryOutput<'a> {
    name: &'a str,
    size: u64,
    compressed_size: u64,
    is_dir: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<String>,
}

impl<'a> From<&'a ArchiveEntry> for EntryOutput<'a> {
    fn from(entry: &'a ArchiveEntry) -> Self {
        Self {
            name: &entry.name,
            size: entry.size,
            compressed_size: entry.compressed_size,
            is_dir: entry.is_dir,
            mode: entry.mode.map(|m| format!("{m:o}")),
        }
    }
}

#[derive(Serialize)]
struct ManifestOutput<'a> {
    total_entries: usize,
    total_size: u64,
    total_compressed: u64,
    entries: Vec<EntryOutput<'a>>,
}

impl<'a> From<&'a ArchiveManifest> for ManifestOutput<'a> {
    fn from(manifest: &'a ArchiveManifest) -> Self {
        Self {
            total_entries: manifest.total_entries,
            total_size: manifest.total_size,
            total_compressed: manifest.total_compressed,
            entries: manifest.entries.iter().map(EntryOutput::from).collect(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, dest: &Path, report: &ExtractionReport) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractionOutput {
            destination: String,
            total_entries: usize,
            files_extracted: usize,
            directories_created: usize,
            declared_bytes: u64,
            bytes_written: u64,
            duration_ms: u128,
        }

        let data = ExtractionOutput {
            destination: dest.display().to_string(),
            total_entries: report.total_entries,
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            declared_bytes: report.declared_bytes,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_creation_result(&self, output_path: &Path, report: &CreationReport) -> Result<()> {
        #[derive(Serialize)]
        struct CreationOutput {
            output_path: String,
            files_added: usize,
            bytes_written: u64,
            bytes_compressed: u64,
            compression_ratio: f64,
            compression_percentage: f64,
            duration_ms: u128,
        }

        let data = CreationOutput {
            output_path: output_path.display().to_string(),
            files_added: report.files_added,
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            compression_percentage: report.compression_percentage(),
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("create", data))
    }

    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        Self::output(&JsonOutput::success("list", ManifestOutput::from(manifest)))
    }

    fn format_manifest_long(
        &self,
        manifest: &ArchiveManifest,
        _human_readable: bool,
    ) -> Result<()> {
        Self::output(&JsonOutput::success("list", ManifestOutput::from(manifest)))
    }

    fn format_deletion(&self, archive: &Path) -> Result<()> {
        #[derive(Serialize)]
        struct DeletionOutput {
            archive: String,
        }

        let data = DeletionOutput {
            archive: archive.display().to_string(),
        };

        Self::output(&JsonOutput::success("delete", data))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, error_code(error), error_message(error));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
