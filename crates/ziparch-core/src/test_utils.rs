//! Test utilities for crafting ZIP archives.
//!
//! The builder writes entry names verbatim, so archives containing `../`
//! or absolute names can be produced to exercise the extraction checks.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const LOCAL_HEADER_SIG: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];
const CENTRAL_HEADER_SIG: [u8; 4] = [0x50, 0x4b, 0x01, 0x02];

/// Builder for ZIP test archives.
///
/// Files are stored uncompressed.
///
/// # Examples
///
/// ```
/// use ziparch_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_file("file.txt", b"content")
///     .add_directory("dir/")
///     .add_file("../escape.txt", b"evil")
///     .build();
/// assert!(!zip_data.is_empty());
/// ```
pub struct ZipTestBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a regular file with mode `0o644`.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a regular file with a custom mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(mode);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(self, path: &str) -> Self {
        self.add_directory_with_mode(path, 0o755)
    }

    /// Adds a directory entry with a custom mode.
    #[must_use]
    pub fn add_directory_with_mode(mut self, path: &str, mode: u32) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(mode);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Adds `count` empty files named `file-N.txt`.
    #[must_use]
    pub fn add_empty_files(mut self, count: usize) -> Self {
        for i in 0..count {
            self = self.add_file(&format!("file-{i}.txt"), b"");
        }
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }

    /// Builds the archive and writes it to `path`.
    pub fn write_to(self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, self.build())
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrites the uncompressed size recorded for `entry` in both its local
/// and central directory headers.
///
/// Used to produce archives whose headers understate their content.
/// Only valid for archives without ZIP64 records.
pub fn patch_declared_size(data: &mut [u8], entry: &str, declared: u32) {
    let name = entry.as_bytes();
    let mut patched = 0;

    let mut i = 0;
    while i + 4 <= data.len() {
        let sig = &data[i..i + 4];
        let (size_offset, name_len_offset, name_offset) = if sig == LOCAL_HEADER_SIG {
            (22, 26, 30)
        } else if sig == CENTRAL_HEADER_SIG {
            (24, 28, 46)
        } else {
            i += 1;
            continue;
        };

        if i + name_offset <= data.len() {
            let name_len = usize::from(u16::from_le_bytes([
                data[i + name_len_offset],
                data[i + name_len_offset + 1],
            ]));
            let start = i + name_offset;
            if data.get(start..start + name_len) == Some(name) {
                data[i + size_offset..i + size_offset + 4]
                    .copy_from_slice(&declared.to_le_bytes());
                patched += 1;
            }
        }
        i += 4;
    }

    assert_eq!(patched, 2, "expected one local and one central header for {entry}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::ZipArchive;

    #[test]
    fn test_zip_builder() {
        let zip_data = ZipTestBuilder::new()
            .add_file("file.txt", b"content")
            .add_directory("dir/")
            .build();

        let mut archive = ZipArchive::new(Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.by_index(0).unwrap().name(), "file.txt");
        assert!(archive.by_index(1).unwrap().is_dir());
    }

    #[test]
    fn test_zip_builder_keeps_traversal_names() {
        let zip_data = ZipTestBuilder::new()
            .add_file("../../etc/evil.txt", b"x")
            .build();

        let mut archive = ZipArchive::new(Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.by_index(0).unwrap().name(), "../../etc/evil.txt");
    }

    #[test]
    fn test_add_empty_files() {
        let zip_data = ZipTestBuilder::new().add_empty_files(5).build();
        let archive = ZipArchive::new(Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 5);
    }

    #[test]
    fn test_patch_declared_size() {
        let mut zip_data = ZipTestBuilder::new()
            .add_file("big.bin", &[0u8; 1000])
            .build();
        patch_declared_size(&mut zip_data, "big.bin", 10);

        let mut archive = ZipArchive::new(Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.by_index(0).unwrap().size(), 10);
    }
}
