//! Streaming copy of entry data with quota accounting.

use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;

use crate::Result;
use crate::security::QuotaTracker;

/// Buffer size for entry copies (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable buffer for entry copies within one extraction.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Vec<u8>,
}

impl CopyBuffer {
    /// Allocates a new copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE],
        }
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies `reader` into `writer`, reporting every chunk to `quota`.
///
/// Each chunk is recorded before it is written, so with actual-size
/// enforcement enabled nothing beyond the budget reaches the writer.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails, or
/// `ArchiveError::QuotaExceeded` if `quota` rejects the written total.
pub fn copy_validated<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
    quota: &mut QuotaTracker,
) -> Result<u64> {
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        let chunk = n as u64;
        quota.record_written(chunk)?;
        writer.write_all(&buffer.buf[..n])?;
        total += chunk;
    }
    Ok(total)
}
