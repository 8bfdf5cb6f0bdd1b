//! Byte-exact file reads and writes.
//!
//! Rust's `std::fs` never translates line endings, so these are thin
//! wrappers whose job is to attach the offending path to every failure.

use std::path::Path;

use crate::error::GoldenError;

/// Read the whole file as raw bytes.
///
/// # Errors
///
/// Returns [`GoldenError::Io`] if the file does not exist or cannot be read.
pub fn read_binary(path: &Path) -> Result<Vec<u8>, GoldenError> {
    std::fs::read(path).map_err(|e| GoldenError::io(path, &e))
}

/// Write raw bytes, replacing any existing file.
///
/// # Errors
///
/// Returns [`GoldenError::Io`] if the path is not writable.
pub fn write_binary(path: &Path, bytes: &[u8]) -> Result<(), GoldenError> {
    std::fs::write(path, bytes).map_err(|e| GoldenError::io(path, &e))
}

/// Write text through the binary channel. The text is written as its UTF-8
/// bytes; no newline translation or transcoding happens.
///
/// # Errors
///
/// Returns [`GoldenError::Io`] if the path is not writable.
pub fn write_binary_text(path: &Path, text: &str) -> Result<(), GoldenError> {
    write_binary(path, text.as_bytes())
}
