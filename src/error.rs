//! Error types for BI4 decoding.

use std::path::PathBuf;
use std::sync::Arc;

/// Errors that can occur while loading or decoding BI4 files
#[derive(Debug, Clone, thiserror::Error)]
pub enum Bi4Error {
    /// File missing or unreadable
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// Path of the file that failed to load
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: Arc<std::io::Error>,
    },

    /// Marker or array key absent from the buffer
    #[error("Not found: {what}")]
    NotFound {
        /// Description of the missing record
        what: String,
    },

    /// Structurally invalid field
    #[error("Invalid format: {0}")]
    Format(String),

    /// Computed byte span runs past the end of the buffer
    #[error("Span of {len} bytes at offset {offset} exceeds buffer length {buffer_len}")]
    OutOfRange {
        /// Start of the requested span
        offset: usize,
        /// Length of the requested span
        len: usize,
        /// Length of the buffer being decoded
        buffer_len: usize,
    },
}

impl Bi4Error {
    /// Build an I/O error tagged with the path that caused it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Bi4Error::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Build a not-found error for a named record
    pub fn not_found(what: impl Into<String>) -> Self {
        Bi4Error::NotFound { what: what.into() }
    }

    /// True when the record simply does not exist in this file
    pub fn is_not_found(&self) -> bool {
        matches!(self, Bi4Error::NotFound { .. })
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Bi4Error>;

/// Borrow `len` bytes at `offset`, failing instead of clamping
pub(crate) fn span(buffer: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let end = offset.checked_add(len).filter(|&end| end <= buffer.len());
    match end {
        Some(end) => Ok(&buffer[offset..end]),
        None => Err(Bi4Error::OutOfRange {
            offset,
            len,
            buffer_len: buffer.len(),
        }),
    }
}
