//! Error types for tabsniff-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while accessing or decoding a text file
#[derive(Debug, Error)]
pub enum Error {
    /// File missing, or a read/seek went outside the file
    #[error("File access error: {0}")]
    FileAccess(String),

    /// Underlying IO failure (open, stat, seek, read)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Empty file, or encoding/line ending not recognizable from the sample
    #[error("Format detection failed: {0}")]
    FormatDetection(String),

    /// Line index past the last line of the file
    #[error("Line {index} out of bounds (lines: {count})")]
    LineOutOfBounds { index: usize, count: usize },
}

impl Error {
    /// Create a file access error with a message
    pub fn file_access<S: Into<String>>(msg: S) -> Self {
        Error::FileAccess(msg.into())
    }

    /// Create a format detection error with a message
    pub fn detection<S: Into<String>>(msg: S) -> Self {
        Error::FormatDetection(msg.into())
    }

    /// Whether this error came from opening, seeking or reading the file
    pub fn is_file_access(&self) -> bool {
        matches!(self, Error::FileAccess(_) | Error::Io(_))
    }
}
