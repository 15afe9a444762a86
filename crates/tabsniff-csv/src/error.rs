//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV operations
#[derive(Debug, Error)]
pub enum CsvError {
    /// File access or format detection error
    #[error(transparent)]
    Core(#[from] tabsniff_core::Error),

    /// IO error while writing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File extension not handled by this reader
    #[error("Invalid extension '{0}'")]
    InvalidExtension(String),

    /// Row has a different number of fields than the established column count
    #[error("Columns count mismatch - {found} / {expected}")]
    ColumnCountMismatch { found: usize, expected: usize },

    /// Row index past the last row
    #[error("Row {index} out of bounds (rows: {count})")]
    RowOutOfBounds { index: usize, count: usize },

    /// A set-once descriptor field was set twice
    #[error("Property {0} cannot be updated")]
    AlreadySet(&'static str),

    /// Setting missing or not usable
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}

impl CsvError {
    /// Whether the error concerns the shape of the data (column count, row index)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CsvError::ColumnCountMismatch { .. } | CsvError::RowOutOfBounds { .. }
        )
    }
}
