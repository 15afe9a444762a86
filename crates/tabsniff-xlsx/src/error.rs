//! XLSX error types

use thiserror::Error;
use zip::result::ZipError;

use tabsniff_csv::CsvError;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur while extracting a spreadsheet
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive could not be opened or read
    #[error("Archive error: {reason}")]
    Archive { reason: String },

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Unexpected worksheet or shared strings structure
    #[error("Invalid XLSX format: {0}")]
    InvalidFormat(String),

    /// Worksheet without any row
    #[error("Worksheet has no rows")]
    EmptySheet,

    /// Error reading the converted CSV
    #[error(transparent)]
    Csv(#[from] CsvError),
}

impl From<ZipError> for XlsxError {
    fn from(err: ZipError) -> Self {
        let reason = match err {
            ZipError::Io(e) => return XlsxError::Io(e),
            ZipError::InvalidArchive(msg) => format!("not a valid zip archive ({msg})"),
            ZipError::UnsupportedArchive(msg) => format!("unsupported zip archive ({msg})"),
            ZipError::FileNotFound => "entry not found in archive".to_string(),
            other => other.to_string(),
        };

        XlsxError::Archive { reason }
    }
}

impl From<tabsniff_core::Error> for XlsxError {
    fn from(err: tabsniff_core::Error) -> Self {
        XlsxError::Csv(CsvError::Core(err))
    }
}
