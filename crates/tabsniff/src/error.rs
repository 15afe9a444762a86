//! Error type for opening tabular files

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`open`](crate::open)
#[derive(Debug, Error)]
pub enum Error {
    /// CSV detection or reading failed
    #[error(transparent)]
    Csv(#[from] tabsniff_csv::CsvError),

    /// XLSX extraction failed
    #[cfg(feature = "xlsx")]
    #[error(transparent)]
    Xlsx(#[from] tabsniff_xlsx::XlsxError),

    /// Extension not handled by any reader
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

impl From<tabsniff_core::Error> for Error {
    fn from(err: tabsniff_core::Error) -> Self {
        Error::Csv(err.into())
    }
}
