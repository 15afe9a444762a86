//! # tabsniff
//!
//! Reads tabular files without being told their layout. Opening a file
//! detects, in order:
//!
//! - the byte order mark and text encoding (ASCII, UTF-8, Windows-1252, UTF-16)
//! - the line ending (`\r\n`, `\n` or `\r`)
//! - the field separator (`,`, `;` or tab) and enclosure (`"`, `'` or none)
//! - whether the first line is a header
//!
//! `.xlsx` files are converted to CSV first (first worksheet only) and then go
//! through the same detection.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tabsniff::prelude::*;
//!
//! let mut reader = tabsniff::open("players.csv", &CsvReadOptions::default())?;
//! println!("{}", reader.describe()?);
//!
//! reader.set_associative(true);
//! while let Some(row) = reader.read_next_row()? {
//!     println!("{:?}", row.get_by_name("name"));
//! }
//! # Ok::<(), tabsniff::Error>(())
//! ```

mod error;
pub mod prelude;

use std::path::Path;

pub use error::{Error, Result};

// Re-export core types
pub use tabsniff_core::{
    Bom, ByteFile, Checkpoint, DetectOptions, Field, FormatDetector, LineCursor, LineEnding, Row,
    TextEncoding, TextFormat, DEFAULT_CHUNK_SIZE, DEFAULT_SAMPLE_SIZE,
};

// Re-export reader types
pub use tabsniff_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvWriter, DescriptorBuilder, Enclosure,
    Rows, Separator, TabularDescriptor, TabularDetector, TabularReader,
};
#[cfg(feature = "xlsx")]
pub use tabsniff_xlsx::{SpreadsheetExtractor, SpreadsheetTable, XlsxError, XlsxReader};

/// File formats [`open`] can read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    #[cfg(feature = "xlsx")]
    Xlsx,
}

impl FileKind {
    /// Format implied by the extension of `path` (case-insensitive)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(FileKind::Csv),
            #[cfg(feature = "xlsx")]
            Some("xlsx") => Ok(FileKind::Xlsx),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Open a tabular file, choosing the reader from its extension
pub fn open<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> Result<Box<dyn TabularReader>> {
    let path = path.as_ref();

    match FileKind::from_path(path)? {
        FileKind::Csv => Ok(Box::new(CsvReader::open(path, options)?)),
        #[cfg(feature = "xlsx")]
        FileKind::Xlsx => Ok(Box::new(XlsxReader::open(path, options)?)),
    }
}
