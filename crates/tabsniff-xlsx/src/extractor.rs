//! Reading the first worksheet out of an XLSX package

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{XlsxError, XlsxResult};
use crate::shared_strings::read_shared_strings;
use crate::table::{read_worksheet, SpreadsheetTable};

/// Worksheet part read from the package
pub const SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// Shared strings part; optional when no cell references it
pub const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Extracts the first worksheet of an XLSX package as a [`SpreadsheetTable`]
pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    /// Extract from a file on disk
    pub fn extract_file<P: AsRef<Path>>(path: P) -> XlsxResult<SpreadsheetTable> {
        let file = File::open(path)?;
        Self::extract(BufReader::new(file))
    }

    /// Extract from any seekable reader
    pub fn extract<R: Read + Seek>(reader: R) -> XlsxResult<SpreadsheetTable> {
        let mut archive = ZipArchive::new(reader)?;

        let shared = match archive.by_name(SHARED_STRINGS_PART) {
            Ok(file) => Some(read_shared_strings(BufReader::new(file))?),
            Err(ZipError::FileNotFound) => None,
            Err(e) => return Err(e.into()),
        };

        let sheet = archive.by_name(SHEET_PART).map_err(|e| match e {
            ZipError::FileNotFound => XlsxError::MissingPart(SHEET_PART.to_string()),
            other => other.into(),
        })?;

        read_worksheet(BufReader::new(sheet), shared.as_deref())
    }
}
