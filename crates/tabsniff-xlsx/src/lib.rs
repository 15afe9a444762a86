//! # tabsniff-xlsx
//!
//! Reads the first worksheet of an XLSX package by converting it to
//! canonical CSV:
//! - [`SpreadsheetExtractor`] - shared strings and worksheet rows as a dense [`SpreadsheetTable`]
//! - [`XlsxReader`] - a [`TabularReader`](tabsniff_csv::TabularReader) over the converted file

pub mod error;
pub mod extractor;
pub mod reader;
pub mod reference;
pub mod shared_strings;
pub mod table;

#[cfg(test)]
mod testing;

pub use error::{XlsxError, XlsxResult};
pub use extractor::{SpreadsheetExtractor, SHARED_STRINGS_PART, SHEET_PART};
pub use reader::XlsxReader;
pub use table::{read_worksheet, SpreadsheetTable};
