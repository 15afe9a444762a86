//! # tabsniff-core
//!
//! Byte-level building blocks of the tabsniff reader:
//! - [`ByteFile`] - bounded reads over a seekable source
//! - [`FormatDetector`] - byte order mark, encoding and line ending detection
//! - [`LineCursor`] - decoded lines, sequentially or by index
//! - [`Field`] and [`Row`] - the row model shared by the CSV and XLSX paths
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use tabsniff_core::{ByteFile, DetectOptions, LineCursor, LineEnding};
//!
//! let file = ByteFile::from_reader("memory", Cursor::new(b"a,b\rc,d\r".to_vec())).unwrap();
//! let mut lines = LineCursor::new(file, &DetectOptions::default()).unwrap();
//!
//! assert_eq!(lines.format().line_ending, LineEnding::Mac);
//! assert_eq!(lines.read_next_line().unwrap().as_deref(), Some("a,b"));
//! assert_eq!(lines.read_line(1).unwrap(), "c,d");
//! ```

pub mod cursor;
pub mod error;
pub mod field;
pub mod file;
pub mod format;
pub mod row;

// Re-exports for convenience
pub use cursor::{Checkpoint, LineCursor};
pub use error::{Error, Result};
pub use field::Field;
pub use file::ByteFile;
pub use format::{
    Bom, DetectOptions, FormatDetector, LineEnding, TextEncoding, TextFormat, DEFAULT_CHUNK_SIZE,
    DEFAULT_SAMPLE_SIZE,
};
pub use row::Row;
