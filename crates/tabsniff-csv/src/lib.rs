//! # tabsniff-csv
//!
//! Delimited text reading for tabsniff: detects separator, enclosure and
//! header on top of the text format found by `tabsniff-core`, then yields
//! rows sequentially or by index.
//!
//! ```rust
//! use std::io::Cursor;
//! use tabsniff_core::ByteFile;
//! use tabsniff_csv::{CsvReadOptions, CsvReader, Separator, TabularReader};
//!
//! let data = b"name;size\nfoo;12\nbar;7\n".to_vec();
//! let file = ByteFile::from_reader("sizes.csv", Cursor::new(data)).unwrap();
//! let mut reader = CsvReader::auto_detect(file, &CsvReadOptions::default()).unwrap();
//!
//! assert_eq!(reader.descriptor().separator(), Separator::Semicolon);
//! assert_eq!(reader.descriptor().columns(), ["name", "size"]);
//! assert_eq!(reader.rows_count().unwrap(), 2);
//! assert_eq!(reader.read_row(1).unwrap().to_strings(), vec!["bar", "7"]);
//! ```

mod descriptor;
mod detect;
mod error;
mod options;
mod reader;
mod split;
mod tabular;
mod writer;

pub use descriptor::{DescriptorBuilder, TabularDescriptor};
pub use detect::{TabularDetector, ENCLOSURES, HEADER_KEYWORDS, SEPARATORS};
pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, Enclosure, Separator, DEFAULT_ESCAPE};
pub use reader::{check_extension, CsvReader};
pub use split::FieldSplitter;
pub use tabular::{Rows, TabularReader};
pub use writer::CsvWriter;
