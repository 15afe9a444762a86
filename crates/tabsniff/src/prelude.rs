//! Prelude module - common imports for tabsniff users
//!
//! ```rust
//! use tabsniff::prelude::*;
//! ```

pub use crate::{
    open, CsvReadOptions, CsvReader, DetectOptions, Enclosure, Error, Field, LineEnding, Result,
    Row, Separator, TabularDescriptor, TabularReader, TextEncoding,
};

#[cfg(feature = "xlsx")]
pub use crate::XlsxReader;
