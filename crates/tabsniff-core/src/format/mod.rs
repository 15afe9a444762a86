//! Text format detection: byte order mark, encoding and line ending

mod bom;
mod encoding;
mod line_ending;

pub use bom::Bom;
pub use encoding::TextEncoding;
pub use line_ending::LineEnding;

pub(crate) use line_ending::find_aligned;

use std::io::{Read, Seek};

use crate::error::{Error, Result};
use crate::file::ByteFile;

/// Default number of bytes inspected by the encoding and line ending heuristics
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;

/// Default chunk size used when scanning for the end of a line
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Options controlling format detection and line scanning
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectOptions {
    /// Bytes from the start of the file given to the heuristics
    pub sample_size: usize,
    /// Bytes read per step while looking for a line ending
    pub chunk_size: usize,
    /// Skip the charset heuristic (a byte order mark still takes precedence)
    pub encoding: Option<TextEncoding>,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            encoding: None,
        }
    }
}

/// Everything needed to turn the file's bytes into lines of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextFormat {
    pub bom: Bom,
    pub encoding: TextEncoding,
    pub line_ending: LineEnding,
}

impl TextFormat {
    /// Offset of the first data byte, just past the byte order mark
    pub fn start_offset(&self) -> u64 {
        self.bom.start_offset()
    }

    /// Line terminator bytes in the file's encoding
    pub fn terminator(&self) -> Vec<u8> {
        self.line_ending.bytes(self.encoding)
    }
}

/// Detects the [`TextFormat`] of a file from a bounded prefix
#[derive(Debug, Clone, Default)]
pub struct FormatDetector {
    options: DetectOptions,
}

impl FormatDetector {
    pub fn new(options: DetectOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DetectOptions {
        &self.options
    }

    /// Detect the format of `file`.
    ///
    /// On success the file cursor sits at the data start.
    pub fn detect<R: Read + Seek>(&self, file: &mut ByteFile<R>) -> Result<TextFormat> {
        let size = file.size();
        if size == 0 {
            return Err(Error::detection("empty file"));
        }

        let prefix = file.read_at(0, size.min(Bom::MAX_LEN as u64) as usize)?;
        let bom = Bom::detect(&prefix);
        let start = bom.start_offset();

        if start >= size {
            return Err(Error::detection("no data after byte order mark"));
        }

        let end = size.min((self.options.sample_size as u64).max(start + 1));
        let mut sample = file.read_at(start, (end - start) as usize)?;

        let encoding = match bom.encoding().or(self.options.encoding) {
            Some(encoding) => encoding,
            None => TextEncoding::detect(&sample)?,
        };

        let unit = encoding.unit_width();
        sample.truncate(sample.len() - sample.len() % unit);

        let line_ending = LineEnding::detect(&sample, encoding)?;

        file.seek(start)?;

        log::debug!(
            "{}: BOM {}, encoding {}, line ending {}",
            file.name(),
            bom,
            encoding,
            line_ending
        );

        Ok(TextFormat {
            bom,
            encoding,
            line_ending,
        })
    }
}
