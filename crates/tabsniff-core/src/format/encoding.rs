//! Text encodings and the charset heuristic

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Text encoding of a file's data section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextEncoding {
    Ascii,
    Utf8,
    Windows1252,
    Iso8859_1,
    Utf16Le,
    Utf16Be,
}

/// Encodings tried by [`TextEncoding::detect`], in order.
///
/// ISO-8859-1 is not a candidate: every sample it accepts is also accepted
/// by Windows-1252, which comes first.
const DETECTION_CANDIDATES: [TextEncoding; 3] = [
    TextEncoding::Ascii,
    TextEncoding::Utf8,
    TextEncoding::Windows1252,
];

/// Byte values Windows-1252 leaves undefined
const WINDOWS_1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

impl TextEncoding {
    /// Guess the encoding of a BOM-less sample.
    ///
    /// The sample may be cut in the middle of a multi-byte sequence; a
    /// truncated trailing UTF-8 sequence does not disqualify UTF-8.
    pub fn detect(sample: &[u8]) -> Result<Self> {
        DETECTION_CANDIDATES
            .iter()
            .copied()
            .find(|encoding| encoding.accepts(sample))
            .ok_or_else(|| Error::detection("encoding not recognized"))
    }

    /// Whether `sample` is plausible text in this encoding
    pub fn accepts(&self, sample: &[u8]) -> bool {
        match self {
            TextEncoding::Ascii => sample.is_ascii(),
            TextEncoding::Utf8 => match std::str::from_utf8(sample) {
                Ok(_) => true,
                Err(e) => e.error_len().is_none(),
            },
            TextEncoding::Windows1252 => !sample
                .iter()
                .any(|b| WINDOWS_1252_UNDEFINED.contains(b)),
            TextEncoding::Iso8859_1 => !sample.iter().any(|b| (0x80..=0x9F).contains(b)),
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => sample.len() % 2 == 0,
        }
    }

    /// Bytes per code unit
    pub fn unit_width(&self) -> usize {
        match self {
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => 2,
            _ => 1,
        }
    }

    /// Encode ASCII-only text (line endings, separators) in this encoding
    pub fn encode_ascii(&self, text: &str) -> Vec<u8> {
        debug_assert!(text.is_ascii());

        match self {
            TextEncoding::Utf16Le => text.bytes().flat_map(|b| [b, 0]).collect(),
            TextEncoding::Utf16Be => text.bytes().flat_map(|b| [0, b]).collect(),
            _ => text.as_bytes().to_vec(),
        }
    }

    /// Decode bytes into UTF-8, replacing malformed sequences
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self {
            TextEncoding::Ascii | TextEncoding::Utf8 => String::from_utf8_lossy(bytes),
            TextEncoding::Windows1252 => {
                encoding_rs::WINDOWS_1252
                    .decode_without_bom_handling(bytes)
                    .0
            }
            TextEncoding::Iso8859_1 => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
            TextEncoding::Utf16Le => encoding_rs::UTF_16LE.decode_without_bom_handling(bytes).0,
            TextEncoding::Utf16Be => encoding_rs::UTF_16BE.decode_without_bom_handling(bytes).0,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Ascii => "ASCII",
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Windows1252 => "Windows-1252",
            TextEncoding::Iso8859_1 => "ISO-8859-1",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Utf16Be => "UTF-16BE",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            "utf8" | "utf-8" => Ok(TextEncoding::Utf8),
            "windows-1252" | "windows1252" | "cp1252" => Ok(TextEncoding::Windows1252),
            "iso-8859-1" | "iso8859-1" | "latin1" => Ok(TextEncoding::Iso8859_1),
            "utf16le" | "utf-16le" => Ok(TextEncoding::Utf16Le),
            "utf16be" | "utf-16be" => Ok(TextEncoding::Utf16Be),
            _ => Err(Error::detection(format!("unknown encoding '{}'", s))),
        }
    }
}
