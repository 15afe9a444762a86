//! Line ending conventions

use std::fmt;
use std::str::FromStr;

use super::TextEncoding;
use crate::error::{Error, Result};

/// Line ending convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineEnding {
    /// `\n`
    Linux,
    /// `\r\n`
    Windows,
    /// `\r`
    Mac,
}

/// CR comes last so the CR half of a CRLF never wins.
const DETECTION_ORDER: [LineEnding; 3] = [LineEnding::Windows, LineEnding::Linux, LineEnding::Mac];

impl LineEnding {
    /// Find the convention used in `sample`, decoded with `encoding`
    pub fn detect(sample: &[u8], encoding: TextEncoding) -> Result<Self> {
        DETECTION_ORDER
            .iter()
            .copied()
            .find(|ending| {
                let needle = ending.bytes(encoding);
                find_aligned(sample, &needle, 0, encoding.unit_width()).is_some()
            })
            .ok_or_else(|| Error::detection("line ending not found in sample"))
    }

    /// The ending as text
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Linux => "\n",
            LineEnding::Windows => "\r\n",
            LineEnding::Mac => "\r",
        }
    }

    /// The ending as bytes in `encoding`
    pub fn bytes(&self, encoding: TextEncoding) -> Vec<u8> {
        encoding.encode_ascii(self.as_str())
    }

    /// Length in bytes of the ending in `encoding`
    pub fn byte_len(&self, encoding: TextEncoding) -> usize {
        self.as_str().len() * encoding.unit_width()
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            LineEnding::Linux => "Linux",
            LineEnding::Windows => "Windows",
            LineEnding::Mac => "Mac",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LineEnding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(LineEnding::Linux),
            "windows" => Ok(LineEnding::Windows),
            "mac" => Ok(LineEnding::Mac),
            _ => Err(Error::detection(format!("unknown line ending '{}'", s))),
        }
    }
}

/// Position of the first `needle` at or after `from` that starts on a
/// multiple of `unit` bytes.
pub(crate) fn find_aligned(haystack: &[u8], needle: &[u8], from: usize, unit: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }

    let mut pos = from + (unit - from % unit) % unit;
    while pos + needle.len() <= haystack.len() {
        if &haystack[pos..pos + needle.len()] == needle {
            return Some(pos);
        }
        pos += unit;
    }

    None
}
