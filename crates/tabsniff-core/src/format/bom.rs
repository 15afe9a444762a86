//! Byte order marks

use std::fmt;
use std::str::FromStr;

use super::TextEncoding;
use crate::error::{Error, Result};

/// Byte order mark found at the start of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bom {
    /// No byte order mark
    #[default]
    None,
    /// `EF BB BF`
    Utf8,
    /// `FF FE`
    Utf16Le,
    /// `FE FF`
    Utf16Be,
}

/// Candidates in match order; the first full prefix match wins.
const CANDIDATES: [(Bom, &[u8]); 3] = [
    (Bom::Utf8, &[0xEF, 0xBB, 0xBF]),
    (Bom::Utf16Le, &[0xFF, 0xFE]),
    (Bom::Utf16Be, &[0xFE, 0xFF]),
];

impl Bom {
    /// Longest byte order mark, i.e. how many leading bytes [`Bom::detect`] needs
    pub const MAX_LEN: usize = 3;

    /// Identify the byte order mark at the start of `prefix`
    pub fn detect(prefix: &[u8]) -> Self {
        CANDIDATES
            .iter()
            .find(|(_, bytes)| prefix.starts_with(bytes))
            .map(|(bom, _)| *bom)
            .unwrap_or(Bom::None)
    }

    /// The marker bytes (empty for [`Bom::None`])
    pub fn bytes(&self) -> &'static [u8] {
        CANDIDATES
            .iter()
            .find(|(bom, _)| bom == self)
            .map(|(_, bytes)| *bytes)
            .unwrap_or(&[])
    }

    /// Offset of the first data byte
    pub fn start_offset(&self) -> u64 {
        self.bytes().len() as u64
    }

    /// Encoding implied by the marker
    pub fn encoding(&self) -> Option<TextEncoding> {
        match self {
            Bom::None => None,
            Bom::Utf8 => Some(TextEncoding::Utf8),
            Bom::Utf16Le => Some(TextEncoding::Utf16Le),
            Bom::Utf16Be => Some(TextEncoding::Utf16Be),
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Bom::None => "None",
            Bom::Utf8 => "UTF-8",
            Bom::Utf16Le => "UTF-16LE",
            Bom::Utf16Be => "UTF-16BE",
        }
    }
}

impl fmt::Display for Bom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Bom {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Bom::None),
            "utf8" | "utf-8" => Ok(Bom::Utf8),
            "utf16le" | "utf-16le" => Ok(Bom::Utf16Le),
            "utf16be" | "utf-16be" => Ok(Bom::Utf16Be),
            _ => Err(Error::detection(format!("unknown BOM '{}'", s))),
        }
    }
}
