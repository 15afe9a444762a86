//! CSV options

use std::fmt;
use std::str::FromStr;

use tabsniff_core::DetectOptions;

use crate::error::{CsvError, CsvResult};

/// Field separator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Separator {
    Comma,
    Semicolon,
    Tab,
}

impl Separator {
    pub fn as_char(&self) -> char {
        match self {
            Separator::Comma => ',',
            Separator::Semicolon => ';',
            Separator::Tab => '\t',
        }
    }

    pub fn as_byte(&self) -> u8 {
        self.as_char() as u8
    }

    /// Display name (`tab` for the tab character)
    pub fn name(&self) -> &'static str {
        match self {
            Separator::Comma => ",",
            Separator::Semicolon => ";",
            Separator::Tab => "tab",
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Separator {
    type Err = CsvError;

    fn from_str(s: &str) -> CsvResult<Self> {
        match s {
            "," | "comma" => Ok(Separator::Comma),
            ";" | "semicolon" => Ok(Separator::Semicolon),
            "\t" | "tab" => Ok(Separator::Tab),
            _ => Err(CsvError::InvalidSetting(format!("unknown separator '{}'", s))),
        }
    }
}

/// Character wrapping a field so it may contain separators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Enclosure {
    None,
    DoubleQuote,
    SingleQuote,
}

impl Enclosure {
    pub fn as_char(&self) -> Option<char> {
        match self {
            Enclosure::None => None,
            Enclosure::DoubleQuote => Some('"'),
            Enclosure::SingleQuote => Some('\''),
        }
    }

    /// Display name (`none` when fields are not enclosed)
    pub fn name(&self) -> &'static str {
        match self {
            Enclosure::None => "none",
            Enclosure::DoubleQuote => "\"",
            Enclosure::SingleQuote => "'",
        }
    }
}

impl fmt::Display for Enclosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Enclosure {
    type Err = CsvError;

    fn from_str(s: &str) -> CsvResult<Self> {
        match s {
            "" | "none" => Ok(Enclosure::None),
            "\"" | "double" => Ok(Enclosure::DoubleQuote),
            "'" | "single" => Ok(Enclosure::SingleQuote),
            _ => Err(CsvError::InvalidSetting(format!("unknown enclosure '{}'", s))),
        }
    }
}

/// Default escape character inside enclosed fields
pub const DEFAULT_ESCAPE: char = '\\';

/// Options for reading CSV files.
///
/// `separator`, `enclosure`, `header` and `columns` are presets: when set,
/// detection keeps them instead of guessing.
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Field separator (default: detected)
    pub separator: Option<Separator>,
    /// Enclosure character (default: detected)
    pub enclosure: Option<Enclosure>,
    /// Escape character inside enclosed fields
    pub escape: char,
    /// Whether the first line is a header (default: detected)
    pub header: Option<bool>,
    /// Column names (default: header line or `column N`)
    pub columns: Option<Vec<String>>,
    /// Convert numeric-looking fields to numbers
    pub convert_numbers: bool,
    /// Return rows keyed by column name
    pub associative: bool,
    /// Text format detection
    pub detect: DetectOptions,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            separator: None,
            enclosure: None,
            escape: DEFAULT_ESCAPE,
            header: None,
            columns: None,
            convert_numbers: false,
            associative: false,
            detect: DetectOptions::default(),
        }
    }
}
