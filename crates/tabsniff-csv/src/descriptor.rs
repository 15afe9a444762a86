//! Tabular structure of a delimited file

use crate::error::{CsvError, CsvResult};
use crate::options::{Enclosure, Separator, DEFAULT_ESCAPE};

/// Detected (or preset) structure of a delimited file.
///
/// Built once through [`DescriptorBuilder`] and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabularDescriptor {
    separator: Separator,
    enclosure: Enclosure,
    escape: char,
    header: bool,
    columns: Vec<String>,
}

impl TabularDescriptor {
    pub fn separator(&self) -> Separator {
        self.separator
    }

    pub fn enclosure(&self) -> Enclosure {
        self.enclosure
    }

    pub fn escape(&self) -> char {
        self.escape
    }

    /// Whether the first line holds column names
    pub fn has_header(&self) -> bool {
        self.header
    }

    /// Column names, one per position
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn columns_count(&self) -> usize {
        self.columns.len()
    }
}

/// Collects descriptor fields; each field can be set exactly once.
#[derive(Debug, Default, Clone)]
pub struct DescriptorBuilder {
    separator: Option<Separator>,
    enclosure: Option<Enclosure>,
    escape: Option<char>,
    header: Option<bool>,
    columns: Option<Vec<String>>,
}

fn set_once<T>(slot: &mut Option<T>, value: T, name: &'static str) -> CsvResult<()> {
    if slot.is_some() {
        return Err(CsvError::AlreadySet(name));
    }
    *slot = Some(value);
    Ok(())
}

impl DescriptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_separator(&mut self, separator: Separator) -> CsvResult<&mut Self> {
        set_once(&mut self.separator, separator, "separator")?;
        Ok(self)
    }

    pub fn set_enclosure(&mut self, enclosure: Enclosure) -> CsvResult<&mut Self> {
        set_once(&mut self.enclosure, enclosure, "enclosure")?;
        Ok(self)
    }

    /// Escape must be a single ASCII character
    pub fn set_escape(&mut self, escape: char) -> CsvResult<&mut Self> {
        if !escape.is_ascii() {
            return Err(CsvError::InvalidSetting(format!(
                "escape '{}' is not ASCII",
                escape
            )));
        }
        set_once(&mut self.escape, escape, "escape")?;
        Ok(self)
    }

    pub fn set_header(&mut self, header: bool) -> CsvResult<&mut Self> {
        set_once(&mut self.header, header, "header")?;
        Ok(self)
    }

    pub fn set_columns(&mut self, columns: Vec<String>) -> CsvResult<&mut Self> {
        if columns.is_empty() {
            return Err(CsvError::InvalidSetting("columns cannot be empty".into()));
        }
        set_once(&mut self.columns, columns, "columns")?;
        Ok(self)
    }

    pub fn separator(&self) -> Option<Separator> {
        self.separator
    }

    pub fn enclosure(&self) -> Option<Enclosure> {
        self.enclosure
    }

    pub fn escape(&self) -> Option<char> {
        self.escape
    }

    pub fn header(&self) -> Option<bool> {
        self.header
    }

    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    /// Finish the descriptor; escape defaults to a backslash
    pub fn build(self) -> CsvResult<TabularDescriptor> {
        let missing = |name: &str| CsvError::InvalidSetting(format!("{} not set", name));

        Ok(TabularDescriptor {
            separator: self.separator.ok_or_else(|| missing("separator"))?,
            enclosure: self.enclosure.ok_or_else(|| missing("enclosure"))?,
            escape: self.escape.unwrap_or(DEFAULT_ESCAPE),
            header: self.header.ok_or_else(|| missing("header"))?,
            columns: self.columns.ok_or_else(|| missing("columns"))?,
        })
    }
}
