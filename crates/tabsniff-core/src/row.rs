//! Row types

use std::ops::Index;
use std::sync::Arc;

use crate::field::Field;

/// One row of fields, optionally keyed by column names.
///
/// Column names are positional: two columns may share a name, in which
/// case [`Row::get_by_name`] returns the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    fields: Vec<Field>,
    columns: Option<Arc<[String]>>,
}

impl Row {
    /// Create a positional row
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            columns: None,
        }
    }

    /// Create a row keyed by `columns`; both must have the same length
    pub fn keyed(fields: Vec<Field>, columns: Arc<[String]>) -> Self {
        debug_assert_eq!(fields.len(), columns.len());
        Self {
            fields,
            columns: Some(columns),
        }
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at a position
    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Field under a column name (keyed rows only)
    pub fn get_by_name(&self, name: &str) -> Option<&Field> {
        let columns = self.columns.as_ref()?;
        let index = columns.iter().position(|c| c == name)?;
        self.fields.get(index)
    }

    pub fn is_keyed(&self) -> bool {
        self.columns.is_some()
    }

    /// Column names of a keyed row
    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    /// `(name, field)` pairs in column order; empty for positional rows
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.columns
            .iter()
            .flat_map(|columns| columns.iter())
            .map(String::as_str)
            .zip(self.fields.iter())
    }

    /// Every field rendered as text
    pub fn to_strings(&self) -> Vec<String> {
        self.fields.iter().map(ToString::to_string).collect()
    }
}

impl Index<usize> for Row {
    type Output = Field;

    fn index(&self, index: usize) -> &Field {
        &self.fields[index]
    }
}

impl From<Vec<Field>> for Row {
    fn from(fields: Vec<Field>) -> Self {
        Row::new(fields)
    }
}
