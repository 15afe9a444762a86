//! Reader capability shared by every tabular source

use tabsniff_core::{Row, TextFormat};

use crate::descriptor::TabularDescriptor;
use crate::error::CsvResult;

/// A detected tabular source that yields rows.
///
/// Implemented by [`CsvReader`](crate::CsvReader) and by adapters that
/// convert another format into CSV first.
pub trait TabularReader {
    /// Display name of the file rows are read from
    fn name(&self) -> &str;

    /// Size in bytes of the file rows are read from
    fn size(&self) -> u64;

    fn text_format(&self) -> &TextFormat;

    fn descriptor(&self) -> &TabularDescriptor;

    /// Row `index` (0-based, header excluded)
    fn read_row(&mut self, index: usize) -> CsvResult<Row>;

    /// Next row in sequence, `None` at end of file
    fn read_next_row(&mut self) -> CsvResult<Option<Row>>;

    /// Move sequential reading back to the first row
    fn rewind(&mut self) -> CsvResult<()>;

    /// Non-empty lines in the file, header included
    fn lines_count(&mut self) -> CsvResult<usize>;

    /// Data rows in the file
    fn rows_count(&mut self) -> CsvResult<usize>;

    fn set_convert_numbers(&mut self, convert: bool);

    fn set_associative(&mut self, associative: bool);

    /// Summary of the file and its detected structure, one `key: value`
    /// per line
    fn describe(&mut self) -> CsvResult<String> {
        let lines_count = self.lines_count()?;
        let rows_count = self.rows_count()?;
        let format = *self.text_format();
        let descriptor = self.descriptor();

        let lines = [
            format!("file: {}", self.name()),
            format!("size: {}", self.size()),
            format!("BOM: {}", format.bom),
            format!("encoding: {}", format.encoding),
            format!("line ending: {}", format.line_ending),
            format!("lines count: {}", lines_count),
            format!("separator: {}", descriptor.separator()),
            format!("enclosure: {}", descriptor.enclosure()),
            format!("header: {}", descriptor.has_header()),
            format!("rows count: {}", rows_count),
            format!(
                "columns ({}): {}",
                descriptor.columns_count(),
                descriptor.columns().join(", ")
            ),
        ];

        Ok(lines.iter().map(|line| format!("{}\n", line)).collect())
    }

    /// Iterate the remaining rows in sequence
    fn rows(&mut self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows {
            reader: self,
            done: false,
        }
    }
}

impl<T: TabularReader + ?Sized> TabularReader for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn size(&self) -> u64 {
        (**self).size()
    }

    fn text_format(&self) -> &TextFormat {
        (**self).text_format()
    }

    fn descriptor(&self) -> &TabularDescriptor {
        (**self).descriptor()
    }

    fn read_row(&mut self, index: usize) -> CsvResult<Row> {
        (**self).read_row(index)
    }

    fn read_next_row(&mut self) -> CsvResult<Option<Row>> {
        (**self).read_next_row()
    }

    fn rewind(&mut self) -> CsvResult<()> {
        (**self).rewind()
    }

    fn lines_count(&mut self) -> CsvResult<usize> {
        (**self).lines_count()
    }

    fn rows_count(&mut self) -> CsvResult<usize> {
        (**self).rows_count()
    }

    fn set_convert_numbers(&mut self, convert: bool) {
        (**self).set_convert_numbers(convert)
    }

    fn set_associative(&mut self, associative: bool) {
        (**self).set_associative(associative)
    }

    fn describe(&mut self) -> CsvResult<String> {
        (**self).describe()
    }
}

/// Iterator over the remaining rows of a [`TabularReader`].
///
/// Stops after the first error.
pub struct Rows<'a, T: ?Sized> {
    reader: &'a mut T,
    done: bool,
}

impl<'a, T: TabularReader + ?Sized> Iterator for Rows<'a, T> {
    type Item = CsvResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.read_next_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
