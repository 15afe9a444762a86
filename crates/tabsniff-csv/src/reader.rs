//! CSV reader

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use std::sync::Arc;

use tabsniff_core::{ByteFile, Error as CoreError, Field, LineCursor, Row, TextFormat};

use crate::descriptor::{DescriptorBuilder, TabularDescriptor};
use crate::detect::TabularDetector;
use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use crate::split::FieldSplitter;
use crate::tabular::TabularReader;

/// Reads rows from a delimited text file whose structure is detected on open.
///
/// Detection happens once, in [`CsvReader::open`] or
/// [`CsvReader::auto_detect`]; the resulting [`TabularDescriptor`] is fixed
/// for the lifetime of the reader. Blank lines are not rows.
///
/// # Example
///
/// ```rust,no_run
/// use tabsniff_csv::{CsvReadOptions, CsvReader, TabularReader};
///
/// let mut reader = CsvReader::open("data.csv", &CsvReadOptions::default())?;
/// println!("{}", reader.describe()?);
///
/// while let Some(row) = reader.read_next_row()? {
///     println!("{:?}", row.to_strings());
/// }
/// # Ok::<(), tabsniff_csv::CsvError>(())
/// ```
#[derive(Debug)]
pub struct CsvReader<R = BufReader<File>> {
    lines: LineCursor<R>,
    descriptor: TabularDescriptor,
    splitter: FieldSplitter,
    columns: Arc<[String]>,
    convert_numbers: bool,
    associative: bool,
    rows_count: Option<usize>,
}

impl CsvReader<BufReader<File>> {
    /// Open a `.csv` file and detect its structure
    pub fn open<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Self> {
        let path = path.as_ref();
        check_extension(path, "csv")?;
        Self::auto_detect(ByteFile::open(path)?, options)
    }
}

impl<R: Read + Seek> CsvReader<R> {
    /// Detect text format and tabular structure of `file`.
    ///
    /// Presets in `options` are kept as they are; only the missing
    /// descriptor fields are detected.
    pub fn auto_detect(file: ByteFile<R>, options: &CsvReadOptions) -> CsvResult<Self> {
        let mut lines = LineCursor::new(file, &options.detect)?;

        let first = lines
            .read_current_line(true)?
            .filter(|line| !line.trim().is_empty())
            .ok_or_else(|| CoreError::detection("no columns found"))?;

        let separator = options
            .separator
            .unwrap_or_else(|| TabularDetector::detect_separator(&first));
        let enclosure = options
            .enclosure
            .unwrap_or_else(|| TabularDetector::detect_enclosure(&first));

        let mut builder = DescriptorBuilder::new();
        builder
            .set_separator(separator)?
            .set_enclosure(enclosure)?
            .set_escape(options.escape)?;

        let splitter = FieldSplitter::new(separator, enclosure, options.escape);

        let first_fields = splitter.split(&first)?;
        let columns_count = first_fields.len();

        let header = match options.header {
            Some(header) => header,
            None => {
                let second = match lines.scan_line(lines.data_start())? {
                    Some((_, next)) => next_content_line(&mut lines, next)?,
                    None => None,
                };
                let second_fields = match second {
                    Some(line) => Some(splitter.split(&line)?),
                    None => None,
                };
                TabularDetector::detect_header(&first_fields, second_fields.as_deref())
            }
        };
        builder.set_header(header)?;

        let columns = match &options.columns {
            Some(columns) => {
                if columns.len() != columns_count {
                    return Err(CsvError::ColumnCountMismatch {
                        found: columns.len(),
                        expected: columns_count,
                    });
                }
                columns.clone()
            }
            None if header => first_fields,
            None => TabularDetector::synthetic_columns(columns_count),
        };
        builder.set_columns(columns)?;

        let descriptor = builder.build()?;

        if descriptor.has_header() {
            lines.read_next_line()?;
        }

        log::debug!(
            "{}: separator {}, enclosure {}, header {}, {} columns",
            lines.name(),
            descriptor.separator(),
            descriptor.enclosure(),
            descriptor.has_header(),
            descriptor.columns_count()
        );

        Ok(Self {
            columns: descriptor.columns().to_vec().into(),
            lines,
            descriptor,
            splitter,
            convert_numbers: options.convert_numbers,
            associative: options.associative,
            rows_count: None,
        })
    }

    /// Offset of the first data row
    fn rows_start(&mut self) -> CsvResult<u64> {
        let start = self.lines.data_start();
        if !self.descriptor.has_header() {
            return Ok(start);
        }

        Ok(match self.lines.scan_line(start)? {
            Some((_, next)) => next,
            None => start,
        })
    }

    /// Convert one line into a row of exactly `columns_count` fields
    pub fn line_to_row(&self, line: &str) -> CsvResult<Row> {
        let values = self.splitter.split(line)?;

        if values.len() != self.descriptor.columns_count() {
            return Err(CsvError::ColumnCountMismatch {
                found: values.len(),
                expected: self.descriptor.columns_count(),
            });
        }

        let fields: Vec<Field> = values
            .into_iter()
            .map(|value| {
                if self.convert_numbers {
                    Field::convert(value)
                } else {
                    Field::Text(value)
                }
            })
            .collect();

        Ok(if self.associative {
            Row::keyed(fields, self.columns.clone())
        } else {
            Row::new(fields)
        })
    }

    /// Underlying line cursor
    pub fn lines(&self) -> &LineCursor<R> {
        &self.lines
    }

    pub fn convert_numbers(&self) -> bool {
        self.convert_numbers
    }

    pub fn associative(&self) -> bool {
        self.associative
    }
}

impl<R: Read + Seek> TabularReader for CsvReader<R> {
    fn name(&self) -> &str {
        self.lines.name()
    }

    fn size(&self) -> u64 {
        self.lines.size()
    }

    fn text_format(&self) -> &TextFormat {
        self.lines.format()
    }

    fn descriptor(&self) -> &TabularDescriptor {
        &self.descriptor
    }

    /// Row `index` counted over non-blank lines after the header.
    ///
    /// Replays the file from the first row; the sequential position is not
    /// affected.
    fn read_row(&mut self, index: usize) -> CsvResult<Row> {
        if let Some(count) = self.rows_count {
            if index >= count {
                return Err(CsvError::RowOutOfBounds { index, count });
            }
        }

        let mut offset = self.rows_start()?;
        let mut current = 0;

        while let Some((line, next)) = self.lines.scan_line(offset)? {
            if !line.is_empty() {
                if current == index {
                    return self.line_to_row(&line);
                }
                current += 1;
            }
            offset = next;
        }

        Err(CsvError::RowOutOfBounds {
            index,
            count: current,
        })
    }

    fn read_next_row(&mut self) -> CsvResult<Option<Row>> {
        loop {
            match self.lines.read_next_line()? {
                Some(line) if line.is_empty() => continue,
                Some(line) => return self.line_to_row(&line).map(Some),
                None => return Ok(None),
            }
        }
    }

    fn rewind(&mut self) -> CsvResult<()> {
        self.lines.rewind();
        if self.descriptor.has_header() {
            self.lines.read_next_line()?;
        }
        Ok(())
    }

    fn lines_count(&mut self) -> CsvResult<usize> {
        Ok(self.lines.lines_count()?)
    }

    fn rows_count(&mut self) -> CsvResult<usize> {
        if let Some(count) = self.rows_count {
            return Ok(count);
        }

        let header = usize::from(self.descriptor.has_header());
        let count = self.lines.lines_count()?.saturating_sub(header);

        self.rows_count = Some(count);
        Ok(count)
    }

    fn set_convert_numbers(&mut self, convert: bool) {
        self.convert_numbers = convert;
    }

    fn set_associative(&mut self, associative: bool) {
        self.associative = associative;
    }
}

/// First non-blank line at or after `offset`
fn next_content_line<R: Read + Seek>(
    lines: &mut LineCursor<R>,
    mut offset: u64,
) -> CsvResult<Option<String>> {
    while let Some((line, next)) = lines.scan_line(offset)? {
        if !line.is_empty() {
            return Ok(Some(line));
        }
        offset = next;
    }
    Ok(None)
}

/// Fail unless `path` has the extension `expected` (case-insensitive)
pub fn check_extension(path: &Path, expected: &str) -> CsvResult<()> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();

    if extension.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(CsvError::InvalidExtension(extension))
    }
}
