//! Worksheet rows as a dense table of strings

use std::io::{BufRead, Write};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tabsniff_csv::CsvWriter;

use crate::error::{XlsxError, XlsxResult};
use crate::reference::column_index;
use crate::shared_strings::decode_excel_escapes;

/// Rows of a worksheet.
///
/// Cells missing from the worksheet are empty strings, and rows narrower
/// than the first row are padded to its width. A wider row is kept as it
/// is; reading it back fails for that row alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpreadsheetTable {
    rows: Vec<Vec<String>>,
    columns_count: usize,
}

impl SpreadsheetTable {
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Width fixed by the first row
    pub fn columns_count(&self) -> usize {
        self.columns_count
    }

    /// Number of rows, header included
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as canonical CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> XlsxResult<()> {
        CsvWriter::write(&self.rows, writer)?;
        Ok(())
    }

    fn push_row(&mut self, mut row: Vec<String>, number: usize) {
        if self.rows.is_empty() {
            self.columns_count = row.len();
        } else if row.len() > self.columns_count {
            log::warn!(
                "row {} has {} cells, first row has {}",
                number,
                row.len(),
                self.columns_count
            );
        } else if row.len() < self.columns_count {
            log::warn!(
                "row {} padded from {} to {} cells",
                number,
                row.len(),
                self.columns_count
            );
            row.resize(self.columns_count, String::new());
        }

        self.rows.push(row);
    }
}

/// How the text of a cell is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    /// Index into the shared strings table
    Shared,
    /// Text held by the cell itself (`is/t`)
    Inline,
    /// Literal `v` text (numbers, booleans, formula results)
    Value,
}

/// Cell being read
struct PendingCell {
    kind: CellKind,
    text: String,
}

/// Worksheet traversal state
struct SheetState<'a> {
    shared: Option<&'a [String]>,
    path: Vec<Vec<u8>>,
    table: SpreadsheetTable,
    row: Option<Vec<String>>,
    cell: Option<PendingCell>,
    rows_seen: usize,
}

impl<'a> SheetState<'a> {
    fn new(shared: Option<&'a [String]>) -> Self {
        Self {
            shared,
            path: Vec::new(),
            table: SpreadsheetTable::default(),
            row: None,
            cell: None,
            rows_seen: 0,
        }
    }

    fn enter(&mut self, e: &BytesStart) -> XlsxResult<()> {
        match e.local_name().as_ref() {
            b"row" if self.in_sheet_data() => {
                self.rows_seen += 1;
                self.row = Some(Vec::new());
            }
            b"c" => {
                if let Some(row) = self.row.as_mut() {
                    let mut reference = None;
                    let mut kind = CellKind::Value;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"r" => reference = Some(attr.unescape_value()?.into_owned()),
                            b"t" => {
                                kind = match attr.unescape_value()?.as_ref() {
                                    "s" => CellKind::Shared,
                                    "inlineStr" => CellKind::Inline,
                                    _ => CellKind::Value,
                                }
                            }
                            _ => {}
                        }
                    }

                    let column = match reference {
                        Some(reference) => column_index(&reference)?,
                        None => row.len(),
                    };

                    if column < row.len() {
                        return Err(XlsxError::InvalidFormat(format!(
                            "cell in column {} out of order in row {}",
                            column + 1,
                            self.rows_seen
                        )));
                    }

                    // sparse cells: fill the gap, then a placeholder for this one
                    row.resize(column + 1, String::new());

                    self.cell = Some(PendingCell {
                        kind,
                        text: String::new(),
                    });
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn leave(&mut self, name: &[u8]) -> XlsxResult<()> {
        match name {
            b"c" => self.finish_cell(),
            b"row" => {
                self.finish_row();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn text(&mut self, text: &str) {
        let accepted = match self.cell.as_ref().map(|cell| cell.kind) {
            Some(CellKind::Inline) => {
                self.path_ends_with(&["c", "is", "t"]) || self.path_ends_with(&["is", "r", "t"])
            }
            Some(_) => self.path_ends_with(&["sheetData", "row", "c", "v"]),
            None => false,
        };

        if accepted {
            if let Some(cell) = self.cell.as_mut() {
                cell.text.push_str(text);
            }
        }
    }

    fn path_ends_with(&self, names: &[&str]) -> bool {
        self.path.len() >= names.len()
            && self.path[self.path.len() - names.len()..]
                .iter()
                .zip(names)
                .all(|(open, name)| open.as_slice() == name.as_bytes())
    }

    fn finish_cell(&mut self) -> XlsxResult<()> {
        let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) else {
            return Ok(());
        };

        let value = match cell.kind {
            CellKind::Shared if cell.text.is_empty() => String::new(),
            CellKind::Shared => {
                let shared = self.shared.ok_or_else(|| {
                    XlsxError::MissingPart("xl/sharedStrings.xml".to_string())
                })?;
                let index: usize = cell.text.trim().parse().map_err(|_| {
                    XlsxError::InvalidFormat(format!("invalid shared string index '{}'", cell.text))
                })?;
                shared.get(index).cloned().ok_or_else(|| {
                    XlsxError::InvalidFormat(format!(
                        "shared string index {} out of bounds ({} strings)",
                        index,
                        shared.len()
                    ))
                })?
            }
            CellKind::Inline => decode_excel_escapes(&cell.text),
            CellKind::Value => cell.text,
        };

        if let Some(last) = row.last_mut() {
            *last = value;
        }

        Ok(())
    }

    fn finish_row(&mut self) {
        let Some(row) = self.row.take() else {
            return;
        };

        // an empty first row cannot fix the table width
        if row.is_empty() && self.table.is_empty() {
            log::warn!("row {} has no cells, skipped", self.rows_seen);
            return;
        }

        self.table.push_row(row, self.rows_seen);
    }

    /// `<row/>` is not a row of the table
    fn discard_row(&mut self) {
        if self.row.take().is_some() {
            log::debug!("self-closing row {} skipped", self.rows_seen);
        }
    }

    fn in_sheet_data(&self) -> bool {
        self.path.last().map_or(false, |name| name == b"sheetData")
    }
}

/// Read the rows of a worksheet part.
///
/// `shared` is the shared strings table, if the package has one; a cell
/// referencing it when it is missing is an error.
pub fn read_worksheet<R: BufRead>(
    reader: R,
    shared: Option<&[String]>,
) -> XlsxResult<SpreadsheetTable> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut state = SheetState::new(shared);

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                state.enter(&e)?;
                state.path.push(e.local_name().as_ref().to_vec());
            }
            Event::Empty(e) => {
                // no End event follows, so the element opens and closes here
                state.enter(&e)?;
                if e.local_name().as_ref() == b"row" {
                    state.discard_row();
                } else {
                    state.leave(e.local_name().as_ref())?;
                }
            }
            Event::End(e) => {
                state.path.pop();
                state.leave(e.local_name().as_ref())?;
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                state.text(&text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if state.table.is_empty() {
        return Err(XlsxError::EmptySheet);
    }

    log::debug!(
        "worksheet: {} rows, {} columns",
        state.table.len(),
        state.table.columns_count()
    );

    Ok(state.table)
}
