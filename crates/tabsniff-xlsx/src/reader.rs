//! XLSX reader

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use tabsniff_core::{Error as CoreError, Row, TextFormat};
use tabsniff_csv::{
    check_extension, CsvReadOptions, CsvReader, CsvResult, Enclosure, Separator,
    TabularDescriptor, TabularReader,
};

use crate::error::XlsxResult;
use crate::extractor::SpreadsheetExtractor;

/// Reads the first worksheet of an `.xlsx` file as rows.
///
/// Opening extracts the worksheet, writes it as canonical CSV into a
/// temporary directory owned by the reader, and reads that file with a
/// [`CsvReader`]. The directory is removed when the reader is dropped.
#[derive(Debug)]
pub struct XlsxReader {
    // declared before `scratch` so the file is closed before its directory goes
    csv: CsvReader,
    source: PathBuf,
    scratch: TempDir,
}

impl XlsxReader {
    /// Open an `.xlsx` file.
    ///
    /// Separator and enclosure are those of the canonical CSV; the other
    /// presets in `options` apply as for [`CsvReader::open`].
    pub fn open<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> XlsxResult<Self> {
        let path = path.as_ref();
        check_extension(path, "xlsx")?;

        if !path.exists() {
            return Err(CoreError::file_access(format!(
                "file does not exist: {}",
                path.display()
            ))
            .into());
        }

        let table = SpreadsheetExtractor::extract_file(path)?;

        let scratch = tempfile::Builder::new().prefix("tabsniff-").tempdir()?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sheet".to_string());
        let csv_path = scratch.path().join(format!("{}.csv", stem));

        table.write_csv(BufWriter::new(File::create(&csv_path)?))?;

        let options = CsvReadOptions {
            separator: Some(Separator::Comma),
            enclosure: Some(Enclosure::DoubleQuote),
            ..options.clone()
        };
        let csv = CsvReader::open(&csv_path, &options)?;

        log::debug!(
            "{}: converted {} rows to {}",
            path.display(),
            table.len(),
            csv_path.display()
        );

        Ok(Self {
            csv,
            source: path.to_path_buf(),
            scratch,
        })
    }

    /// The `.xlsx` file this reader was opened from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Directory holding the converted CSV
    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }

    /// Reader over the converted CSV
    pub fn csv(&self) -> &CsvReader {
        &self.csv
    }
}

impl TabularReader for XlsxReader {
    fn name(&self) -> &str {
        self.csv.name()
    }

    fn size(&self) -> u64 {
        self.csv.size()
    }

    fn text_format(&self) -> &TextFormat {
        self.csv.text_format()
    }

    fn descriptor(&self) -> &TabularDescriptor {
        self.csv.descriptor()
    }

    fn read_row(&mut self, index: usize) -> CsvResult<Row> {
        self.csv.read_row(index)
    }

    fn read_next_row(&mut self) -> CsvResult<Option<Row>> {
        self.csv.read_next_row()
    }

    fn rewind(&mut self) -> CsvResult<()> {
        self.csv.rewind()
    }

    fn lines_count(&mut self) -> CsvResult<usize> {
        self.csv.lines_count()
    }

    fn rows_count(&mut self) -> CsvResult<usize> {
        self.csv.rows_count()
    }

    fn set_convert_numbers(&mut self, convert: bool) {
        self.csv.set_convert_numbers(convert)
    }

    fn set_associative(&mut self, associative: bool) {
        self.csv.set_associative(associative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XlsxError;
    use crate::testing::{package, worksheet};
    use pretty_assertions::assert_eq;
    use tabsniff_core::{Bom, Field, TextEncoding};
    use tabsniff_csv::CsvError;

    fn write_package(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, data).unwrap();
        path
    }

    fn players() -> Vec<u8> {
        package(
            &worksheet(
                r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="s"><v>2</v></c></row>
<row r="2"><c r="A2" t="s"><v>3</v></c><c r="B2"><v>74</v></c><c r="C2"><v>180</v></c></row>
<row r="3"><c r="A3" t="s"><v>4</v></c><c r="C3"><v>215</v></c></row>"#,
            ),
            Some(&["name", "height", "weight", "Adam Donachie", "Paul Bako"]),
        )
    }

    #[test]
    fn test_open_reads_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_package(dir.path(), "players.xlsx", &players());

        let mut reader = XlsxReader::open(&path, &CsvReadOptions::default()).unwrap();

        assert_eq!(reader.text_format().bom, Bom::Utf8);
        assert_eq!(reader.text_format().encoding, TextEncoding::Utf8);
        assert!(reader.descriptor().has_header());
        assert_eq!(reader.descriptor().columns(), ["name", "height", "weight"]);
        assert_eq!(reader.rows_count().unwrap(), 2);
        assert_eq!(
            reader.read_row(1).unwrap().to_strings(),
            vec!["Paul Bako", "", "215"]
        );

        reader.set_convert_numbers(true);
        let row = reader.read_next_row().unwrap().unwrap();
        assert_eq!(row[1], Field::Int(74));
        assert!(reader.name().ends_with("players.csv"));
    }

    #[test]
    fn test_scratch_dir_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_package(dir.path(), "players.xlsx", &players());

        let reader = XlsxReader::open(&path, &CsvReadOptions::default()).unwrap();
        let scratch = reader.scratch_dir().to_path_buf();
        assert!(scratch.join("players.csv").exists());

        drop(reader);
        assert!(!scratch.exists());
    }

    #[test]
    fn test_open_rejects_extension() {
        let err = XlsxReader::open("players.xls", &CsvReadOptions::default()).unwrap_err();
        assert!(matches!(err, XlsxError::Csv(CsvError::InvalidExtension(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = XlsxReader::open(dir.path().join("none.xlsx"), &CsvReadOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            XlsxError::Csv(CsvError::Core(ref e)) if e.is_file_access()
        ));
    }

    #[test]
    fn test_open_empty_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_package(dir.path(), "empty.xlsx", &package(&worksheet(""), None));

        let err = XlsxReader::open(&path, &CsvReadOptions::default()).unwrap_err();
        assert!(matches!(err, XlsxError::EmptySheet));
    }
}
