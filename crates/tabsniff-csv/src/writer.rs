//! Canonical CSV writer

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tabsniff_core::Bom;

use crate::error::CsvResult;

/// Writes rows in the canonical form read back by
/// [`CsvReader`](crate::CsvReader).
///
/// The output is UTF-8 with a byte order mark, comma separated and `\n`
/// terminated. A field is enclosed in double quotes only when it contains
/// a double quote or a comma; inside the quotes a double quote or a
/// backslash is escaped with a backslash.
pub struct CsvWriter;

impl CsvWriter {
    /// Write rows to a file
    pub fn write_file<P, I, R, S>(rows: I, path: P) -> CsvResult<()>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let file = File::create(path)?;
        Self::write(rows, BufWriter::new(file))
    }

    /// Write rows to a writer.
    ///
    /// Carriage returns and line feeds inside a field become spaces, so
    /// every row stays on one line.
    pub fn write<W, I, R, S>(rows: I, mut writer: W) -> CsvResult<()>
    where
        W: Write,
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        writer.write_all(Bom::Utf8.bytes())?;

        // fields arrive already enclosed where needed
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b',')
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(writer);

        let mut count = 0usize;
        for row in rows {
            let record: Vec<String> = row
                .into_iter()
                .map(|field| enclose(&single_line(field.as_ref())).into_owned())
                .collect();
            csv_writer.write_record(&record)?;
            count += 1;
        }

        csv_writer.flush()?;
        log::debug!("wrote {} CSV rows", count);
        Ok(())
    }
}

fn single_line(field: &str) -> Cow<'_, str> {
    let is_break = |c: char| c == '\r' || c == '\n';
    if field.contains(is_break) {
        Cow::Owned(field.replace("\r\n", " ").replace(is_break, " "))
    } else {
        Cow::Borrowed(field)
    }
}

fn enclose(field: &str) -> Cow<'_, str> {
    if !field.contains(|c: char| c == '"' || c == ',') {
        return Cow::Borrowed(field);
    }

    let escaped = field.replace('\\', "\\\\").replace('"', "\\\"");
    Cow::Owned(format!("\"{}\"", escaped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::options::{Enclosure, Separator};
    use crate::split::FieldSplitter;

    fn write(rows: Vec<Vec<&str>>) -> Vec<u8> {
        let mut out = Vec::new();
        CsvWriter::write(rows, &mut out).unwrap();
        out
    }

    fn body(out: &[u8]) -> &str {
        std::str::from_utf8(&out[3..]).unwrap()
    }

    #[test]
    fn test_canonical_output() {
        let out = write(vec![
            vec!["name", "note"],
            vec!["a, b", r#"say "hi""#],
            vec!["plain", ""],
        ]);

        assert_eq!(&out[..3], Bom::Utf8.bytes());
        assert_eq!(body(&out), "name,note\n\"a, b\",\"say \\\"hi\\\"\"\nplain,\n");
    }

    #[test]
    fn test_backslash_alone_is_not_enclosed() {
        let out = write(vec![vec![r"C:\temp", "3"]]);
        assert_eq!(body(&out), "C:\\temp,3\n");
    }

    #[test]
    fn test_backslash_is_escaped_inside_enclosure() {
        let out = write(vec![vec![r"a, C:\dir\", "x"]]);
        assert_eq!(body(&out), "\"a, C:\\\\dir\\\\\",x\n");
    }

    #[test]
    fn test_other_characters_are_not_enclosed() {
        let out = write(vec![vec!["a;b", "6'2", "tab\there"]]);
        assert_eq!(body(&out), "a;b,6'2,tab\there\n");
    }

    #[test]
    fn test_line_breaks_become_spaces() {
        let out = write(vec![vec!["two\r\nlines", "x\ny"]]);
        assert_eq!(body(&out), "two lines,x y\n");
    }

    #[test]
    fn test_written_lines_split_back() {
        let row = vec![r#"say "hi""#, r"C:\temp", r"a, C:\dir\", r#"\"quoted\""#, "plain"];
        let out = write(vec![row.clone()]);

        let splitter = FieldSplitter::new(Separator::Comma, Enclosure::DoubleQuote, '\\');
        let fields = splitter.split(body(&out).trim_end_matches('\n')).unwrap();
        assert_eq!(fields, row);
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        CsvWriter::write_file(vec![vec!["x", "y"]], &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], Bom::Utf8.bytes());
        assert_eq!(&bytes[3..], b"x,y\n");
    }
}
