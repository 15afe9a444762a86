//! Line-at-a-time reading over a detected text format

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::error::{Error, Result};
use crate::file::ByteFile;
use crate::format::{find_aligned, DetectOptions, FormatDetector, TextFormat};

/// A saved sequential position, see [`LineCursor::checkpoint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(u64);

impl Checkpoint {
    /// Byte offset of the saved position
    pub fn offset(&self) -> u64 {
        self.0
    }
}

/// Reads decoded lines from a [`ByteFile`].
///
/// The cursor keeps one persisted position used by sequential reads. Every
/// other read (peeks, random access, counting) goes through
/// [`LineCursor::scan_line`], which takes an explicit offset and never
/// touches that position.
#[derive(Debug)]
pub struct LineCursor<R = BufReader<File>> {
    file: ByteFile<R>,
    format: TextFormat,
    terminator: Vec<u8>,
    chunk_size: usize,
    position: u64,
    lines_count: Option<usize>,
}

impl LineCursor<BufReader<File>> {
    /// Open a file and detect its format
    pub fn open<P: AsRef<Path>>(path: P, options: &DetectOptions) -> Result<Self> {
        Self::new(ByteFile::open(path)?, options)
    }
}

impl<R: Read + Seek> LineCursor<R> {
    /// Detect the format of `file` and position the cursor at the data start
    pub fn new(mut file: ByteFile<R>, options: &DetectOptions) -> Result<Self> {
        let format = FormatDetector::new(options.clone()).detect(&mut file)?;
        Ok(Self::with_format(file, format, options.chunk_size))
    }

    /// Use an already known format
    pub fn with_format(file: ByteFile<R>, format: TextFormat, chunk_size: usize) -> Self {
        Self {
            file,
            terminator: format.terminator(),
            format,
            chunk_size: chunk_size.max(1),
            position: format.start_offset(),
            lines_count: None,
        }
    }

    /// Display name of the underlying file
    pub fn name(&self) -> &str {
        self.file.name()
    }

    /// File size in bytes
    pub fn size(&self) -> u64 {
        self.file.size()
    }

    pub fn format(&self) -> &TextFormat {
        &self.format
    }

    /// Offset of the first data byte
    pub fn data_start(&self) -> u64 {
        self.format.start_offset()
    }

    /// Persisted sequential position
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.0;
    }

    /// Move the sequential position back to the data start
    pub fn rewind(&mut self) {
        self.position = self.data_start();
    }

    /// Read the line starting at `offset`.
    ///
    /// Returns the decoded line without its ending, and the offset just past
    /// the ending. `None` once `offset` reaches the end of the file.
    pub fn scan_line(&mut self, offset: u64) -> Result<Option<(String, u64)>> {
        let size = self.file.size();
        if offset >= size {
            return Ok(None);
        }

        let available = size - offset;
        let unit = self.format.encoding.unit_width();
        let mut buf: Vec<u8> = Vec::with_capacity(self.chunk_size);
        let mut searched = 0;

        loop {
            let remaining = available - buf.len() as u64;
            let length = remaining.min(self.chunk_size as u64) as usize;
            let chunk = self.file.read_at(offset + buf.len() as u64, length)?;
            buf.extend_from_slice(&chunk);

            if let Some(pos) = find_aligned(&buf, &self.terminator, searched, unit) {
                let next = offset + (pos + self.terminator.len()) as u64;
                return Ok(Some((self.decode(&buf[..pos]), next)));
            }

            if buf.len() as u64 == available {
                return Ok(Some((self.decode(&buf), size)));
            }

            // an ending may straddle the chunk boundary
            searched = buf.len().saturating_sub(self.terminator.len() - 1);
        }
    }

    /// Read the line at the persisted position.
    ///
    /// With `peek` the position is left unchanged; otherwise it moves past
    /// the line and its ending. `None` at end of file.
    pub fn read_current_line(&mut self, peek: bool) -> Result<Option<String>> {
        match self.scan_line(self.position)? {
            Some((line, next)) => {
                if !peek {
                    self.position = next;
                }
                Ok(Some(line))
            }
            None => Ok(None),
        }
    }

    /// Read the line at the persisted position and advance past it
    pub fn read_next_line(&mut self) -> Result<Option<String>> {
        self.read_current_line(false)
    }

    /// Read the physical line `index` (0-based, counted from the data start).
    ///
    /// Replays the file from the start, so the cost grows with `index`.
    /// The persisted position is not affected.
    pub fn read_line(&mut self, index: usize) -> Result<String> {
        let mut offset = self.data_start();
        let mut current = 0;

        loop {
            match self.scan_line(offset)? {
                Some((line, _)) if current == index => return Ok(line),
                Some((_, next)) => {
                    offset = next;
                    current += 1;
                }
                None => {
                    return Err(Error::LineOutOfBounds {
                        index,
                        count: current,
                    })
                }
            }
        }
    }

    /// Number of non-empty lines; computed once, then cached
    pub fn lines_count(&mut self) -> Result<usize> {
        if let Some(count) = self.lines_count {
            return Ok(count);
        }

        let mut offset = self.data_start();
        let mut count = 0;

        while let Some((line, next)) = self.scan_line(offset)? {
            if !line.is_empty() {
                count += 1;
            }
            offset = next;
        }

        self.lines_count = Some(count);
        Ok(count)
    }

    fn decode(&self, bytes: &[u8]) -> String {
        self.format
            .encoding
            .decode(bytes)
            .trim_matches(|c| c == '\r' || c == '\n')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Bom, LineEnding, TextEncoding};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn cursor(data: &[u8]) -> LineCursor<Cursor<Vec<u8>>> {
        let file = ByteFile::from_reader("memory", Cursor::new(data.to_vec())).unwrap();
        LineCursor::new(file, &DetectOptions::default()).unwrap()
    }

    fn utf16le_with_bom(text: &str) -> Vec<u8> {
        let mut data = vec![0xFF, 0xFE];
        data.extend(text.encode_utf16().flat_map(|u| u.to_le_bytes()));
        data
    }

    #[test]
    fn test_sequential_reads() {
        let mut lines = cursor(b"a,b\nc,d\ne,f");

        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some("a,b"));
        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some("c,d"));
        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some("e,f"));
        assert_eq!(lines.read_next_line().unwrap(), None);
        assert_eq!(lines.position(), lines.size());
    }

    #[test]
    fn test_trailing_ending_has_no_extra_line() {
        let mut lines = cursor(b"a\r\nb\r\n");

        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some("a"));
        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some("b"));
        assert_eq!(lines.read_next_line().unwrap(), None);
    }

    #[test]
    fn test_peek_keeps_position() {
        let mut lines = cursor(b"first\rsecond\r");
        let before = lines.checkpoint();

        assert_eq!(lines.read_current_line(true).unwrap().as_deref(), Some("first"));
        assert_eq!(lines.checkpoint(), before);
        assert_eq!(lines.read_current_line(false).unwrap().as_deref(), Some("first"));
        assert_eq!(lines.read_current_line(true).unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_line_longer_than_chunk() {
        let long = "x".repeat(250);
        let data = format!("{}\n{}\n", long, "short");
        let mut lines = cursor(data.as_bytes());

        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some(long.as_str()));
        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_ending_straddles_chunk_boundary() {
        let file =
            ByteFile::from_reader("memory", Cursor::new(b"abcd\r\nef\r\n".to_vec())).unwrap();
        let format = TextFormat {
            bom: Bom::None,
            encoding: TextEncoding::Ascii,
            line_ending: LineEnding::Windows,
        };
        let mut lines = LineCursor::with_format(file, format, 5);

        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some("abcd"));
        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some("ef"));
    }

    #[test]
    fn test_read_line_random_access() {
        let mut lines = cursor(b"zero\none\ntwo\n");
        lines.read_next_line().unwrap();
        let position = lines.position();

        assert_eq!(lines.read_line(2).unwrap(), "two");
        assert_eq!(lines.read_line(0).unwrap(), "zero");
        assert_eq!(lines.position(), position);
        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some("one"));
    }

    #[test]
    fn test_read_line_out_of_bounds() {
        let mut lines = cursor(b"zero\none\n");
        let err = lines.read_line(5).unwrap_err();
        assert!(matches!(err, Error::LineOutOfBounds { index: 5, count: 2 }));
    }

    #[test]
    fn test_lines_count_cached_and_non_destructive() {
        let mut lines = cursor(b"a\n\nb\nc\n");
        lines.read_next_line().unwrap();
        let before = lines.checkpoint();

        assert_eq!(lines.lines_count().unwrap(), 3);
        assert_eq!(lines.lines_count().unwrap(), 3);
        assert_eq!(lines.checkpoint(), before);
    }

    #[test]
    fn test_blank_line_is_empty_string() {
        let mut lines = cursor(b"a\n\nb\n");
        lines.read_next_line().unwrap();
        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some(""));
        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_utf16le_lines() {
        let data = utf16le_with_bom("名前,年齢\r\n小林 竜也,22\r\n");
        let mut lines = cursor(&data);

        assert_eq!(lines.data_start(), 2);
        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some("名前,年齢"));
        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some("小林 竜也,22"));
        assert_eq!(lines.read_next_line().unwrap(), None);
    }

    #[test]
    fn test_restore_checkpoint() {
        let mut lines = cursor(b"a\nb\n");
        let start = lines.checkpoint();
        lines.read_next_line().unwrap();
        lines.restore(start);
        assert_eq!(lines.read_next_line().unwrap().as_deref(), Some("a"));

        lines.rewind();
        assert_eq!(lines.position(), 0);
    }
}
