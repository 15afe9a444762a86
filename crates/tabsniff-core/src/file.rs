//! Bounded byte access to a file

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Error, Result};

/// A seekable byte source with a known size and a single read cursor.
///
/// Every read is bounds-checked against the size captured at open time:
/// a read that would cross end-of-file fails instead of returning a short
/// buffer.
#[derive(Debug)]
pub struct ByteFile<R = BufReader<File>> {
    name: String,
    inner: R,
    size: u64,
    offset: u64,
}

impl ByteFile<BufReader<File>> {
    /// Open a file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::file_access(format!(
                "file does not exist: {}",
                path.display()
            )));
        }

        let file = File::open(path)?;
        Self::from_reader(path.display().to_string(), BufReader::new(file))
    }
}

impl<R: Read + Seek> ByteFile<R> {
    /// Wrap an arbitrary seekable reader; `name` is used for display only
    pub fn from_reader<S: Into<String>>(name: S, mut inner: R) -> Result<Self> {
        let size = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;

        Ok(Self {
            name: name.into(),
            inner,
            size,
            offset: 0,
        })
    }

    /// Display name (the path for files opened from disk)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Current cursor position
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Move the cursor to an absolute offset
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        if offset > self.size {
            return Err(Error::file_access(format!(
                "seek out of bounds {} / {}",
                offset, self.size
            )));
        }

        self.inner.seek(SeekFrom::Start(offset))?;
        self.offset = offset;
        Ok(())
    }

    /// Read exactly `length` bytes at the cursor and advance it
    pub fn read(&mut self, length: usize) -> Result<Vec<u8>> {
        if length == 0 {
            return Err(Error::file_access("invalid length 0"));
        }

        let end = self.offset + length as u64;
        if end > self.size {
            return Err(Error::file_access(format!(
                "read out of bounds {} / {}",
                end, self.size
            )));
        }

        let mut buf = vec![0u8; length];
        self.inner.read_exact(&mut buf)?;
        self.offset = end;

        Ok(buf)
    }

    /// Seek to `offset`, then read exactly `length` bytes
    pub fn read_at(&mut self, offset: u64, length: usize) -> Result<Vec<u8>> {
        if self.offset != offset {
            self.seek(offset)?;
        }
        self.read(length)
    }

    /// Read without moving the cursor
    pub fn peek(&mut self, length: usize) -> Result<Vec<u8>> {
        let saved = self.offset;
        let bytes = self.read(length);
        self.seek(saved)?;
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn bytes(data: &[u8]) -> ByteFile<Cursor<Vec<u8>>> {
        ByteFile::from_reader("memory", Cursor::new(data.to_vec())).unwrap()
    }

    #[test]
    fn test_size_and_sequential_reads() {
        let mut file = bytes(b"hello world");
        assert_eq!(file.size(), 11);

        assert_eq!(file.read(5).unwrap(), b"hello");
        assert_eq!(file.offset(), 5);
        assert_eq!(file.read(6).unwrap(), b" world");
        assert_eq!(file.offset(), 11);
    }

    #[test]
    fn test_read_rejects_zero_length() {
        let mut file = bytes(b"abc");
        assert!(file.read(0).unwrap_err().is_file_access());
    }

    #[test]
    fn test_read_past_end_fails_without_moving() {
        let mut file = bytes(b"abc");
        file.seek(2).unwrap();

        let err = file.read(2).unwrap_err();
        assert!(matches!(err, Error::FileAccess(_)));
        assert_eq!(file.offset(), 2);
    }

    #[test]
    fn test_peek_keeps_cursor() {
        let mut file = bytes(b"abcdef");
        file.seek(1).unwrap();

        assert_eq!(file.peek(3).unwrap(), b"bcd");
        assert_eq!(file.offset(), 1);
        assert_eq!(file.read_at(4, 2).unwrap(), b"ef");
        assert_eq!(file.offset(), 6);
    }

    #[test]
    fn test_seek_out_of_bounds() {
        let mut file = bytes(b"abc");
        assert!(file.seek(3).is_ok());
        assert!(file.seek(4).is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let err = ByteFile::open("/definitely/not/here.csv").unwrap_err();
        assert!(err.is_file_access());
    }
}
