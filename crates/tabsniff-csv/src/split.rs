//! Splitting a single line into trimmed fields

use crate::error::CsvResult;
use crate::options::{Enclosure, Separator};

/// Splits lines according to a separator, enclosure and escape character
#[derive(Debug, Clone, Copy)]
pub struct FieldSplitter {
    separator: Separator,
    enclosure: Enclosure,
    escape: u8,
}

impl FieldSplitter {
    pub fn new(separator: Separator, enclosure: Enclosure, escape: char) -> Self {
        Self {
            separator,
            enclosure,
            escape: if escape.is_ascii() { escape as u8 } else { b'\\' },
        }
    }

    /// Split `line` into fields.
    ///
    /// An enclosed field may be preceded by whitespace (`"a", "b, c"`).
    /// Inside an enclosed field the escape character before the enclosure
    /// or before itself stands for that character; any other escape
    /// character is kept as is. Each field is trimmed of surrounding
    /// whitespace, and a field that was not enclosed also loses one
    /// enclosure character on each side. An empty line is a single empty
    /// field.
    pub fn split(&self, line: &str) -> CsvResult<Vec<String>> {
        let Some(enclosure) = self.enclosure.as_char() else {
            let fields = self.parse(line, None)?;
            return Ok(fields.iter().map(|field| field.trim().to_string()).collect());
        };

        let (normalized, enclosed) = self.normalize(line, enclosure);
        let fields = self.parse(&normalized, Some(enclosure as u8))?;

        Ok(fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let value = field.trim();
                if enclosed.get(i).copied().unwrap_or(false) {
                    value.to_string()
                } else {
                    strip_enclosure(value, enclosure)
                }
            })
            .collect())
    }

    fn parse(&self, line: &str, quote: Option<u8>) -> CsvResult<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.separator.as_byte())
            .quoting(quote.is_some())
            .quote(quote.unwrap_or(b'"'))
            .double_quote(true)
            .buffer_capacity(line.len().max(64))
            .from_reader(line.as_bytes());

        let mut record = csv::StringRecord::new();
        if !reader.read_record(&mut record)? {
            return Ok(vec![String::new()]);
        }

        Ok(record.iter().map(str::to_string).collect())
    }

    /// Rewrite `line` so every enclosed field starts with the enclosure and
    /// escapes inside it use the doubled-enclosure form. Also returns, per
    /// field, whether it was enclosed.
    fn normalize(&self, line: &str, enclosure: char) -> (String, Vec<bool>) {
        let separator = self.separator.as_char();
        let mut out = String::with_capacity(line.len());
        let mut enclosed = Vec::new();
        let mut rest = line;

        loop {
            let start = rest.trim_start_matches(|c: char| c.is_whitespace() && c != separator);
            match start.strip_prefix(enclosure) {
                Some(body) => {
                    out.push(enclosure);
                    rest = self.copy_enclosed(body, enclosure, &mut out);
                    enclosed.push(true);
                }
                None => enclosed.push(false),
            }

            match rest.find(separator) {
                Some(pos) => {
                    out.push_str(&rest[..pos]);
                    out.push(separator);
                    rest = &rest[pos + separator.len_utf8()..];
                }
                None => {
                    out.push_str(rest);
                    break;
                }
            }
        }

        (out, enclosed)
    }

    /// Copy an enclosed field body up to and including its closing
    /// enclosure; returns what follows it.
    fn copy_enclosed<'a>(&self, body: &'a str, enclosure: char, out: &mut String) -> &'a str {
        let escape = self.escape as char;
        let mut chars = body.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            let next = chars.peek().map(|&(_, n)| n);

            if c == escape && next == Some(enclosure) {
                chars.next();
                out.push(enclosure);
                out.push(enclosure);
            } else if c == escape && c != enclosure && next == Some(escape) {
                chars.next();
                out.push(escape);
            } else if c == enclosure {
                if next == Some(enclosure) {
                    chars.next();
                    out.push(enclosure);
                    out.push(enclosure);
                } else {
                    out.push(enclosure);
                    return &body[i + c.len_utf8()..];
                }
            } else {
                out.push(c);
            }
        }

        // unterminated: the field runs to the end of the line
        ""
    }
}

fn strip_enclosure(value: &str, enclosure: char) -> String {
    let value = value.strip_prefix(enclosure).unwrap_or(value);
    value.strip_suffix(enclosure).unwrap_or(value).to_string()
}
