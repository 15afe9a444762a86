//! Shared strings table (`xl/sharedStrings.xml`)

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::XlsxResult;

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode characters XML cannot carry as is:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
pub fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("_x") {
        result.push_str(&rest[..start]);
        let candidate = &rest[start..];

        match parse_escape(candidate) {
            Some(decoded) => {
                result.push(decoded);
                rest = &candidate[7..];
            }
            None => {
                result.push('_');
                rest = &candidate[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// `_xHHHH_` at the start of `s`
fn parse_escape(s: &str) -> Option<char> {
    let bytes = s.as_bytes();
    if bytes.len() < 7 || bytes[6] != b'_' {
        return None;
    }

    let hex = s.get(2..6)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

/// Parse a shared strings part into an index-addressable list.
///
/// One entry per `si`, in document order. Rich text entries concatenate
/// their `r/t` runs; phonetic guides (`rPh`) are left out.
pub fn read_shared_strings<R: BufRead>(reader: R) -> XlsxResult<Vec<String>> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut current = String::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"si" {
                    current.clear();
                }
                path.push(name);
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"si" {
                    strings.push(String::new());
                }
            }
            Event::End(e) => {
                path.pop();
                if e.local_name().as_ref() == b"si" {
                    strings.push(decode_excel_escapes(&current));
                    current.clear();
                }
            }
            Event::Text(e) if in_string_text(&path) => {
                current.push_str(&e.unescape()?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    log::debug!("read {} shared strings", strings.len());
    Ok(strings)
}

fn in_string_text(path: &[Vec<u8>]) -> bool {
    path.last().map_or(false, |last| last == b"t")
        && path.iter().any(|name| name == b"si")
        && !path.iter().any(|name| name == b"rPh")
}
