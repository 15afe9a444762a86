//! A1-style cell references

use crate::error::{XlsxError, XlsxResult};

/// Maximum number of columns in a worksheet (XFD)
pub const MAX_COLUMNS: usize = 16_384;

/// 0-based column index of a cell reference such as `B7` or `AA12`.
///
/// The `$` absolute markers are ignored.
pub fn column_index(reference: &str) -> XlsxResult<usize> {
    let letters: String = reference
        .chars()
        .filter(|c| *c != '$')
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();

    letters_to_column(&letters)
        .map_err(|_| XlsxError::InvalidFormat(format!("invalid cell reference '{}'", reference)))
}

/// Convert column letters (A, B, ..., Z, AA, ...) to a 0-based index
pub fn letters_to_column(letters: &str) -> XlsxResult<usize> {
    if letters.is_empty() {
        return Err(XlsxError::InvalidFormat("empty column letters".into()));
    }

    let mut col: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(XlsxError::InvalidFormat(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        col = col * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);

        if col > MAX_COLUMNS {
            return Err(XlsxError::InvalidFormat(format!(
                "column '{}' out of bounds",
                letters
            )));
        }
    }

    Ok(col - 1)
}
