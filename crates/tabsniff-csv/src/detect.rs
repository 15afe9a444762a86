//! Heuristic detection of separator, enclosure and header

use tabsniff_core::Field;

use crate::options::{Enclosure, Separator};

/// Separator candidates; on equal counts the earlier entry wins.
pub const SEPARATORS: [Separator; 3] = [Separator::Comma, Separator::Semicolon, Separator::Tab];

/// Enclosure candidates; on equal counts the earlier entry wins.
pub const ENCLOSURES: [Enclosure; 2] = [Enclosure::DoubleQuote, Enclosure::SingleQuote];

/// Lowercased terms that commonly appear as column names
pub const HEADER_KEYWORDS: &[&str] = &[
    "name",
    "firstname",
    "lastname",
    "date",
    "year",
    "month",
    "day",
    "hour",
    "time",
    "time zone",
    "length",
    "size",
    "average",
    "description",
    "currency",
    "gross",
    "fee",
    "net",
    "balance",
    "type",
    "status",
    "title",
    "phone",
    "phone number",
    "start date",
    "end date",
];

/// Infers the tabular structure of a file from its first lines
pub struct TabularDetector;

impl TabularDetector {
    /// The candidate that occurs most often in `line`.
    ///
    /// Ties, including a line without any candidate, go to the first
    /// entry of [`SEPARATORS`].
    pub fn detect_separator(line: &str) -> Separator {
        most_frequent(&SEPARATORS, |separator| {
            line.matches(separator.as_char()).count()
        })
    }

    /// The quote character that occurs most often in `line`, or
    /// [`Enclosure::None`] when neither occurs.
    ///
    /// Ties go to the first entry of [`ENCLOSURES`].
    pub fn detect_enclosure(line: &str) -> Enclosure {
        let count = |enclosure: Enclosure| {
            enclosure
                .as_char()
                .map(|c| line.matches(c).count())
                .unwrap_or(0)
        };

        if ENCLOSURES.iter().all(|e| count(*e) == 0) {
            return Enclosure::None;
        }

        most_frequent(&ENCLOSURES, count)
    }

    /// Guess whether `first` is a header row.
    ///
    /// Scores keyword matches and numeric fields: the first row is a header
    /// when the second row has more numeric fields than it does, or when
    /// its keyword matches outnumber its numeric fields. This is a
    /// heuristic, not a classifier.
    pub fn detect_header(first: &[String], second: Option<&[String]>) -> bool {
        let keywords = first
            .iter()
            .filter(|field| HEADER_KEYWORDS.contains(&field.to_lowercase().as_str()))
            .count();

        let numeric = count_numeric(first);
        let numeric_second = second.map(count_numeric).unwrap_or(0);

        log::debug!(
            "header score: {} keywords, {} numeric, {} numeric in second row",
            keywords,
            numeric,
            numeric_second
        );

        if numeric_second > numeric {
            return true;
        }

        keywords > numeric
    }

    /// Synthetic names for files without a header
    pub fn synthetic_columns(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("column {}", i)).collect()
    }
}

fn count_numeric(fields: &[String]) -> usize {
    fields.iter().filter(|field| Field::is_numeric(field)).count()
}

/// First candidate with the highest score
fn most_frequent<T: Copy>(candidates: &[T], score: impl Fn(T) -> usize) -> T {
    let mut best = candidates[0];
    let mut best_score = score(best);

    for &candidate in &candidates[1..] {
        let candidate_score = score(candidate);
        if candidate_score > best_score {
            best = candidate;
            best_score = candidate_score;
        }
    }

    best
}
