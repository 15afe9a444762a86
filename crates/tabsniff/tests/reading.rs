//! Row access properties shared by every reader

mod common;

use pretty_assertions::assert_eq;
use tabsniff::prelude::*;

use common::{mac_sample, write_file};

fn open_sample(name: &str, data: &[u8]) -> (tempfile::TempDir, Box<dyn TabularReader>) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), name, data);
    let reader = tabsniff::open(&path, &CsvReadOptions::default()).unwrap();
    (dir, reader)
}

#[test]
fn test_read_row_zero_matches_first_next_row() {
    let (_dir, mut with_header) = open_sample("header.csv", &mac_sample());
    assert!(with_header.descriptor().has_header());
    let first = with_header.read_row(0).unwrap();
    assert_eq!(with_header.read_next_row().unwrap(), Some(first));

    let (_dir, mut without_header) = open_sample("plain.csv", b"1,2\n3,4\n5,6\n");
    assert!(!without_header.descriptor().has_header());
    let first = without_header.read_row(0).unwrap();
    assert_eq!(without_header.read_next_row().unwrap(), Some(first));
}

#[test]
fn test_counts_are_idempotent_and_keep_position() {
    let (_dir, mut reader) = open_sample("header.csv", &mac_sample());

    let first = reader.read_next_row().unwrap().unwrap();
    assert_eq!(first[0], Field::text("May"));

    assert_eq!(reader.lines_count().unwrap(), 9);
    assert_eq!(reader.rows_count().unwrap(), 8);
    assert_eq!(reader.lines_count().unwrap(), 9);
    assert_eq!(reader.rows_count().unwrap(), 8);

    let second = reader.read_next_row().unwrap().unwrap();
    assert_eq!(second[0], Field::text("Jun"));
}

#[test]
fn test_sequential_rows_cover_the_file() {
    let (_dir, mut reader) = open_sample("header.csv", &mac_sample());

    let months: Vec<String> = reader
        .rows()
        .map(|row| row.unwrap()[0].to_string())
        .collect();
    assert_eq!(
        months,
        vec!["May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
    );
    assert_eq!(reader.read_next_row().unwrap(), None);

    reader.rewind().unwrap();
    assert_eq!(reader.read_next_row().unwrap().unwrap()[0], Field::text("May"));
}

#[test]
fn test_out_of_bounds_row_is_structural() {
    let (_dir, mut reader) = open_sample("header.csv", &mac_sample());

    let err = reader.read_row(8).unwrap_err();
    assert!(err.is_structural());

    // reader stays usable
    assert!(reader.read_row(7).is_ok());
}

#[test]
fn test_numbers_and_keyed_rows() {
    let (_dir, mut reader) = open_sample("header.csv", &mac_sample());
    reader.set_convert_numbers(true);
    reader.set_associative(true);

    let row = reader.read_row(0).unwrap();
    assert_eq!(row.get_by_name("Month"), Some(&Field::text("May")));
    assert_eq!(row.get_by_name("Average"), Some(&Field::Float(0.1)));
    assert_eq!(row.get_by_name("2013"), Some(&Field::Int(0)));
    assert_eq!(row.entries().count(), 13);
}

#[test]
fn test_presets_override_detection() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "plain.csv", b"1,2\n3,4\n");

    let options = CsvReadOptions {
        header: Some(true),
        ..Default::default()
    };
    let mut reader = tabsniff::open(&path, &options).unwrap();

    assert!(reader.descriptor().has_header());
    assert_eq!(reader.descriptor().columns(), ["1", "2"]);
    assert_eq!(reader.rows_count().unwrap(), 1);
}
