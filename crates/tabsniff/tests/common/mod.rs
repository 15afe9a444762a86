//! Fixture builders shared by the integration tests

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Write `data` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

/// Monthly averages, comma separated, double quoted header, `\r` endings
pub fn mac_sample() -> Vec<u8> {
    let lines = [
        r#""Month", "Average", "2005", "2006", "2007", "2008", "2009", "2010", "2011", "2012", "2013", "2014", "2015""#,
        r#""May",  0.1,  0,  0, 1, 1, 0, 0, 0, 2, 0,  0,  0  "#,
        r#""Jun",  0.5,  2,  1, 1, 0, 0, 1, 1, 2, 2,  0,  1"#,
        r#""Jul",  0.7,  5,  1, 1, 2, 0, 1, 3, 0, 2,  2,  1"#,
        r#""Aug",  2.3,  6,  3, 2, 4, 4, 4, 7, 8, 2,  2,  3"#,
        r#""Sep",  3.5,  6,  4, 7, 4, 2, 8, 5, 2, 5,  2,  5"#,
        r#""Oct",  2.0,  8,  0, 1, 3, 2, 5, 1, 5, 2,  3,  0"#,
        r#""Nov",  0.5,  3,  0, 0, 1, 1, 0, 1, 0, 1,  0,  1"#,
        r#""Dec",  0.0,  1,  0, 1, 0, 0, 0, 0, 0, 0,  0,  1"#,
    ];

    let mut data = String::new();
    for line in lines {
        data.push_str(line);
        data.push('\r');
    }
    data.into_bytes()
}

/// Players roster in UTF-16LE with a byte order mark and `\r\n` endings
pub fn utf16le_sample() -> Vec<u8> {
    let text = "Name,Team,Position,Height(inches),Weight(lbs),Age\r\n\
        小林 竜也,BAL,Catcher,74,180,22.99\r\n\
        Paul Bako,BAL,Catcher,74,215,34.69\r\n\
        Ramon Hernandez,BAL,Catcher,72,210,30.78\r\n";

    let mut data = vec![0xFF, 0xFE];
    data.extend(text.encode_utf16().flat_map(|unit| unit.to_le_bytes()));
    data
}

/// French monthly averages in Windows-1252, semicolon separated, single quoted
pub fn windows1252_sample() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"'mois';'moyenne';'2005';'2006'\r");
    data.extend_from_slice(b"'f\xE9vr';0.5;0;1\r");
    data.extend_from_slice(b"'ao\xFBt';1.5;2;0\r");
    data
}

/// Worksheet document around `rows` (the content of `sheetData`)
pub fn worksheet(rows: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><dimension ref="A1:E8"/><sheetData>{}</sheetData></worksheet>"#,
        rows
    )
}

/// XLSX package with one worksheet and a shared strings table
pub fn xlsx_package(sheet: &str, shared: &[&str]) -> Vec<u8> {
    let items: String = shared
        .iter()
        .map(|s| format!("<si><t>{}</t></si>", s))
        .collect();
    let sst = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{1}</sst>"#,
        shared.len(),
        items
    );

    let mut buf = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buf));
        let options = SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#).unwrap();

        zip.start_file("xl/workbook.xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/><sheet name="Sheet2" sheetId="2" r:id="rId2"/></sheets></workbook>"#).unwrap();

        zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
        zip.write_all(sheet.as_bytes()).unwrap();

        // second sheet is never read
        zip.start_file("xl/worksheets/sheet2.xml", options).unwrap();
        zip.write_all(worksheet(r#"<row><c r="A1"><v>ignored</v></c></row>"#).as_bytes())
            .unwrap();

        zip.start_file("xl/sharedStrings.xml", options).unwrap();
        zip.write_all(sst.as_bytes()).unwrap();

        zip.finish().unwrap();
    }
    buf
}

/// Five columns, seven rows, the `empty` column never filled
pub fn students_xlsx() -> Vec<u8> {
    let shared = [
        "name", "class", "weight", "empty", "height", "Alice", "Bob", "Carol", "Dave", "Erin",
        "Frank", "Grace", "A", "B",
    ];

    let mut rows = String::from(
        r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="s"><v>2</v></c><c r="D1" t="s"><v>3</v></c><c r="E1" t="s"><v>4</v></c></row>"#,
    );

    let data = [
        (5, 12, "52.5", "160"),
        (6, 13, "71", "181"),
        (7, 12, "58.2", "165"),
        (8, 13, "80", "178"),
        (9, 12, "49.9", "155"),
        (10, 13, "66", "172"),
        (11, 12, "61.3", "168"),
    ];

    for (i, (name, class, weight, height)) in data.iter().enumerate() {
        let r = i + 2;
        rows.push_str(&format!(
            r#"<row r="{r}"><c r="A{r}" t="s"><v>{name}</v></c><c r="B{r}" t="s"><v>{class}</v></c><c r="C{r}"><v>{weight}</v></c><c r="E{r}"><v>{height}</v></c></row>"#
        ));
    }

    xlsx_package(&worksheet(&rows), &shared)
}
