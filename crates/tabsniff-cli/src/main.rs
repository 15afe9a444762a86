//! tabsniff CLI - inspect and read CSV/XLSX files without knowing their layout

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tabsniff::prelude::*;
use tabsniff::{SpreadsheetExtractor, TextFormat};

#[derive(Parser)]
#[command(name = "tabsniff")]
#[command(
    author,
    version,
    about = "Detect the layout of tabular files and read their rows"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the detected format and structure of a file
    Info {
        /// Input file (csv, xlsx)
        input: PathBuf,

        /// Print the description as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        read: ReadArgs,
    },

    /// Print every row, one per line
    Rows {
        /// Input file (csv, xlsx)
        input: PathBuf,

        #[command(flatten)]
        read: ReadArgs,
    },

    /// Print a single row by index (0-based, header excluded)
    Row {
        /// Input file (csv, xlsx)
        input: PathBuf,

        /// Row index
        index: usize,

        #[command(flatten)]
        read: ReadArgs,
    },

    /// Convert the first worksheet of an XLSX file to CSV
    Convert {
        /// Input spreadsheet file
        input: PathBuf,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Presets that override detection
#[derive(Args)]
struct ReadArgs {
    /// Field separator: `,`, `;`, `tab`
    #[arg(short, long)]
    separator: Option<Separator>,

    /// Enclosure: `"`, `'`, `none`
    #[arg(short, long)]
    enclosure: Option<Enclosure>,

    /// Force the text encoding (a byte order mark still wins)
    #[arg(long)]
    encoding: Option<TextEncoding>,

    /// The first line is a header
    #[arg(long, conflicts_with = "no_header")]
    header: bool,

    /// The first line is data
    #[arg(long)]
    no_header: bool,

    /// Convert numeric-looking fields to numbers
    #[arg(short = 'n', long)]
    convert_numbers: bool,

    /// Print rows keyed by column name
    #[arg(short, long)]
    associative: bool,
}

impl ReadArgs {
    fn options(&self) -> CsvReadOptions {
        let header = match (self.header, self.no_header) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        let mut options = CsvReadOptions {
            separator: self.separator,
            enclosure: self.enclosure,
            header,
            convert_numbers: self.convert_numbers,
            associative: self.associative,
            ..Default::default()
        };
        options.detect.encoding = self.encoding;
        options
    }
}

/// `info --json` output
#[derive(Serialize)]
struct Description<'a> {
    file: &'a str,
    size: u64,
    format: &'a TextFormat,
    lines_count: usize,
    rows_count: usize,
    descriptor: &'a TabularDescriptor,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input, json, read } => show_info(&input, json, &read),
        Commands::Rows { input, read } => print_rows(&input, &read),
        Commands::Row { input, index, read } => print_row(&input, index, &read),
        Commands::Convert { input, output } => convert(&input, output.as_deref()),
    }
}

fn open_reader(input: &Path, read: &ReadArgs) -> Result<Box<dyn TabularReader>> {
    tabsniff::open(input, &read.options())
        .with_context(|| format!("Failed to open '{}'", input.display()))
}

fn show_info(input: &Path, json: bool, read: &ReadArgs) -> Result<()> {
    let mut reader = open_reader(input, read)?;

    if !json {
        let description = reader.describe().context("Failed to describe file")?;
        print!("{}", description);
        return Ok(());
    }

    let lines_count = reader.lines_count().context("Failed to count lines")?;
    let rows_count = reader.rows_count().context("Failed to count rows")?;
    let description = Description {
        file: reader.name(),
        size: reader.size(),
        format: reader.text_format(),
        lines_count,
        rows_count,
        descriptor: reader.descriptor(),
    };

    let text = serde_json::to_string_pretty(&description).context("Failed to encode JSON")?;
    println!("{}", text);
    Ok(())
}

fn print_rows(input: &Path, read: &ReadArgs) -> Result<()> {
    let mut reader = open_reader(input, read)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut count = 0usize;
    while let Some(row) = reader
        .read_next_row()
        .with_context(|| format!("Failed to read row {}", count))?
    {
        write_row(&mut out, &row)?;
        count += 1;
    }

    out.flush().context("Failed to write to stdout")?;
    log::info!("printed {} rows", count);
    Ok(())
}

fn print_row(input: &Path, index: usize, read: &ReadArgs) -> Result<()> {
    let mut reader = open_reader(input, read)?;
    let row = reader
        .read_row(index)
        .with_context(|| format!("Failed to read row {}", index))?;

    let mut out = io::stdout().lock();
    write_row(&mut out, &row)
}

fn write_row<W: Write>(out: &mut W, row: &Row) -> Result<()> {
    let line = if row.is_keyed() {
        row.entries()
            .map(|(name, field)| format!("{}={}", name, field))
            .collect::<Vec<_>>()
            .join("\t")
    } else {
        row.to_strings().join("\t")
    };

    writeln!(out, "{}", line).context("Failed to write to stdout")
}

fn convert(input: &Path, output: Option<&Path>) -> Result<()> {
    let table = SpreadsheetExtractor::extract_file(input)
        .with_context(|| format!("Failed to extract '{}'", input.display()))?;

    if let Some(output_path) = output {
        let file = std::fs::File::create(output_path)
            .with_context(|| format!("Failed to create '{}'", output_path.display()))?;
        table
            .write_csv(BufWriter::new(file))
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Wrote {} rows to '{}'", table.len(), output_path.display());
    } else {
        table
            .write_csv(io::stdout().lock())
            .context("Failed to write to stdout")?;
    }

    Ok(())
}
