//! Print the detected layout and the first rows of a tabular file
//!
//! ```text
//! cargo run --example describe -- players.csv
//! ```

use tabsniff::prelude::*;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data.csv".to_string());

    let mut reader = tabsniff::open(&path, &CsvReadOptions::default())?;
    print!("{}", reader.describe()?);

    reader.set_convert_numbers(true);
    reader.set_associative(true);

    for row in reader.rows().take(5) {
        let row = row?;
        for (name, value) in row.entries() {
            println!("  {}: {:?}", name, value);
        }
        println!();
    }

    Ok(())
}
