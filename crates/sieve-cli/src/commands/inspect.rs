//! Inspect command - show per-column missing value counts.

use std::path::PathBuf;

use colored::Colorize;
use sieve::{Loader, LoaderConfig, MissingValueReport};

use crate::cli::delimiter_byte;

pub fn run(file: PathBuf, delimiter: char, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let loader = Loader::with_config(LoaderConfig::default().with_delimiter(delimiter_byte(delimiter)?));
    let (dataset, source) = loader.load(&file)?;

    println!(
        "{} {}...",
        "Analyzing".cyan().bold(),
        file.display().to_string().white()
    );
    if verbose {
        println!(
            "  {} rows, {} columns ({})",
            source.row_count, source.column_count, source.hash.dimmed()
        );
    }

    let report = MissingValueReport::count(&dataset);
    for line in report.lines() {
        println!("  {}", line);
    }

    let total = report.total();
    if total == 0 {
        println!("{}", "No missing values found.".green());
    } else {
        println!(
            "Total: {} missing across {} column(s)",
            total.to_string().yellow().bold(),
            report.columns_with_missing().count()
        );
    }

    Ok(())
}
