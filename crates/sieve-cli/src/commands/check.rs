//! Check command - report rows with a missing or malformed identifier.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use sieve::{FormatCheck, IdentifierFormat, LoaderConfig, ReportFormat, Reporter};

use crate::cli::delimiter_byte;

pub fn run(
    file: PathBuf,
    column: String,
    pattern: Option<String>,
    format: ReportFormat,
    output: Option<PathBuf>,
    delimiter: char,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut check = FormatCheck::new()
        .with_column(&column)
        .with_loader(LoaderConfig::default().with_delimiter(delimiter_byte(delimiter)?));

    if let Some(ref p) = pattern {
        check = check.with_format(IdentifierFormat::new(p)?);
    }

    let result = check.run(&file)?;
    let rendered = Reporter::new(format).render(&result.sections())?;

    match output {
        Some(path) => {
            fs::write(&path, rendered)?;
            println!(
                "{} {}",
                "Checked".cyan().bold(),
                file.display().to_string().white()
            );
            println!(
                "  Missing '{}': {}",
                column,
                result.partition.missing.len().to_string().yellow()
            );
            println!(
                "  Improper format: {}",
                result.partition.improper.len().to_string().yellow()
            );
            if verbose {
                println!(
                    "  Valid: {}",
                    result
                        .classifications
                        .iter()
                        .filter(|c| c.is_valid())
                        .count()
                        .to_string()
                        .green()
                );
            }
            println!(
                "{} {}",
                "Saved to".green().bold(),
                path.display().to_string().white()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
