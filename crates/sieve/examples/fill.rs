//! Example: fill missing values in one CSV file and report serial numbers.
//!
//! Usage:
//!   cargo run --example fill -- <file_path> [mean|median|mode]

use std::env;
use std::path::Path;

use sieve::{
    output::render_text, FillConfig, FillPipeline, FormatCheck, SieveError, Strategy,
};

fn main() -> sieve::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example fill -- <file_path> [mean|median|mode]");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let strategy: Strategy = match args.get(2) {
        Some(s) => s.parse()?,
        None => Strategy::default(),
    };

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("Sieve: {}", path.display());
    println!("{}", separator);

    let config = FillConfig::default()
        .with_files([path])
        .with_strategy(strategy);
    let summary = FillPipeline::new(config).run()?;

    for outcome in &summary.succeeded {
        for line in outcome.report.lines() {
            println!("  {}", line);
        }
        println!();
        print!("{}", render_text("Preview", &outcome.preview));
        println!();
        println!(
            "Filled missing values using {} strategy and saved to {}",
            outcome.strategy,
            outcome.output.display()
        );
    }
    for failure in &summary.failed {
        eprintln!("Failed: {}", failure);
    }

    match FormatCheck::new().run(path) {
        Ok(result) => {
            println!();
            for section in result.sections() {
                print!("{}", render_text(&section.title, &section.table));
                println!();
            }
        }
        Err(SieveError::MissingColumn { column }) => {
            println!("\nNo '{}' column; skipping the identifier check.", column);
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
