//! Fill command - impute missing values and write filled_ copies.

use colored::{ColoredString, Colorize};
use sieve::output::render_text;
use sieve::{
    Dataset, ErrorPolicy, FileOutcome, FillConfig, FillEvent, FillPipeline, MissingValueReport,
    SourceMetadata,
};

use crate::cli::{delimiter_byte, FillArgs};

pub fn run(args: FillArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(args)?;
    let pipeline = FillPipeline::new(config);

    println!(
        "{} {} file(s) using {} strategy",
        "Processing".cyan().bold(),
        pipeline.config().files.len().to_string().white().bold(),
        pipeline.config().strategy.to_string().white()
    );

    let preview_rows = pipeline.config().preview_rows;
    let summary = pipeline.run_with(|event| match event {
        FillEvent::Analyzed {
            source,
            report,
            preview,
        } => print_analysis(source, report, preview, preview_rows),
        FillEvent::Filled(outcome) => print_outcome(outcome, verbose),
        FillEvent::Failed(failure) => {
            eprintln!("{} {}", "Error:".red().bold(), failure);
        }
    })?;

    println!();
    println!(
        "{} {} succeeded, {} failed",
        "Done:".green().bold(),
        summary.succeeded.len().to_string().white().bold(),
        summary.failed.len().to_string().red()
    );
    for skipped in &summary.skipped {
        println!("  {} {} (not attempted)", "•".dimmed(), skipped.display());
    }

    if !summary.is_success() {
        return Err(format!(
            "{} of {} file(s) were not filled",
            summary.failed.len() + summary.skipped.len(),
            pipeline.config().files.len()
        )
        .into());
    }

    Ok(())
}

/// Merge the optional config file with command-line flags.
fn build_config(args: FillArgs) -> Result<FillConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => FillConfig::load(path)?,
        None => FillConfig::default(),
    };

    if !args.files.is_empty() {
        config.files = args.files;
    }
    if let Some(dir) = args.base_dir {
        config.base_dir = Some(dir);
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = Some(dir);
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if args.fail_fast {
        config.error_policy = ErrorPolicy::FailFast;
    }
    if let Some(rows) = args.preview {
        config.preview_rows = rows;
    }
    if let Some(d) = args.delimiter {
        config.loader = config.loader.with_delimiter(delimiter_byte(d)?);
    }

    config.validate()?;
    Ok(config)
}

fn print_analysis(
    source: &SourceMetadata,
    report: &MissingValueReport,
    preview: &Dataset,
    preview_rows: usize,
) {
    println!();
    println!(
        "{} {}...",
        "Analyzing".cyan().bold(),
        source.path.display().to_string().white()
    );
    for line in count_lines(report) {
        println!("  {}", line);
    }

    if preview_rows > 0 {
        println!();
        print!("{}", render_text("Sample data before processing:", preview));
    }
}

/// The report's own lines, green for complete columns and yellow otherwise.
fn count_lines(report: &MissingValueReport) -> Vec<ColoredString> {
    report
        .lines()
        .into_iter()
        .zip(report.counts.values())
        .map(|(line, &count)| if count == 0 { line.green() } else { line.yellow() })
        .collect()
}

fn print_outcome(outcome: &FileOutcome, verbose: bool) {
    if verbose {
        for fill in &outcome.fills {
            println!(
                "  {} {} <- {} ({} cell(s))",
                "•".dimmed(),
                fill.column.cyan(),
                fill.fill_value,
                fill.values_filled
            );
        }
    }

    println!("{}", "Validation passed: No missing values found.".green());
    println!(
        "Filled missing values using {} strategy and saved to {}",
        outcome.strategy,
        outcome.output.display().to_string().white().bold()
    );
}
