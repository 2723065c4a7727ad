//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sieve::{ReportFormat, Strategy, DEFAULT_IDENTIFIER_COLUMN};

/// Sieve: missing-value imputation and identifier checks for CSV data
#[derive(Parser)]
#[command(name = "sieve")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill missing values in one or more CSV files
    Fill(FillArgs),

    /// Report rows with a missing or malformed identifier
    Check {
        /// Path to the data file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Identifier column to check
        #[arg(short, long, default_value = DEFAULT_IDENTIFIER_COLUMN)]
        column: String,

        /// Expected identifier pattern (regex, matched against the whole value)
        #[arg(long)]
        pattern: Option<String>,

        /// Report format
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,
    },

    /// Show per-column missing value counts
    Inspect {
        /// Path to the data file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field delimiter
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,
    },
}

#[derive(Args)]
pub struct FillArgs {
    /// Input files (resolved against --base-dir when given)
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory input file names are relative to
    #[arg(short, long)]
    pub base_dir: Option<PathBuf>,

    /// Directory for filled_ outputs
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Imputation strategy (mean, median, mode)
    #[arg(short, long)]
    pub strategy: Option<Strategy>,

    /// Stop at the first file that fails
    #[arg(long)]
    pub fail_fast: bool,

    /// Number of rows to preview before processing (0 disables)
    #[arg(long)]
    pub preview: Option<usize>,

    /// Field delimiter
    #[arg(short, long)]
    pub delimiter: Option<char>,
}

/// Convert a delimiter flag to the byte the CSV layer expects.
pub fn delimiter_byte(delimiter: char) -> Result<u8, String> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(format!("Delimiter must be a single ASCII character, got '{}'", delimiter))
    }
}
