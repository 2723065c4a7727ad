//! Sieve: data-quality pipelines for tabular datasets.
//!
//! Two independent pipelines run over CSV files:
//!
//! - **Missing values**: count absent values per column, fill them with the
//!   column mean, median or mode, check that nothing is left absent, and write
//!   a `filled_` copy of the file.
//! - **Identifier format**: flag records whose identifier is missing or does
//!   not look like `12AB` (two digits, two letters), and report both groups.
//!
//! # Example
//!
//! ```no_run
//! use sieve::{FillConfig, FillPipeline, Strategy};
//!
//! let config = FillConfig::default()
//!     .with_base_dir("data")
//!     .with_files(["survey.csv"])
//!     .with_strategy(Strategy::Median);
//!
//! let summary = FillPipeline::new(config).run().unwrap();
//! println!("Filled {} file(s)", summary.succeeded.len());
//! ```

pub mod error;
pub mod identifier;
pub mod input;
pub mod missing;
pub mod output;

mod pipeline;

pub use error::{Result, SieveError};
pub use identifier::{IdentifierClassification, IdentifierFormat, Partition};
pub use input::{Dataset, Loader, LoaderConfig, Number, SourceMetadata, Value};
pub use missing::{ensure_complete, ColumnFill, Imputer, MissingValueReport, Strategy};
pub use output::{ReportFormat, ReportSection, Reporter, Writer};
pub use pipeline::{
    BatchSummary, ErrorPolicy, FileFailure, FileOutcome, FillConfig, FillEvent, FillPipeline,
    FormatCheck, FormatCheckResult, DEFAULT_IDENTIFIER_COLUMN, DEFAULT_PREVIEW_ROWS,
    IMPROPER_TITLE, MISSING_TITLE,
};
