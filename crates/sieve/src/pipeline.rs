//! Pipeline drivers and their configuration.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, SieveError};
use crate::identifier::{classify_rows, IdentifierClassification, IdentifierFormat, Partition};
use crate::input::{Dataset, Loader, LoaderConfig, SourceMetadata};
use crate::missing::{ensure_complete, ColumnFill, Imputer, MissingValueReport, Strategy};
use crate::output::{filled_path, ReportSection, Writer};

/// Default number of rows shown before processing a file.
pub const DEFAULT_PREVIEW_ROWS: usize = 20;

/// Identifier column checked by default.
pub const DEFAULT_IDENTIFIER_COLUMN: &str = "Serial Number";

pub const MISSING_TITLE: &str = "Rows with Missing Serial Numbers";
pub const IMPROPER_TITLE: &str = "Rows with Improper Data Structure";

/// What to do when one file of a batch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Record the failure and move on to the next file.
    #[default]
    Continue,
    /// Stop at the first failure.
    FailFast,
}

/// Configuration for the missing-value pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Directory input file names are resolved against.
    pub base_dir: Option<PathBuf>,
    /// Input files, relative to `base_dir` when set.
    pub files: Vec<PathBuf>,
    /// Imputation strategy.
    pub strategy: Strategy,
    /// Where `filled_` outputs go (default: `base_dir`, else next to each input).
    pub output_dir: Option<PathBuf>,
    /// Behaviour when a file fails.
    pub error_policy: ErrorPolicy,
    /// Rows captured for the pre-processing preview.
    pub preview_rows: usize,
    /// Field delimiter for reading and writing.
    #[serde(skip)]
    pub loader: LoaderConfig,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            files: Vec::new(),
            strategy: Strategy::default(),
            output_dir: None,
            error_policy: ErrorPolicy::default(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            loader: LoaderConfig::default(),
        }
    }
}

impl FillConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SieveError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SieveError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    /// Check the configuration before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(SieveError::Config("no input files configured".to_string()));
        }
        Ok(())
    }

    /// Full path of a configured input file.
    pub fn input_path(&self, file: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(file),
            None => file.to_path_buf(),
        }
    }

    /// Output path for the filled copy of `input`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let dir = self
            .output_dir
            .clone()
            .or_else(|| self.base_dir.clone())
            .or_else(|| input.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        filled_path(&dir, input)
    }
}

/// Everything produced for one successfully processed file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub source: SourceMetadata,
    /// Absent counts before filling.
    pub report: MissingValueReport,
    /// First rows of the file as loaded.
    pub preview: Dataset,
    pub strategy: Strategy,
    pub fills: Vec<ColumnFill>,
    /// Where the filled copy was written.
    pub output: PathBuf,
}

/// Progress of one file through [`FillPipeline::run_with`].
#[derive(Debug, Clone, Copy)]
pub enum FillEvent<'a> {
    /// Loaded and counted, before any value is filled.
    Analyzed {
        source: &'a SourceMetadata,
        report: &'a MissingValueReport,
        preview: &'a Dataset,
    },
    /// Filled, validated and written.
    Filled(&'a FileOutcome),
    Failed(&'a FileFailure),
}

/// A file that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    pub file: PathBuf,
    pub error: SieveError,
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.error)
    }
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: Vec<FileOutcome>,
    pub failed: Vec<FileFailure>,
    /// Files not attempted because the run stopped early.
    pub skipped: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

/// Load, analyze, impute, validate and write each configured file.
pub struct FillPipeline {
    config: FillConfig,
    loader: Loader,
    imputer: Imputer,
    writer: Writer,
}

impl FillPipeline {
    pub fn new(config: FillConfig) -> Self {
        let loader = Loader::with_config(config.loader.clone());
        let imputer = Imputer::new(config.strategy);
        let writer = Writer::with_delimiter(config.loader.delimiter);

        Self {
            config,
            loader,
            imputer,
            writer,
        }
    }

    pub fn config(&self) -> &FillConfig {
        &self.config
    }

    /// Run one file through the whole pipeline, stopping at its first error.
    pub fn run_file(&self, input: &Path) -> Result<FileOutcome> {
        self.process(input, &mut |_| {})
    }

    fn process(
        &self,
        input: &Path,
        on_event: &mut dyn FnMut(FillEvent<'_>),
    ) -> Result<FileOutcome> {
        info!("Analyzing {}...", input.display());
        let (dataset, source) = self.loader.load(input)?;

        let report = MissingValueReport::analyze(&dataset);
        let preview = dataset.head(self.config.preview_rows);
        on_event(FillEvent::Analyzed {
            source: &source,
            report: &report,
            preview: &preview,
        });

        let imputed = self.imputer.impute(&dataset)?;
        ensure_complete(&imputed.dataset)?;

        let output = self.config.output_path(input);
        self.writer.write(&imputed.dataset, &output)?;

        info!(
            "Filled missing values using {} strategy and saved to {}",
            self.config.strategy,
            output.display()
        );

        Ok(FileOutcome {
            source,
            report,
            preview,
            strategy: self.config.strategy,
            fills: imputed.fills,
            output,
        })
    }

    /// Process every configured file under the configured error policy.
    pub fn run(&self) -> Result<BatchSummary> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), reporting each stage to `on_event` as it happens.
    pub fn run_with<F>(&self, mut on_event: F) -> Result<BatchSummary>
    where
        F: FnMut(FillEvent<'_>),
    {
        self.config.validate()?;

        let mut summary = BatchSummary::default();
        let inputs: Vec<PathBuf> = self
            .config
            .files
            .iter()
            .map(|f| self.config.input_path(f))
            .collect();

        for (idx, input) in inputs.iter().enumerate() {
            match self.process(input, &mut on_event) {
                Ok(outcome) => {
                    on_event(FillEvent::Filled(&outcome));
                    summary.succeeded.push(outcome);
                }
                Err(error) => {
                    let failure = FileFailure {
                        file: input.clone(),
                        error,
                    };
                    warn!("{}", failure);
                    on_event(FillEvent::Failed(&failure));
                    summary.failed.push(failure);

                    if self.config.error_policy == ErrorPolicy::FailFast {
                        summary.skipped = inputs[idx + 1..].to_vec();
                        break;
                    }
                }
            }
        }

        debug!(
            succeeded = summary.succeeded.len(),
            failed = summary.failed.len(),
            skipped = summary.skipped.len(),
            "batch finished"
        );
        Ok(summary)
    }
}

/// Result of checking one file's identifiers.
#[derive(Debug, Clone)]
pub struct FormatCheckResult {
    pub dataset: Dataset,
    pub classifications: Vec<IdentifierClassification>,
    pub partition: Partition,
}

impl FormatCheckResult {
    /// Records whose identifier is absent, original fields only.
    pub fn missing_rows(&self) -> Dataset {
        self.dataset.select_rows(&self.partition.missing)
    }

    /// Records whose identifier is present but malformed, original fields only.
    pub fn improper_rows(&self) -> Dataset {
        self.dataset.select_rows(&self.partition.improper)
    }

    /// The two titled report sections, empty ones included.
    pub fn sections(&self) -> Vec<ReportSection> {
        vec![
            ReportSection::new(MISSING_TITLE, self.missing_rows()),
            ReportSection::new(IMPROPER_TITLE, self.improper_rows()),
        ]
    }
}

/// Flags records with a missing or malformed identifier.
pub struct FormatCheck {
    column: String,
    format: IdentifierFormat,
    loader: Loader,
}

impl FormatCheck {
    pub fn new() -> Self {
        Self {
            column: DEFAULT_IDENTIFIER_COLUMN.to_string(),
            format: IdentifierFormat::default(),
            loader: Loader::new(),
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    pub fn with_format(mut self, format: IdentifierFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_loader(mut self, config: LoaderConfig) -> Self {
        self.loader = Loader::with_config(config);
        self
    }

    /// Load `path` and classify every record.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<FormatCheckResult> {
        let (dataset, _) = self.loader.load(path)?;
        self.check(dataset)
    }

    /// Classify every record of an already loaded dataset.
    pub fn check(&self, dataset: Dataset) -> Result<FormatCheckResult> {
        let classifications = classify_rows(&dataset, &self.column, &self.format)?;
        let partition = Partition::from_classifications(&classifications);

        info!(
            column = %self.column,
            missing = partition.missing.len(),
            improper = partition.improper.len(),
            "identifier check finished"
        );

        Ok(FormatCheckResult {
            dataset,
            classifications,
            partition,
        })
    }
}

impl Default for FormatCheck {
    fn default() -> Self {
        Self::new()
    }
}
