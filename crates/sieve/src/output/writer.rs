//! CSV serialisation of datasets.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, SieveError};
use crate::input::Dataset;

/// Prefix given to the file names of filled outputs.
pub const FILLED_PREFIX: &str = "filled_";

/// Writes datasets as delimited text.
pub struct Writer {
    delimiter: u8,
}

impl Writer {
    /// Create a comma-separated writer.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Write `data` to `path`, replacing any existing file.
    pub fn write(&self, data: &Dataset, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let io_error = |source: io::Error| SieveError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let file = File::create(path).map_err(io_error)?;
        self.write_to(data, BufWriter::new(file))?;

        info!(path = %path.display(), rows = data.row_count(), "wrote dataset");
        Ok(())
    }

    /// Write `data` to any writer. Absent cells become empty fields.
    pub fn write_to<W: io::Write>(&self, data: &Dataset, writer: W) -> Result<()> {
        let mut out = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        out.write_record(&data.headers)?;
        for row in &data.rows {
            out.write_record(row.iter().map(|v| v.to_string()))?;
        }
        out.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

/// Output path for a filled copy of `input` inside `output_dir`.
pub fn filled_path(output_dir: &Path, input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}{}", FILLED_PREFIX, name))
}
