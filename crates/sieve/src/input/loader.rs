//! CSV loader producing a [`Dataset`].

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Result, SieveError};
use super::source::{Dataset, SourceMetadata, Value};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl LoaderConfig {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Reads delimited files with a header row.
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader for comma-separated input.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a file and return the dataset and its metadata.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SieveError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = fs::read(path).map_err(|e| SieveError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let source_name = path.display().to_string();
        let dataset = self.parse_bytes(&contents, &source_name)?;

        debug!(
            file = %source_name,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "loaded dataset"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            dataset.row_count(),
            dataset.column_count(),
        );

        Ok((dataset, metadata))
    }

    /// Parse in-memory delimited text.
    pub fn load_str(&self, text: &str) -> Result<Dataset> {
        self.parse_bytes(text.as_bytes(), "<memory>")
    }

    fn parse_bytes(&self, bytes: &[u8], source_name: &str) -> Result<Dataset> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let parse_error = |message: String| SieveError::Parse {
            source_name: source_name.to_string(),
            message,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| parse_error(e.to_string()))?
            .iter()
            .map(|s| s.to_string())
            .collect();

        if headers.is_empty() {
            return Err(parse_error("No columns to parse from file".to_string()));
        }

        let mut seen = HashSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(parse_error(format!("Duplicate column name '{}'", header)));
            }
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result.map_err(|e| parse_error(e.to_string()))?;

            if record.len() > expected_cols {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                return Err(parse_error(format!(
                    "Expected {} fields in line {}, saw {}",
                    expected_cols,
                    line,
                    record.len()
                )));
            }

            let mut row: Vec<Value> = record.iter().map(Value::parse).collect();
            // Short records are padded with absent values
            row.resize(expected_cols, Value::Absent);
            rows.push(row);
        }

        Ok(Dataset::new(headers, rows))
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv() {
        let data = Loader::new()
            .load_str("name,age,city\nAlice,30,NYC\nBob,,LA")
            .unwrap();

        assert_eq!(data.headers, vec!["name", "age", "city"]);
        assert_eq!(data.row_count(), 2);
        assert_eq!(data.get(0, 0), Some(&Value::Text("Alice".to_string())));
        assert_eq!(data.get(0, 1), Some(&Value::number(30.0)));
        assert_eq!(data.get(1, 1), Some(&Value::Absent));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let data = Loader::new().load_str("a,b,c\n1,2\n").unwrap();
        assert_eq!(
            data.rows[0],
            vec![Value::number(1.0), Value::number(2.0), Value::Absent]
        );
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let err = Loader::new().load_str("a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(err, SieveError::Parse { .. }));
        assert!(err.to_string().contains("Expected 2 fields"));
    }

    #[test]
    fn test_duplicate_headers_are_rejected() {
        let err = Loader::new().load_str("a,a\n1,2\n").unwrap_err();
        assert!(err.to_string().contains("Duplicate column name 'a'"));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = Loader::new().load_str("").unwrap_err();
        assert!(matches!(err, SieveError::Parse { .. }));
    }

    #[test]
    fn test_header_only_gives_empty_dataset() {
        let data = Loader::new().load_str("a,b\n").unwrap();
        assert_eq!(data.column_count(), 2);
        assert_eq!(data.row_count(), 0);
    }

    #[test]
    fn test_bom_is_stripped() {
        let data = Loader::new().load_str("\u{feff}id,v\n1,2\n").unwrap();
        assert_eq!(data.headers[0], "id");
    }

    #[test]
    fn test_semicolon_delimiter() {
        let loader = Loader::with_config(LoaderConfig::default().with_delimiter(b';'));
        let data = loader.load_str("a;b\n1;x\n").unwrap();
        assert_eq!(data.get(0, 1), Some(&Value::Text("x".to_string())));
    }

    #[test]
    fn test_missing_file() {
        let err = Loader::new().load("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, SieveError::FileNotFound { .. }));
    }
}
