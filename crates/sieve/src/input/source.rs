//! In-memory dataset representation and source metadata.

use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Text markers read as an absent value (compared case-insensitively after trimming).
const NA_MARKERS: &[&str] = &["na", "n/a", "nan", "-nan", "null", "none", "#n/a", "<na>"];

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// A finite number, remembering how it was written when that differs from
/// its shortest form (`007`, `1.50`, `1e3`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "f64")]
pub struct Number {
    value: f64,
    raw: Option<String>,
}

impl Number {
    fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())?;
        let raw = (value.to_string() != raw).then(|| raw.to_string());
        Some(Self { value, raw })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// The recorded text, if it is not the shortest form of the value.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self { value, raw: None }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.raw {
            Some(raw) => serializer.serialize_str(raw),
            None => serializer.serialize_f64(self.value),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => f.write_str(raw),
            None => write!(f, "{}", self.value),
        }
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A finite numeric value.
    Number(Number),
    /// Any other recorded value, kept verbatim.
    Text(String),
    /// No recorded data.
    Absent,
}

impl Value {
    /// Interpret a raw field from a delimited file.
    pub fn parse(raw: &str) -> Self {
        if is_absent_marker(raw) {
            return Value::Absent;
        }
        match Number::parse(raw) {
            Some(n) => Value::Number(n),
            None => Value::Text(raw.to_string()),
        }
    }

    /// A computed number, written in its shortest form.
    ///
    /// Callers must pass a finite value.
    pub fn number(value: f64) -> Self {
        debug_assert!(value.is_finite());
        Value::Number(Number::from(value))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.value),
            _ => None,
        }
    }

    /// The recorded text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Total order used for deterministic tie-breaking.
    ///
    /// Numbers sort numerically and before text, text sorts lexicographically,
    /// and absent values sort last.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.value.total_cmp(&b.value),
            (Value::Number(_), _) => Ordering::Less,
            (_, Value::Number(_)) => Ordering::Greater,
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Text(_), Value::Absent) => Ordering::Less,
            (Value::Absent, Value::Text(_)) => Ordering::Greater,
            (Value::Absent, Value::Absent) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => fmt::Display::fmt(n, f),
            Value::Text(s) => f.write_str(s),
            Value::Absent => Ok(()),
        }
    }
}

/// Check if a raw field represents a missing value.
pub fn is_absent_marker(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || NA_MARKERS.iter().any(|m| trimmed.eq_ignore_ascii_case(m))
}

/// Parsed tabular data: a header plus records in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Column headers, unique.
    pub headers: Vec<String>,
    /// Row data (row-major order), each row as wide as the header.
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Create a new dataset.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&Value::Absent))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// A copy holding only the given rows, in the order given.
    pub fn select_rows(&self, indices: &[usize]) -> Dataset {
        let rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        Dataset::new(self.headers.clone(), rows)
    }

    /// A copy holding the first `n` rows.
    pub fn head(&self, n: usize) -> Dataset {
        Dataset::new(
            self.headers.clone(),
            self.rows.iter().take(n).cloned().collect(),
        )
    }

    /// Whether any cell is absent.
    pub fn has_absent(&self) -> bool {
        self.rows.iter().flatten().any(Value::is_absent)
    }
}
