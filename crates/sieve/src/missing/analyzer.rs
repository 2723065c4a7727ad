//! Per-column counts of absent values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::input::Dataset;

/// Absent-value count for every column, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingValueReport {
    pub counts: IndexMap<String, usize>,
}

impl MissingValueReport {
    /// Count absent values in each column of `data`.
    ///
    /// Every declared column appears in the report, including those with no
    /// absent values.
    pub fn analyze(data: &Dataset) -> Self {
        let report = Self::count(data);
        for line in report.lines() {
            info!("{}", line);
        }
        report
    }

    /// Same as [`analyze`](Self::analyze) without logging.
    pub fn count(data: &Dataset) -> Self {
        let counts: IndexMap<String, usize> = data
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let count = data.column_values(idx).filter(|v| v.is_absent()).count();
                (name.clone(), count)
            })
            .collect();

        Self { counts }
    }

    /// Absent count for a column, if the column exists.
    pub fn get(&self, column: &str) -> Option<usize> {
        self.counts.get(column).copied()
    }

    /// Total absent values across all columns.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Columns with at least one absent value.
    pub fn columns_with_missing(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(name, &count)| (name.as_str(), count))
    }

    /// One human-readable line per column.
    pub fn lines(&self) -> Vec<String> {
        self.counts
            .iter()
            .map(|(name, &count)| describe_count(name, count))
            .collect()
    }
}

fn describe_count(column: &str, count: usize) -> String {
    let noun = if count == 1 { "value" } else { "values" };
    format!("{}: {} missing {}", column, count, noun)
}
