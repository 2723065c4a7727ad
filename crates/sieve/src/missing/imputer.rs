//! Filling absent values with a per-column statistic.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SieveError};
use crate::input::{Dataset, Value};

/// Statistic used to fill absent values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Strategy {
    /// Arithmetic mean of the column's numbers.
    #[default]
    Mean,
    /// Median of the column's numbers.
    Median,
    /// Most frequent value; ties go to the lowest value.
    Mode,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Mean => "mean",
            Strategy::Median => "median",
            Strategy::Mode => "mode",
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Strategy::Mean | Strategy::Median)
    }
}

impl FromStr for Strategy {
    type Err = SieveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mean" => Ok(Strategy::Mean),
            "median" => Ok(Strategy::Median),
            "mode" => Ok(Strategy::Mode),
            _ => Err(SieveError::InvalidStrategy(s.to_string())),
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = SieveError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How one column was filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFill {
    /// Column that was filled.
    pub column: String,
    /// Value written into each absent cell.
    pub fill_value: Value,
    /// Number of cells replaced.
    pub values_filled: usize,
}

/// Result of imputing a dataset.
#[derive(Debug, Clone)]
pub struct ImputationResult {
    /// The filled copy of the input.
    pub dataset: Dataset,
    /// One entry per column that received a fill value.
    pub fills: Vec<ColumnFill>,
}

/// Replaces absent values column by column.
pub struct Imputer {
    strategy: Strategy,
}

impl Imputer {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Produce a filled copy of `data`; the input is left untouched.
    ///
    /// Columns without absent values are copied as-is. A column whose values
    /// are all absent has no statistic and is left unfilled.
    pub fn impute(&self, data: &Dataset) -> Result<ImputationResult> {
        let mut dataset = data.clone();
        let mut fills = Vec::new();

        for (col_idx, column) in data.headers.iter().enumerate() {
            let absent = data.column_values(col_idx).filter(|v| v.is_absent()).count();
            if absent == 0 {
                continue;
            }

            let Some(fill_value) = self.fill_value(data, col_idx, column)? else {
                warn!(column = %column, "no recorded values to derive a {} from", self.strategy);
                continue;
            };

            for row in &mut dataset.rows {
                if let Some(cell) = row.get_mut(col_idx) {
                    if cell.is_absent() {
                        *cell = fill_value.clone();
                    }
                }
            }

            debug!(column = %column, fill = %fill_value, count = absent, "filled column");
            fills.push(ColumnFill {
                column: column.clone(),
                fill_value,
                values_filled: absent,
            });
        }

        Ok(ImputationResult { dataset, fills })
    }

    /// Statistic for one column, or `None` if the column has no recorded values.
    fn fill_value(&self, data: &Dataset, col_idx: usize, column: &str) -> Result<Option<Value>> {
        let present: Vec<&Value> = data
            .column_values(col_idx)
            .filter(|v| !v.is_absent())
            .collect();

        if self.strategy.is_numeric() {
            if let Some(text) = present.iter().find_map(|v| v.as_text()) {
                return Err(SieveError::TypeConflict {
                    column: column.to_string(),
                    strategy: self.strategy.to_string(),
                    value: text.to_string(),
                });
            }
        }

        let numbers = || present.iter().filter_map(|v| v.as_number());
        let value = match self.strategy {
            Strategy::Mean => mean(numbers()).map(Value::number),
            Strategy::Median => median(numbers().collect()).map(Value::number),
            Strategy::Mode => mode(&present),
        };

        Ok(value)
    }
}

/// Running mean; each step stays within the range of the values seen, so
/// large finite inputs never overflow.
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (mean, count) = values.fold((0.0, 0usize), |(mean, count), v| {
        let n = (count + 1) as f64;
        (mean - mean / n + v / n, count + 1)
    });
    (count > 0).then_some(mean)
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some(values[mid - 1] / 2.0 + values[mid] / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Most frequent value; among equally frequent values the lowest wins.
fn mode(values: &[&Value]) -> Option<Value> {
    let mut sorted: Vec<&Value> = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut best: Option<(&Value, usize)> = None;
    let mut run_start = 0;

    for i in 1..=sorted.len() {
        let run_ended = i == sorted.len() || sorted[i].total_cmp(sorted[run_start]) != Ordering::Equal;
        if !run_ended {
            continue;
        }
        let run_len = i - run_start;
        // Strictly greater keeps the earliest (lowest) value on ties
        if best.is_none_or(|(_, n)| run_len > n) {
            best = Some((sorted[run_start], run_len));
        }
        run_start = i;
    }

    best.map(|(value, _)| value.clone())
}
