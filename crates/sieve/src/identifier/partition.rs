//! Splitting records by identifier classification.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};
use crate::input::Dataset;

use super::classifier::{IdentifierClassification, IdentifierFormat};

/// Row indices of records with a missing or malformed identifier.
///
/// The two groups are disjoint and keep the original record order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Rows whose identifier is absent.
    pub missing: Vec<usize>,
    /// Rows whose identifier is present but malformed.
    pub improper: Vec<usize>,
}

impl Partition {
    /// Build the partition from per-row classifications.
    pub fn from_classifications(classifications: &[IdentifierClassification]) -> Self {
        let mut partition = Partition::default();
        for (row, c) in classifications.iter().enumerate() {
            if c.is_missing {
                partition.missing.push(row);
            } else if c.is_improper_format {
                partition.improper.push(row);
            }
        }
        partition
    }

    /// Total rows flagged in either group.
    pub fn flagged(&self) -> usize {
        self.missing.len() + self.improper.len()
    }
}

/// Classify the identifier of every record, in row order.
pub fn classify_rows(
    data: &Dataset,
    column: &str,
    format: &IdentifierFormat,
) -> Result<Vec<IdentifierClassification>> {
    let col_idx = data
        .column_index(column)
        .ok_or_else(|| SieveError::MissingColumn {
            column: column.to_string(),
        })?;

    Ok(data
        .column_values(col_idx)
        .map(|v| format.classify_value(v))
        .collect())
}
