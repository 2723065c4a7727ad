//! Post-imputation check that no absent value remains.

use tracing::info;

use crate::error::{Result, SieveError};
use crate::input::Dataset;

use super::analyzer::MissingValueReport;

/// Fails if any cell of `data` is still absent.
///
/// This only inspects the dataset; it never fills anything.
pub fn ensure_complete(data: &Dataset) -> Result<()> {
    let report = MissingValueReport::count(data);
    if report.total() == 0 {
        info!("Validation passed: no missing values found");
        return Ok(());
    }

    Err(SieveError::ResidualMissingValue {
        columns: report
            .columns_with_missing()
            .map(|(name, _)| name.to_string())
            .collect(),
        count: report.total(),
    })
}
