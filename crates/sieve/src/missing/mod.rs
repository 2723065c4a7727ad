//! Missing-value analysis, imputation and the post-imputation check.

mod analyzer;
mod imputer;
mod validator;

pub use analyzer::MissingValueReport;
pub use imputer::{ColumnFill, ImputationResult, Imputer, Strategy};
pub use validator::ensure_complete;
