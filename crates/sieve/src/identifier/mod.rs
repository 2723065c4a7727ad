//! Identifier format checks and the resulting row partition.

mod classifier;
mod partition;

pub use classifier::{classify, IdentifierClassification, IdentifierFormat, SERIAL_PATTERN};
pub use partition::{classify_rows, Partition};
