//! Input loading and the in-memory dataset model.

mod loader;
mod source;

pub use loader::{Loader, LoaderConfig};
pub use source::{is_absent_marker, Dataset, Number, SourceMetadata, Value};
