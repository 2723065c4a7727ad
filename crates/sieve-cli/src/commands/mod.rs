//! CLI command implementations.

pub mod check;
pub mod fill;
pub mod inspect;
