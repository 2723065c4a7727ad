//! Identifier format classification.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::Value;

/// Two ASCII digits followed by two ASCII letters, e.g. `12AB`.
pub const SERIAL_PATTERN: &str = r"^[0-9]{2}[A-Za-z]{2}$";

static SERIAL_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(SERIAL_PATTERN).unwrap());

/// Outcome of checking one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdentifierClassification {
    /// The identifier is absent.
    pub is_missing: bool,
    /// The identifier is present but does not match the format.
    /// Always false when `is_missing` is true.
    pub is_improper_format: bool,
}

impl IdentifierClassification {
    /// Whether the identifier is present and well-formed.
    pub fn is_valid(&self) -> bool {
        !self.is_missing && !self.is_improper_format
    }
}

/// The expected identifier format.
#[derive(Debug, Clone)]
pub struct IdentifierFormat {
    pattern: Regex,
}

impl IdentifierFormat {
    /// Use a custom pattern. It is matched against the whole value.
    pub fn new(pattern: &str) -> Result<Self> {
        let anchored = anchor(pattern);
        Ok(Self {
            pattern: Regex::new(&anchored)?,
        })
    }

    /// The pattern in use.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Classify a raw identifier (`None` when absent).
    pub fn classify(&self, identifier: Option<&str>) -> IdentifierClassification {
        match identifier {
            None => IdentifierClassification {
                is_missing: true,
                is_improper_format: false,
            },
            Some(id) => IdentifierClassification {
                is_missing: false,
                is_improper_format: !self.pattern.is_match(id),
            },
        }
    }

    /// Classify a dataset cell. Numbers are checked as they were written.
    pub fn classify_value(&self, value: &Value) -> IdentifierClassification {
        match value {
            Value::Absent => self.classify(None),
            Value::Text(s) => self.classify(Some(s)),
            Value::Number(number) => self.classify(Some(&number.to_string())),
        }
    }
}

impl Default for IdentifierFormat {
    fn default() -> Self {
        Self {
            pattern: SERIAL_FORMAT.clone(),
        }
    }
}

/// Classify against the default serial-number format.
pub fn classify(identifier: Option<&str>) -> IdentifierClassification {
    IdentifierFormat::default().classify(identifier)
}

fn anchor(pattern: &str) -> String {
    let start = if pattern.starts_with('^') { "" } else { "^" };
    let end = if pattern.ends_with('$') { "" } else { "$" };
    format!("{start}(?:{}){end}", pattern.trim_start_matches('^').trim_end_matches('$'))
}
