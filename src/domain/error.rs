//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single violated field constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Invariant violations raised while building a todo.
///
/// Validation is cumulative: every violated field is reported, not just the
/// first one encountered. A `ValidationError` never carries an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", render(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

fn render(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Create an error for a single field
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, message)],
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the offending fields, in the order they were checked
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Merge the outcome of several independent field checks.
    ///
    /// Callers only reach for this once at least one check has failed.
    pub fn collect(errors: impl IntoIterator<Item = Option<ValidationError>>) -> Self {
        Self {
            violations: errors
                .into_iter()
                .flatten()
                .flat_map(|err| err.violations)
                .collect(),
        }
    }
}
