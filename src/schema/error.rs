//! Validation error shape shared by every resource contract.

use serde::Serialize;
use thiserror::Error;

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Machine-readable field path (the payload key, or "$" for the payload
    /// itself)
    pub path: String,

    /// Human-readable description of the violated constraint
    pub message: String,
}

/// Every violation found in one payload, in declaration order.
///
/// Validation failures are data, not faults: the caller re-renders the
/// originating form with all field-level messages at once, so the full list
/// is always returned rather than the first violation encountered.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("validation failed for {} field(s)", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record a violation.
    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Whether any violation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded violations.
    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl Default for ValidationErrors {
    fn default() -> Self {
        Self::new()
    }
}
