//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, data-shaped failures. Connectivity and
/// transport problems belong to the infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A document failed validation while being built from its draft.
    ///
    /// The message is the full, caller-facing text
    /// (e.g. `Certificate validation failed: year: ...`).
    #[error("{0}")]
    Validation(String),

    /// An identifier was invalid (e.g. empty).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Combine per-path cast failures into one validation error for `model`.
    ///
    /// Returns `None` when there is nothing to report.
    pub fn from_field_errors(model: &str, errors: Vec<(&'static str, String)>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }

        let detail = errors
            .into_iter()
            .map(|(path, reason)| format!("{path}: {reason}"))
            .collect::<Vec<_>>()
            .join(", ");

        Some(Self::Validation(format!("{model} validation failed: {detail}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_field_errors_means_no_error() {
        assert_eq!(DomainError::from_field_errors("Certificate", vec![]), None);
    }

    #[test]
    fn field_errors_are_joined_under_the_model_name() {
        let err = DomainError::from_field_errors(
            "Certificate",
            vec![("title", "bad title".to_string()), ("year", "bad year".to_string())],
        )
        .unwrap();

        assert_eq!(
            err.to_string(),
            "Certificate validation failed: title: bad title, year: bad year"
        );
    }
}
