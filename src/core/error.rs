use thiserror::Error;

/// Errors from the fallible parts of the crate (builders, numbering,
/// record checks). Valuation itself never fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FacturaError {
    /// One or more record checks failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Invoice number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),
}

/// A single record check failure with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the offending field (e.g. "client.postal_code").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<Vec<ValidationError>> for FacturaError {
    fn from(errors: Vec<ValidationError>) -> Self {
        let msg = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        FacturaError::Validation(msg)
    }
}
