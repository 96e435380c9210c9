//! Cinegraph Error Definitions
//!
//! Defines error types used throughout the engine.

use thiserror::Error;

/// Core engine error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    // =========================================================================
    // Argument Errors
    // =========================================================================
    /// A value failed a precondition: numeric out of range, unknown
    /// whitelisted identifier, malformed dB string, empty or
    /// null-containing path, end <= start, zero denominator.
    #[error("{field}: {message}")]
    InvalidArgument { field: String, message: String },

    // =========================================================================
    // Command Build Errors
    // =========================================================================
    #[error("At least one input file is required")]
    MissingInput,

    #[error("At least one output file is required")]
    MissingOutput,

    // =========================================================================
    // Registry Errors
    // =========================================================================
    #[error("Effect not found: {0}")]
    EffectNotFound(String),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Creates an `InvalidArgument` error for the given field.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = CoreError::invalid("crf", "value 52 is out of range (must be 0-51)");
        assert_eq!(err.to_string(), "crf: value 52 is out of range (must be 0-51)");
    }

    #[test]
    fn test_missing_output_mentions_output() {
        let err = CoreError::MissingOutput;
        assert!(
            err.to_string().contains("output"),
            "Expected 'output' in: {}",
            err
        );
    }
}
