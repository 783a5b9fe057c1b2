//! Error types for the input masking engine.
//!
//! Formatting itself never fails: bad characters, incomplete input and
//! unknown mask ids all have defined fallback behavior. Errors only surface
//! at configuration boundaries, where a host registers a pattern or hands
//! over options.

use thiserror::Error;

/// Result type alias for configuration-time operations.
pub type InputMaskResult<T> = Result<T, InputMaskError>;

/// Errors raised while configuring masks.
#[derive(Debug, Error)]
pub enum InputMaskError {
    /// A pattern definition is internally inconsistent.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A caller-supplied parameter is out of range or malformed.
    #[error("Invalid input for '{parameter}': {reason}")]
    InvalidInput { parameter: String, reason: String },

    /// Host options could not be decoded.
    #[error("Invalid mask options: {0}")]
    Options(#[from] serde_json::Error),
}

impl InputMaskError {
    pub(crate) fn pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn input(parameter: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }
}
