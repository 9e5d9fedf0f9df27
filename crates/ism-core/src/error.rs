//! # Error Types
//!
//! Defines the error type shared by every crate in the workspace. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Age validation errors carry the offending raw value and the reason it
//!   was rejected, so the CLI diagnostic names the bad argument.

use thiserror::Error;

/// Top-level error type for the policy generator.
#[derive(Error, Debug)]
pub enum IsmError {
    /// An index-age argument does not match `<digits><d|h|m|s>` or `0`.
    #[error("invalid age parameter {value:?}: {reason}")]
    InvalidAgeFormat {
        /// The raw value as supplied by the caller.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl IsmError {
    /// Whether this error was caused by a malformed age argument.
    pub fn is_invalid_age(&self) -> bool {
        matches!(self, Self::InvalidAgeFormat { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_age_display_names_value() {
        let err = IsmError::InvalidAgeFormat {
            value: "30x".to_string(),
            reason: "unknown unit",
        };
        assert_eq!(err.to_string(), "invalid age parameter \"30x\": unknown unit");
        assert!(err.is_invalid_age());
    }

    #[test]
    fn invalid_age_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(IsmError::InvalidAgeFormat {
            value: String::new(),
            reason: "empty value",
        });
        assert_eq!(err.to_string(), "invalid age parameter \"\": empty value");
        assert!(err.source().is_none());
    }
}
