//! Validation error types

use std::fmt;

/// Validation error for the value entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty or whitespace-only
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Identifier is missing or not a number
    InvalidId,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::TooLong { field, max } => {
                write!(f, "{} must be {} characters or less", field, max)
            }
            Self::InvalidId => write!(f, "Valid ID is required"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "Name",
            max: 100,
        };
        assert_eq!(err.to_string(), "Name must be 100 characters or less");
        assert_eq!(
            ValidationError::Empty { field: "Value" }.to_string(),
            "Value is required"
        );
        assert_eq!(ValidationError::InvalidId.to_string(), "Valid ID is required");
    }
}
