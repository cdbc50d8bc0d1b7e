//! Validation error types

use std::fmt;

/// Validation error for incoming requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more of name/email/message is missing or empty
    IncompleteForm { missing: Vec<&'static str> },

    /// No image file was attached to the submission
    MissingImage,

    /// Path segment is not a submission id
    InvalidId { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteForm { .. } => write!(f, "All fields are required"),
            Self::MissingImage => write!(f, "Image is required"),
            Self::InvalidId { value } => write!(f, "invalid submission id: '{}'", value),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::IncompleteForm {
            missing: vec!["email"],
        };
        assert_eq!(err.to_string(), "All fields are required");
        assert_eq!(ValidationError::MissingImage.to_string(), "Image is required");
        assert_eq!(
            ValidationError::InvalidId { value: "abc".into() }.to_string(),
            "invalid submission id: 'abc'"
        );
    }
}
