/// Error types for the emailtype library
use crate::grammar::SyntaxViolation;
use std::fmt;

/// Result type alias for email operations
pub type Result<T> = std::result::Result<T, EmailError>;

/// Main error type for email operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// Input failed one of the grammar rules
    Syntax(SyntaxViolation),

    /// An operation that trusts validated input was handed something else
    Precondition(String),

    /// Input longer than the configured maximum
    LengthExceeded {
        /// Length of the rejected input in bytes
        length: usize,
        /// Configured maximum in bytes
        max: usize,
    },

    /// Malformed binary payload
    Format(String),
}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailError::Syntax(violation) => {
                write!(f, "invalid input syntax for email: {}", violation)
            }
            EmailError::Precondition(msg) => write!(f, "Precondition violated: {}", msg),
            EmailError::LengthExceeded { length, max } => write!(
                f,
                "email is {} bytes long, maximum is {} bytes",
                length, max
            ),
            EmailError::Format(msg) => write!(f, "Format error: {}", msg),
        }
    }
}

impl std::error::Error for EmailError {}

impl From<SyntaxViolation> for EmailError {
    fn from(violation: SyntaxViolation) -> Self {
        EmailError::Syntax(violation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Part;

    #[test]
    fn test_display_messages() {
        let err = EmailError::LengthExceeded { length: 300, max: 256 };
        assert_eq!(err.to_string(), "email is 300 bytes long, maximum is 256 bytes");

        let err: EmailError = SyntaxViolation::TooFewWords { part: Part::Domain }.into();
        assert!(err.to_string().starts_with("invalid input syntax for email"));
        assert!(err.to_string().contains("domain"));
    }
}
