//! Boundary validation errors.

/// Reasons a request field was rejected before reaching any use case.
///
/// The `Display` text is user-facing and is returned verbatim in the
/// `{success, message}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid email")]
    InvalidEmail,
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("Passwords do not match")]
    PasswordMismatch,
}
