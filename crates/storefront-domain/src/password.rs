//! Plaintext password wrapper.

use std::fmt;

use crate::error::ValidationError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A plaintext password that passed the length check.
///
/// Passwords are never persisted by this system: they are forwarded to the
/// identity provider as-is. `Debug` is redacted so a password cannot leak
/// through a stray `{:?}` in a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Validate `raw` as the field named `field` (used in the error message).
    pub fn parse(field: &'static str, raw: String) -> Result<Self, ValidationError> {
        if raw.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::TooShort {
                field,
                min: MIN_PASSWORD_LEN,
            });
        }
        Ok(Self(raw))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}
