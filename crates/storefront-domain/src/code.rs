//! One-time code as submitted by a customer.

use crate::error::ValidationError;

pub const MIN_CODE_LEN: usize = 4;
pub const MAX_CODE_LEN: usize = 10;

/// A verification code submitted for checking.
///
/// Only the length is constrained here; the content is compared verbatim
/// against the stored code, so a non-numeric submission simply mismatches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeCode(String);

impl OneTimeCode {
    pub fn parse(raw: String) -> Result<Self, ValidationError> {
        let len = raw.chars().count();
        if len < MIN_CODE_LEN {
            return Err(ValidationError::TooShort {
                field: "code",
                min: MIN_CODE_LEN,
            });
        }
        if len > MAX_CODE_LEN {
            return Err(ValidationError::TooLong {
                field: "code",
                max: MAX_CODE_LEN,
            });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
