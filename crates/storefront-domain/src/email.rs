//! Email address newtype.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ValidationError;

/// Maximum total length of an address (RFC 5321 path limit).
const MAX_EMAIL_LEN: usize = 254;

/// A syntactically valid email address.
///
/// Validation is deliberately shallow: one `@`, a non-empty local part, and a
/// dotted domain without empty labels or whitespace. The address is kept
/// exactly as submitted (no case folding) because the identity and customer
/// collaborators key on the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() || raw.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::InvalidEmail);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidEmail);
        }
        let (local, domain) = raw.split_once('@').ok_or(ValidationError::InvalidEmail)?;
        if local.is_empty() || domain.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
