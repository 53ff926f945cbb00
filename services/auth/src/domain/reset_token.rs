//! Password-reset token generation and hashing.

use std::fmt;

use rand::RngExt;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::domain::types::RESET_TOKEN_BYTES;

/// A freshly generated reset token.
///
/// Persist `token_hash`; email `raw` and drop it.
pub struct GeneratedResetToken {
    pub raw: SecretString,
    pub token_hash: String,
}

impl fmt::Debug for GeneratedResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedResetToken")
            .field("raw", &"***")
            .field("token_hash", &self.token_hash)
            .finish()
    }
}

pub fn generate_reset_token() -> GeneratedResetToken {
    let bytes: [u8; RESET_TOKEN_BYTES] = rand::rng().random();
    let raw = hex::encode(bytes);
    let token_hash = hash_token(&raw);
    GeneratedResetToken {
        raw: SecretString::from(raw),
        token_hash,
    }
}

/// Lowercase hex SHA-256 of the token's UTF-8 bytes.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

impl GeneratedResetToken {
    pub fn expose(&self) -> &str {
        self.raw.expose_secret()
    }
}
