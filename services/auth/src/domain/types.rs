use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_domain::email::Email;
use storefront_domain::id::{AuthIdentityId, CustomerId};

/// Customer record as exposed by the customer directory.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Credential identity held by the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthIdentity {
    pub id: AuthIdentityId,
}

/// Profile fields forwarded when creating a customer account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// One email-ownership check.
#[derive(Debug, Clone)]
pub struct EmailVerification {
    pub id: Uuid,
    pub customer_id: Option<CustomerId>,
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub consumed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Stored password-reset token. `token_hash` is the only trace of the raw token.
#[derive(Debug, Clone)]
pub struct PasswordResetToken {
    pub id: Uuid,
    pub customer_id: Option<CustomerId>,
    pub email: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Outgoing email. Both bodies are always present.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: Email,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// How a message left the mailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to the SMTP relay.
    Sent,
    /// Written to the service log because no SMTP relay is configured.
    Logged,
}

/// OTP length in digits.
pub const OTP_LEN: usize = 6;

/// OTP time-to-live in minutes.
pub const OTP_TTL_MINUTES: i64 = 10;

/// Reset-token time-to-live in minutes.
pub const RESET_TOKEN_TTL_MINUTES: i64 = 30;

/// Random bytes behind a reset token (hex-encoded to 64 characters).
pub const RESET_TOKEN_BYTES: usize = 32;

/// Identity provider used when a route does not name one.
pub const DEFAULT_PROVIDER: &str = "emailpass";

/// Shortest reset token accepted at the boundary; real tokens are 64 characters.
pub const MIN_RESET_TOKEN_LEN: usize = 10;
