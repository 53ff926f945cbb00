#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use storefront_domain::email::Email;
use storefront_domain::id::{AuthIdentityId, CustomerId};
use storefront_domain::password::Password;

use crate::domain::types::{
    AuthIdentity, Customer, CustomerProfile, Delivery, EmailMessage, EmailVerification,
    PasswordResetToken,
};
use crate::error::AuthServiceError;

/// Outcome of asking the identity provider to register a credential.
#[derive(Debug, Clone)]
pub enum Registration {
    Created(AuthIdentity),
    /// The provider refused; carries its message when it gave one.
    Rejected(Option<String>),
}

/// Outcome of asking the identity provider to replace a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordUpdate {
    Updated,
    Rejected(Option<String>),
}

/// Port for the credential store owned by the commerce platform.
pub trait IdentityProvider: Send + Sync {
    async fn register(
        &self,
        provider: &str,
        email: &Email,
        password: &Password,
        profile: &CustomerProfile,
    ) -> Result<Registration, AuthServiceError>;

    /// `true` when the credentials are accepted.
    async fn authenticate(
        &self,
        provider: &str,
        email: &Email,
        password: &Password,
    ) -> Result<bool, AuthServiceError>;

    /// Replace the password of the identity keyed by `entity_id` (the email for `emailpass`).
    async fn update_password(
        &self,
        provider: &str,
        entity_id: &str,
        password: &Password,
    ) -> Result<PasswordUpdate, AuthServiceError>;
}

/// Port for customer records owned by the commerce platform.
pub trait CustomerDirectory: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>, AuthServiceError>;

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, AuthServiceError>;

    /// Create a customer and link it to `identity`.
    async fn create_account(
        &self,
        identity: &AuthIdentityId,
        email: &Email,
        profile: &CustomerProfile,
    ) -> Result<(), AuthServiceError>;
}

/// Repository for email verification records.
pub trait EmailVerificationRepository: Send + Sync {
    async fn create(&self, record: &EmailVerification) -> Result<(), AuthServiceError>;

    /// Most recently created unverified record for `email`.
    async fn find_latest_pending(
        &self,
        email: &str,
    ) -> Result<Option<EmailVerification>, AuthServiceError>;

    /// Set `verified`, `verified_at` and `consumed_at` if the record is still
    /// unverified. Returns `false` when another request got there first.
    async fn mark_verified(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, AuthServiceError>;

    /// Whether any verified record exists for `email`.
    async fn has_verified(&self, email: &str) -> Result<bool, AuthServiceError>;
}

/// Repository for password-reset tokens.
pub trait PasswordResetTokenRepository: Send + Sync {
    /// Soft-invalidate every unused token for the email (`used_at = now`) and
    /// insert `token`, in one transaction.
    async fn replace_active(
        &self,
        token: &PasswordResetToken,
        now: DateTime<Utc>,
    ) -> Result<(), AuthServiceError>;

    /// Most recently created token with this hash, used or not.
    async fn find_latest_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<PasswordResetToken>, AuthServiceError>;

    /// Stamps `used_at` only while the token is still unused. `false` means
    /// another request consumed it first.
    async fn mark_used(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, AuthServiceError>;
}

/// Outbound email.
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<Delivery, AuthServiceError>;
}
