use anyhow::anyhow;
use chrono::Utc;
use url::Url;
use uuid::Uuid;

use storefront_domain::email::Email;
use storefront_domain::password::Password;

use crate::domain::otp::{expiry_timestamp, is_expired};
use crate::domain::repository::{
    CustomerDirectory, IdentityProvider, Mailer, PasswordResetTokenRepository, PasswordUpdate,
};
use crate::domain::reset_token::{generate_reset_token, hash_token};
use crate::domain::templates::reset_password_email;
use crate::domain::types::{Delivery, PasswordResetToken, RESET_TOKEN_TTL_MINUTES};
use crate::error::AuthServiceError;

const DEFAULT_RESET_ERROR: &str = "Failed to reset password";

/// `<base>/auth/reset-password?token=<raw>`. A trailing slash on the base is dropped.
pub fn reset_link(base: &Url, token: &str) -> anyhow::Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| anyhow!("reset link base cannot carry a path: {base}"))?
        .pop_if_empty()
        .extend(["auth", "reset-password"]);
    url.query_pairs_mut().append_pair("token", token);
    Ok(url)
}

// ── Forgot password ───────────────────────────────────────────────────────────

pub struct ForgotPasswordInput {
    pub email: Email,
}

/// The only outcome a forgot-password request can have, whether or not the
/// email belongs to a customer and whether or not anything failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetRequestAccepted;

pub struct ForgotPasswordUseCase<C, R, M>
where
    C: CustomerDirectory,
    R: PasswordResetTokenRepository,
    M: Mailer,
{
    pub customers: C,
    pub reset_tokens: R,
    pub mailer: M,
    pub reset_link_base: Url,
}

impl<C, R, M> ForgotPasswordUseCase<C, R, M>
where
    C: CustomerDirectory,
    R: PasswordResetTokenRepository,
    M: Mailer,
{
    pub async fn execute(&self, input: ForgotPasswordInput) -> ResetRequestAccepted {
        match self.issue(&input.email).await {
            Ok(Some(delivery)) => tracing::debug!(?delivery, "password reset issued"),
            Ok(None) => tracing::debug!("password reset requested for unknown email"),
            Err(e) => tracing::error!(error = ?e, kind = e.kind(), "password reset request failed"),
        }
        ResetRequestAccepted
    }

    async fn issue(&self, email: &Email) -> Result<Option<Delivery>, AuthServiceError> {
        let Some(customer) = self.customers.find_by_email(email).await? else {
            return Ok(None);
        };

        let generated = generate_reset_token();
        let now = Utc::now();
        let token = PasswordResetToken {
            id: Uuid::new_v4(),
            customer_id: Some(customer.id),
            email: email.as_str().to_owned(),
            token_hash: generated.token_hash.clone(),
            expires_at: expiry_timestamp(RESET_TOKEN_TTL_MINUTES),
            used_at: None,
            created_at: now,
        };
        self.reset_tokens.replace_active(&token, now).await?;

        let link = reset_link(&self.reset_link_base, generated.expose())?;
        let delivery = self
            .mailer
            .send(&reset_password_email(email.clone(), link.as_str()))
            .await?;
        Ok(Some(delivery))
    }
}

// ── Reset password ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub provider: String,
    pub token: String,
    pub password: Password,
}

pub struct ResetPasswordUseCase<I, R>
where
    I: IdentityProvider,
    R: PasswordResetTokenRepository,
{
    pub identities: I,
    pub reset_tokens: R,
}

impl<I, R> ResetPasswordUseCase<I, R>
where
    I: IdentityProvider,
    R: PasswordResetTokenRepository,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AuthServiceError> {
        let token_hash = hash_token(&input.token);
        let row = self
            .reset_tokens
            .find_latest_by_hash(&token_hash)
            .await?
            .ok_or(AuthServiceError::InvalidToken)?;

        if row.used_at.is_some() {
            return Err(AuthServiceError::TokenAlreadyUsed);
        }
        if is_expired(Some(row.expires_at)) {
            self.reset_tokens.mark_used(row.id, Utc::now()).await?;
            return Err(AuthServiceError::TokenExpired);
        }

        // The identity is keyed by the email the token was issued for.
        match self
            .identities
            .update_password(&input.provider, &row.email, &input.password)
            .await?
        {
            PasswordUpdate::Updated => {}
            // The token stays valid so the customer can retry.
            PasswordUpdate::Rejected(message) => {
                return Err(AuthServiceError::UpdateFailed(
                    message.unwrap_or_else(|| DEFAULT_RESET_ERROR.to_owned()),
                ));
            }
        }

        if !self.reset_tokens.mark_used(row.id, Utc::now()).await? {
            tracing::warn!(
                token_id = %row.id,
                "reset token was consumed by a concurrent request"
            );
        }
        Ok(())
    }
}
