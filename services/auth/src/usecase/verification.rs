use chrono::Utc;
use uuid::Uuid;

use storefront_domain::code::OneTimeCode;
use storefront_domain::email::Email;
use storefront_domain::id::CustomerId;
use storefront_domain::password::Password;

use crate::domain::otp::{expiry_timestamp, generate_otp, is_expired};
use crate::domain::repository::{
    CustomerDirectory, EmailVerificationRepository, IdentityProvider, Mailer, Registration,
};
use crate::domain::templates::otp_email;
use crate::domain::types::{
    CustomerProfile, DEFAULT_PROVIDER, Delivery, EmailVerification, OTP_LEN, OTP_TTL_MINUTES,
};
use crate::error::AuthServiceError;

const DEFAULT_REGISTER_ERROR: &str = "Failed to create auth identity";

/// Persist a fresh pending verification for `email` and mail its code.
async fn issue_otp<V, M>(
    verifications: &V,
    mailer: &M,
    customer_id: CustomerId,
    email: &Email,
) -> Result<Delivery, AuthServiceError>
where
    V: EmailVerificationRepository,
    M: Mailer,
{
    let code = generate_otp(OTP_LEN);
    let now = Utc::now();
    let record = EmailVerification {
        id: Uuid::new_v4(),
        customer_id: Some(customer_id),
        email: email.as_str().to_owned(),
        code,
        expires_at: expiry_timestamp(OTP_TTL_MINUTES),
        verified: false,
        verified_at: None,
        consumed_at: None,
        created_at: now,
    };
    verifications.create(&record).await?;

    let delivery = mailer.send(&otp_email(email.clone(), &record.code)).await?;
    tracing::debug!(verification_id = %record.id, ?delivery, "otp issued");
    Ok(delivery)
}

// ── Register ──────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: Email,
    pub password: Password,
    pub profile: CustomerProfile,
}

pub struct RegisterUseCase<I, C, V, M>
where
    I: IdentityProvider,
    C: CustomerDirectory,
    V: EmailVerificationRepository,
    M: Mailer,
{
    pub identities: I,
    pub customers: C,
    pub verifications: V,
    pub mailer: M,
}

impl<I, C, V, M> RegisterUseCase<I, C, V, M>
where
    I: IdentityProvider,
    C: CustomerDirectory,
    V: EmailVerificationRepository,
    M: Mailer,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<Delivery, AuthServiceError> {
        // 1. Credential identity. A rejection surfaces the provider's own message.
        let identity = match self
            .identities
            .register(DEFAULT_PROVIDER, &input.email, &input.password, &input.profile)
            .await?
        {
            Registration::Created(identity) => identity,
            Registration::Rejected(message) => {
                return Err(AuthServiceError::IdentityConflict(
                    message.unwrap_or_else(|| DEFAULT_REGISTER_ERROR.to_owned()),
                ));
            }
        };

        // 2. Customer linked to the identity.
        self.customers
            .create_account(&identity.id, &input.email, &input.profile)
            .await?;

        // 3. The directory is the source of truth for the customer id. Earlier
        //    steps are not rolled back if it is missing.
        let customer = self
            .customers
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthServiceError::CustomerCreationFailed)?;

        // 4-5. Pending verification + email.
        issue_otp(&self.verifications, &self.mailer, customer.id, &input.email).await
    }
}

// ── Verify OTP ────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub email: Email,
    pub code: OneTimeCode,
}

pub struct VerifyOtpUseCase<C, V>
where
    C: CustomerDirectory,
    V: EmailVerificationRepository,
{
    pub customers: C,
    pub verifications: V,
}

impl<C, V> VerifyOtpUseCase<C, V>
where
    C: CustomerDirectory,
    V: EmailVerificationRepository,
{
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<(), AuthServiceError> {
        if self.customers.find_by_email(&input.email).await?.is_none() {
            return Err(AuthServiceError::CustomerNotFound);
        }

        let record = self
            .verifications
            .find_latest_pending(input.email.as_str())
            .await?
            .ok_or(AuthServiceError::NoPendingVerification)?;

        if is_expired(Some(record.expires_at)) {
            return Err(AuthServiceError::OtpExpired);
        }
        if record.code != input.code.as_str() {
            return Err(AuthServiceError::CodeMismatch);
        }

        // Conditional on `verified = false`: a concurrent verify that won the
        // race leaves nothing pending for this one.
        if !self.verifications.mark_verified(record.id, Utc::now()).await? {
            return Err(AuthServiceError::NoPendingVerification);
        }
        Ok(())
    }
}

// ── Resend OTP ────────────────────────────────────────────────────────────────

pub struct ResendOtpInput {
    pub email: Email,
}

pub struct ResendOtpUseCase<C, V, M>
where
    C: CustomerDirectory,
    V: EmailVerificationRepository,
    M: Mailer,
{
    pub customers: C,
    pub verifications: V,
    pub mailer: M,
}

impl<C, V, M> ResendOtpUseCase<C, V, M>
where
    C: CustomerDirectory,
    V: EmailVerificationRepository,
    M: Mailer,
{
    pub async fn execute(&self, input: ResendOtpInput) -> Result<Delivery, AuthServiceError> {
        let customer = self
            .customers
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthServiceError::CustomerNotFound)?;

        if self.verifications.has_verified(input.email.as_str()).await? {
            return Err(AuthServiceError::AlreadyVerified);
        }

        // Older pending records stay in place; lookups always take the newest.
        issue_otp(&self.verifications, &self.mailer, customer.id, &input.email).await
    }
}
