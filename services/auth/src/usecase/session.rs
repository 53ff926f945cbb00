use storefront_auth_types::token::issue_access_token;
use storefront_domain::email::Email;
use storefront_domain::password::Password;

use crate::domain::repository::{CustomerDirectory, EmailVerificationRepository, IdentityProvider};
use crate::domain::types::DEFAULT_PROVIDER;
use crate::error::AuthServiceError;

pub struct LoginInput {
    pub email: Email,
    pub password: Password,
}

pub struct LoginOutput {
    pub access_token: String,
    pub access_token_exp: u64,
}

/// Password login, gated on a verified email.
pub struct LoginUseCase<I, C, V>
where
    I: IdentityProvider,
    C: CustomerDirectory,
    V: EmailVerificationRepository,
{
    pub identities: I,
    pub customers: C,
    pub verifications: V,
    pub jwt_secret: String,
}

impl<I, C, V> LoginUseCase<I, C, V>
where
    I: IdentityProvider,
    C: CustomerDirectory,
    V: EmailVerificationRepository,
{
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, AuthServiceError> {
        let accepted = self
            .identities
            .authenticate(DEFAULT_PROVIDER, &input.email, &input.password)
            .await?;
        if !accepted {
            return Err(AuthServiceError::LoginFailed);
        }

        let customer = self
            .customers
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthServiceError::CustomerNotFound)?;

        if !self.verifications.has_verified(input.email.as_str()).await? {
            return Err(AuthServiceError::EmailNotVerified);
        }

        let (access_token, access_token_exp) = issue_access_token(&customer.id.0, &self.jwt_secret)
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        Ok(LoginOutput {
            access_token,
            access_token_exp,
        })
    }
}
