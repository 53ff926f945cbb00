use anyhow::Context as _;

use storefront_domain::email::Email;
use storefront_domain::id::CustomerId;
use storefront_domain::password::Password;

use crate::domain::repository::{CustomerDirectory, IdentityProvider, PasswordUpdate};
use crate::domain::types::DEFAULT_PROVIDER;
use crate::error::AuthServiceError;

const DEFAULT_CHANGE_ERROR: &str = "Failed to change password";

/// New and confirmation passwords are already known to match.
pub struct ChangePasswordInput {
    pub customer_id: CustomerId,
    pub current_password: Password,
    pub new_password: Password,
}

pub struct ChangePasswordUseCase<I, C>
where
    I: IdentityProvider,
    C: CustomerDirectory,
{
    pub identities: I,
    pub customers: C,
}

impl<I, C> ChangePasswordUseCase<I, C>
where
    I: IdentityProvider,
    C: CustomerDirectory,
{
    pub async fn execute(&self, input: ChangePasswordInput) -> Result<(), AuthServiceError> {
        let raw_email = self
            .customers
            .find_by_id(&input.customer_id)
            .await?
            .and_then(|c| c.email)
            .filter(|e| !e.is_empty())
            .ok_or(AuthServiceError::CustomerEmailNotFound)?;
        let email = Email::parse(&raw_email).context("customer directory returned invalid email")?;

        let accepted = self
            .identities
            .authenticate(DEFAULT_PROVIDER, &email, &input.current_password)
            .await?;
        if !accepted {
            return Err(AuthServiceError::InvalidCredentials);
        }

        match self
            .identities
            .update_password(DEFAULT_PROVIDER, email.as_str(), &input.new_password)
            .await?
        {
            PasswordUpdate::Updated => Ok(()),
            PasswordUpdate::Rejected(message) => Err(AuthServiceError::UpdateFailed(
                message.unwrap_or_else(|| DEFAULT_CHANGE_ERROR.to_owned()),
            )),
        }
    }
}
