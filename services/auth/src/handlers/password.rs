use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use storefront_auth_types::session::CustomerSession;
use storefront_domain::email::Email;
use storefront_domain::error::ValidationError;
use storefront_domain::id::CustomerId;
use storefront_domain::password::Password;

use crate::domain::types::{DEFAULT_PROVIDER, MIN_RESET_TOKEN_LEN};
use crate::error::AuthServiceError;
use crate::handlers::extract::JsonBody;
use crate::handlers::{MessageResponse, ok};
use crate::state::AppState;
use crate::usecase::change_password::{ChangePasswordInput, ChangePasswordUseCase};
use crate::usecase::password_reset::{
    ForgotPasswordInput, ForgotPasswordUseCase, ResetPasswordInput, ResetPasswordUseCase,
};

// ── POST /store/auth/forgot-password ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AuthServiceError> {
    // Malformed input is rejected up front; it reveals nothing about accounts.
    let email = Email::parse(&body.email)?;
    let usecase = ForgotPasswordUseCase {
        customers: state.customer_directory(),
        reset_tokens: state.reset_token_repo(),
        mailer: state.mailer(),
        reset_link_base: state.reset_link_base.clone(),
    };
    usecase.execute(ForgotPasswordInput { email }).await;
    Ok(ok("If an account exists, a reset email has been sent."))
}

// ── POST /store/auth/reset-password[/{provider}] ──────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub password: String,
}

fn reset_input(
    provider: String,
    body: ResetPasswordRequest,
) -> Result<ResetPasswordInput, ValidationError> {
    if body.token.chars().count() < MIN_RESET_TOKEN_LEN {
        return Err(ValidationError::TooShort {
            field: "token",
            min: MIN_RESET_TOKEN_LEN,
        });
    }
    Ok(ResetPasswordInput {
        provider,
        token: body.token,
        password: Password::parse("password", body.password)?,
    })
}

async fn run_reset(
    state: AppState,
    provider: String,
    body: ResetPasswordRequest,
) -> Result<Json<MessageResponse>, AuthServiceError> {
    let input = reset_input(provider, body)?;
    let usecase = ResetPasswordUseCase {
        identities: state.identity_provider(),
        reset_tokens: state.reset_token_repo(),
    };
    usecase.execute(input).await?;
    Ok(ok("Password has been reset successfully"))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    JsonBody(body): JsonBody<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AuthServiceError> {
    run_reset(state, provider, body).await
}

pub async fn reset_password_default(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AuthServiceError> {
    run_reset(state, DEFAULT_PROVIDER.to_owned(), body).await
}

// ── POST /store/auth/change-password ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

fn change_input(
    customer_id: CustomerId,
    body: ChangePasswordRequest,
) -> Result<ChangePasswordInput, ValidationError> {
    let current_password = Password::parse("current_password", body.current_password)?;
    let new_password = Password::parse("new_password", body.new_password)?;
    let confirm_password = Password::parse("confirm_password", body.confirm_password)?;
    if new_password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(ChangePasswordInput {
        customer_id,
        current_password,
        new_password,
    })
}

pub async fn change_password(
    State(state): State<AppState>,
    session: CustomerSession,
    JsonBody(body): JsonBody<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AuthServiceError> {
    let input = change_input(CustomerId(session.customer_id), body)?;
    let usecase = ChangePasswordUseCase {
        identities: state.identity_provider(),
        customers: state.customer_directory(),
    };
    usecase.execute(input).await?;
    Ok(ok("Password updated successfully"))
}
