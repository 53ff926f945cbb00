use axum::{Json, extract::State};
use serde::Deserialize;

use storefront_domain::code::OneTimeCode;
use storefront_domain::email::Email;
use storefront_domain::error::ValidationError;
use storefront_domain::password::Password;

use crate::domain::types::CustomerProfile;
use crate::error::AuthServiceError;
use crate::handlers::extract::JsonBody;
use crate::handlers::{MessageResponse, ok};
use crate::state::AppState;
use crate::usecase::verification::{
    RegisterInput, RegisterUseCase, ResendOtpInput, ResendOtpUseCase, VerifyOtpInput,
    VerifyOtpUseCase,
};

/// Blank optional names are dropped rather than forwarded.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ── POST /store/auth/register ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl TryFrom<RegisterRequest> for RegisterInput {
    type Error = ValidationError;

    fn try_from(body: RegisterRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            email: Email::parse(&body.email)?,
            password: Password::parse("password", body.password)?,
            profile: CustomerProfile {
                first_name: non_blank(body.first_name),
                last_name: non_blank(body.last_name),
            },
        })
    }
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<Json<MessageResponse>, AuthServiceError> {
    let input = RegisterInput::try_from(body)?;
    let usecase = RegisterUseCase {
        identities: state.identity_provider(),
        customers: state.customer_directory(),
        verifications: state.verification_repo(),
        mailer: state.mailer(),
    };
    usecase.execute(input).await?;
    Ok(ok(
        "OTP sent to email. Please verify to complete registration.",
    ))
}

// ── POST /store/auth/verify-otp ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub code: String,
}

impl TryFrom<VerifyOtpRequest> for VerifyOtpInput {
    type Error = ValidationError;

    fn try_from(body: VerifyOtpRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            email: Email::parse(&body.email)?,
            code: OneTimeCode::parse(body.code)?,
        })
    }
}

pub async fn verify_otp(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<VerifyOtpRequest>,
) -> Result<Json<MessageResponse>, AuthServiceError> {
    let input = VerifyOtpInput::try_from(body)?;
    let usecase = VerifyOtpUseCase {
        customers: state.customer_directory(),
        verifications: state.verification_repo(),
    };
    usecase.execute(input).await?;
    Ok(ok("Email verified successfully"))
}

// ── POST /store/auth/resend-otp ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResendOtpRequest {
    #[serde(default)]
    pub email: String,
}

pub async fn resend_otp(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ResendOtpRequest>,
) -> Result<Json<MessageResponse>, AuthServiceError> {
    let email = Email::parse(&body.email)?;
    let usecase = ResendOtpUseCase {
        customers: state.customer_directory(),
        verifications: state.verification_repo(),
        mailer: state.mailer(),
    };
    usecase.execute(ResendOtpInput { email }).await?;
    Ok(ok("OTP sent to email. Please verify to complete registration."))
}
