use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use storefront_domain::error::ValidationError;

/// Auth service domain error variants.
///
/// `Display` is the user-facing message carried in the `{success, message}`
/// envelope. Collaborator-supplied messages pass through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid request body")]
    InvalidBody,
    #[error("Customer not found")]
    CustomerNotFound,
    #[error("No OTP pending. Please request a new code.")]
    NoPendingVerification,
    #[error("OTP expired. Please request a new code.")]
    OtpExpired,
    #[error("Invalid OTP code")]
    CodeMismatch,
    #[error("Email already verified")]
    AlreadyVerified,
    #[error("Invalid or already used token")]
    InvalidToken,
    #[error("Token already used")]
    TokenAlreadyUsed,
    #[error("Token expired")]
    TokenExpired,
    #[error("Current password is incorrect")]
    InvalidCredentials,
    #[error("Invalid email or password")]
    LoginFailed,
    #[error("Email not verified. Please verify your email before logging in.")]
    EmailNotVerified,
    #[error("{0}")]
    IdentityConflict(String),
    #[error("{0}")]
    UpdateFailed(String),
    #[error("Customer email not found")]
    CustomerEmailNotFound,
    #[error("Customer creation failed")]
    CustomerCreationFailed,
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::InvalidBody => "INVALID_BODY",
            Self::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            Self::NoPendingVerification => "NO_PENDING_VERIFICATION",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::CodeMismatch => "CODE_MISMATCH",
            Self::AlreadyVerified => "ALREADY_VERIFIED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenAlreadyUsed => "TOKEN_ALREADY_USED",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::LoginFailed => "LOGIN_FAILED",
            Self::EmailNotVerified => "EMAIL_NOT_VERIFIED",
            Self::IdentityConflict(_) => "IDENTITY_CONFLICT",
            Self::UpdateFailed(_) => "UPDATE_FAILED",
            Self::CustomerEmailNotFound => "CUSTOMER_EMAIL_NOT_FOUND",
            Self::CustomerCreationFailed => "CUSTOMER_CREATION_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::CustomerNotFound => StatusCode::NOT_FOUND,
            Self::EmailNotVerified => StatusCode::FORBIDDEN,
            Self::CustomerCreationFailed | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_)
            | Self::InvalidBody
            | Self::NoPendingVerification
            | Self::OtpExpired
            | Self::CodeMismatch
            | Self::AlreadyVerified
            | Self::InvalidToken
            | Self::TokenAlreadyUsed
            | Self::TokenExpired
            | Self::InvalidCredentials
            | Self::LoginFailed
            | Self::IdentityConflict(_)
            | Self::UpdateFailed(_)
            | Self::CustomerEmailNotFound => StatusCode::BAD_REQUEST,
        }
    }
}

/// Body rejections (missing content type, bad JSON, wrong field types) are
/// client errors; the serde detail stays out of the response.
impl From<JsonRejection> for AuthServiceError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        Self::InvalidBody
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected client outcomes and TraceLayer already records the status.
        // Internal errors need the anyhow chain so the root cause is traceable.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = ?e, kind = self.kind(), "internal error");
            }
            Self::CustomerCreationFailed => {
                tracing::error!(kind = self.kind(), "customer missing after account creation");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "success": false,
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
