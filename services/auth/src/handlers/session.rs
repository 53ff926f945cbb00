use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use storefront_auth_types::cookie::{clear_session_cookie, set_session_cookie};
use storefront_domain::email::Email;
use storefront_domain::password::Password;

use crate::error::AuthServiceError;
use crate::handlers::extract::JsonBody;
use crate::handlers::ok;
use crate::state::AppState;
use crate::usecase::session::{LoginInput, LoginUseCase};

// ── POST /store/auth/login ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    // Any malformed credential gets the same answer as a wrong one.
    let (Ok(email), Ok(password)) = (
        Email::parse(&body.email),
        Password::parse("password", body.password),
    ) else {
        return Err(AuthServiceError::LoginFailed);
    };

    let usecase = LoginUseCase {
        identities: state.identity_provider(),
        customers: state.customer_directory(),
        verifications: state.verification_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(LoginInput { email, password }).await?;
    tracing::debug!(access_token_exp = out.access_token_exp, "customer logged in");

    let jar = set_session_cookie(jar, out.access_token, state.cookie_domain.clone());
    Ok((jar, ok("Logged in successfully")))
}

// ── DELETE /store/auth/session ────────────────────────────────────────────────

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    (jar, ok("Logged out successfully"))
}
