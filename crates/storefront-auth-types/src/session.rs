//! Authenticated-customer extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::{HeaderMap, StatusCode};

use crate::cookie::CUSTOMER_SESSION_COOKIE;
use crate::token::validate_access_token;

/// HMAC secret the extractor validates tokens with.
/// Services expose it from their state via `FromRef`.
#[derive(Clone)]
pub struct SessionSecret(pub String);

/// The customer behind the current request.
///
/// Read from `Authorization: Bearer <jwt>` first, then from the session
/// cookie. Returns 401 with the `{success, message}` envelope when neither is
/// present or the token fails validation.
#[derive(Debug, Clone)]
pub struct CustomerSession {
    pub customer_id: String,
}

#[derive(Debug)]
pub struct SessionRejection;

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "message": "Unauthorized",
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(CUSTOMER_SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}

impl<S> FromRequestParts<S> for CustomerSession
where
    S: Send + Sync,
    SessionSecret: FromRef<S>,
{
    type Rejection = SessionRejection;

    // Resolve synchronously and hand back a 'static future; axum-core 0.5 declares
    // this method as `fn -> impl Future + Send`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = SessionSecret::from_ref(state);
        let result = bearer_token(&parts.headers)
            .or_else(|| cookie_token(&parts.headers))
            .ok_or(SessionRejection)
            .and_then(|token| {
                validate_access_token(&token, &secret.0).map_err(|e| {
                    tracing::debug!(error = %e, "rejected customer session");
                    SessionRejection
                })
            })
            .map(|info| Self {
                customer_id: info.customer_id,
            });

        async move { result }
    }
}
