use axum::Json;
use serde::Serialize;

pub mod extract;
pub mod health;
pub mod password;
pub mod session;
pub mod verification;

/// The `{success, message}` envelope every endpoint answers with.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

pub(crate) fn ok(message: &'static str) -> Json<MessageResponse> {
    Json(MessageResponse {
        success: true,
        message,
    })
}
