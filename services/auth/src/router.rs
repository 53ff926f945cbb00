use axum::{
    Router,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use storefront_core::health::healthz;
use storefront_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    health::readyz,
    password::{change_password, forgot_password, reset_password, reset_password_default},
    session::{login, logout},
    verification::{register, resend_otp, verify_otp},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Registration + email verification
        .route("/store/auth/register", post(register))
        .route("/store/auth/verify-otp", post(verify_otp))
        .route("/store/auth/resend-otp", post(resend_otp))
        // Password recovery
        .route("/store/auth/forgot-password", post(forgot_password))
        .route("/store/auth/reset-password", post(reset_password_default))
        .route("/store/auth/reset-password/{provider}", post(reset_password))
        .route("/store/auth/change-password", post(change_password))
        // Session
        .route("/store/auth/login", post(login))
        .route("/store/auth/session", delete(logout))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
