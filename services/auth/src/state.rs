use axum::extract::FromRef;
use sea_orm::DatabaseConnection;
use url::Url;

use storefront_auth_types::session::SessionSecret;

use crate::infra::db::{DbEmailVerificationRepository, DbPasswordResetTokenRepository};
use crate::infra::http::{HttpCustomerDirectory, HttpIdentityProvider};
use crate::infra::mail::MailTransport;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Pooled client shared by both commerce-platform adapters.
    pub http: reqwest::Client,
    pub identity_provider_url: Url,
    pub customer_directory_url: Url,
    pub mailer: MailTransport,
    pub jwt_secret: String,
    pub cookie_domain: String,
    /// Storefront origin that password-reset links point at.
    pub reset_link_base: Url,
}

impl AppState {
    pub fn verification_repo(&self) -> DbEmailVerificationRepository {
        DbEmailVerificationRepository {
            db: self.db.clone(),
        }
    }

    pub fn reset_token_repo(&self) -> DbPasswordResetTokenRepository {
        DbPasswordResetTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn identity_provider(&self) -> HttpIdentityProvider {
        HttpIdentityProvider {
            client: self.http.clone(),
            base_url: self.identity_provider_url.clone(),
        }
    }

    pub fn customer_directory(&self) -> HttpCustomerDirectory {
        HttpCustomerDirectory {
            client: self.http.clone(),
            base_url: self.customer_directory_url.clone(),
        }
    }

    pub fn mailer(&self) -> MailTransport {
        self.mailer.clone()
    }
}

impl FromRef<AppState> for SessionSecret {
    fn from_ref(state: &AppState) -> Self {
        SessionSecret(state.jwt_secret.clone())
    }
}
