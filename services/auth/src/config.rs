use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use storefront_core::config::Config;

/// Auth service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on (default 9000). Env var: `AUTH_PORT`.
    #[serde(default = "default_auth_port")]
    pub auth_port: u16,
    /// HMAC secret for signing customer access tokens.
    pub jwt_secret: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// Base URL of the identity provider (e.g. "http://commerce:9000").
    pub identity_provider_url: String,
    /// Base URL of the customer directory.
    pub customer_directory_url: String,

    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    #[serde(default, deserialize_with = "optional_secret")]
    pub smtp_pass: Option<SecretString>,
    #[serde(default = "default_smtp_from")]
    pub smtp_from: String,

    /// Storefront origin used to build password-reset links.
    pub frontend_url: Option<String>,
    pub next_public_app_url: Option<String>,
}

impl Config for AuthConfig {}

fn default_auth_port() -> u16 {
    9000
}

fn default_smtp_from() -> String {
    "no-reply@localhost".to_owned()
}

fn optional_secret<'de, D: Deserializer<'de>>(d: D) -> Result<Option<SecretString>, D::Error> {
    Ok(Option::<String>::deserialize(d)?.map(SecretString::from))
}

const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// SMTP settings, present only when host, port, user and password are all set.
pub struct SmtpSettings<'a> {
    pub host: &'a str,
    pub port: u16,
    pub user: &'a str,
    pub pass: &'a SecretString,
}

impl AuthConfig {
    pub fn smtp(&self) -> Option<SmtpSettings<'_>> {
        Some(SmtpSettings {
            host: self.smtp_host.as_deref().filter(|h| !h.is_empty())?,
            port: self.smtp_port?,
            user: self.smtp_user.as_deref().filter(|u| !u.is_empty())?,
            pass: self.smtp_pass.as_ref()?,
        })
    }

    /// `FRONTEND_URL`, then `NEXT_PUBLIC_APP_URL`, then the local dev origin.
    pub fn app_url(&self) -> &str {
        non_empty(&self.frontend_url)
            .or_else(|| non_empty(&self.next_public_app_url))
            .unwrap_or(DEFAULT_APP_URL)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
