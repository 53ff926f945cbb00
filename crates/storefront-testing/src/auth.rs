//! Session helpers for tests that exercise authenticated endpoints.
//!
//! `MockSession` mints a real access token with the test secret, so the
//! service's own `CustomerSession` extractor validates it end to end.

use http::{HeaderMap, HeaderName, HeaderValue};

use storefront_auth_types::cookie::CUSTOMER_SESSION_COOKIE;
use storefront_auth_types::token::issue_access_token;

/// Customer identity to present on test requests.
pub struct MockSession {
    pub customer_id: String,
    pub secret: String,
}

impl MockSession {
    pub fn new(customer_id: &str, secret: &str) -> Self {
        Self {
            customer_id: customer_id.to_owned(),
            secret: secret.to_owned(),
        }
    }

    /// A freshly minted access token for this customer.
    pub fn token(&self) -> String {
        issue_access_token(&self.customer_id, &self.secret)
            .expect("test token should sign")
            .0
    }

    /// Headers carrying the token as `Authorization: Bearer`.
    pub fn bearer_headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token())).unwrap(),
        );
        map
    }

    /// Headers carrying the token as the session cookie.
    pub fn cookie_headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static("cookie"),
            HeaderValue::from_str(&format!("{CUSTOMER_SESSION_COOKIE}={}", self.token())).unwrap(),
        );
        map
    }
}
