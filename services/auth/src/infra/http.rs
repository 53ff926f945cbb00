//! HTTP adapters for the commerce platform's identity and customer APIs.

use anyhow::{Context as _, anyhow};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use storefront_domain::email::Email;
use storefront_domain::id::{AuthIdentityId, CustomerId};
use storefront_domain::password::Password;

use crate::domain::repository::{
    CustomerDirectory, IdentityProvider, PasswordUpdate, Registration,
};
use crate::domain::types::{AuthIdentity, Customer, CustomerProfile};
use crate::error::AuthServiceError;

/// `base` with `segments` appended as percent-encoded path segments.
fn endpoint(base: &Url, segments: &[&str]) -> anyhow::Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| anyhow!("base url cannot carry a path: {base}"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

// ── Identity provider ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpIdentityProvider {
    pub client: reqwest::Client,
    pub base_url: Url,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
}

#[derive(Serialize)]
struct AuthenticateBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    entity_id: &'a str,
    password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct IdentityResponse {
    #[serde(default)]
    success: bool,
    auth_identity: Option<AuthIdentity>,
    error: Option<String>,
}

/// 5xx is an outage; any other status carries the provider's verdict. A 4xx
/// without a readable body is treated as a bare rejection.
async fn read_identity_response(resp: reqwest::Response) -> anyhow::Result<IdentityResponse> {
    let status = resp.status();
    if status.is_server_error() {
        return Err(anyhow!("identity provider returned {status}"));
    }
    match resp.json::<IdentityResponse>().await {
        Ok(body) => Ok(IdentityResponse {
            success: body.success && status.is_success(),
            ..body
        }),
        Err(_) if status.is_client_error() => Ok(IdentityResponse::default()),
        Err(e) => Err(e).context("decode identity provider response"),
    }
}

impl HttpIdentityProvider {
    async fn post<B: Serialize>(
        &self,
        provider: &str,
        action: &str,
        body: &B,
    ) -> anyhow::Result<IdentityResponse> {
        let url = endpoint(&self.base_url, &["auth", provider, action])?;
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("identity provider {action} request"))?;
        read_identity_response(resp).await
    }
}

impl IdentityProvider for HttpIdentityProvider {
    async fn register(
        &self,
        provider: &str,
        email: &Email,
        password: &Password,
        profile: &CustomerProfile,
    ) -> Result<Registration, AuthServiceError> {
        let body = RegisterBody {
            email: email.as_str(),
            password: password.expose(),
            first_name: profile.first_name.as_deref(),
            last_name: profile.last_name.as_deref(),
        };
        let resp = self.post(provider, "register", &body).await?;
        Ok(match resp.auth_identity {
            Some(identity) if resp.success => Registration::Created(identity),
            _ => Registration::Rejected(resp.error),
        })
    }

    async fn authenticate(
        &self,
        provider: &str,
        email: &Email,
        password: &Password,
    ) -> Result<bool, AuthServiceError> {
        let body = AuthenticateBody {
            email: email.as_str(),
            password: password.expose(),
        };
        let resp = self.post(provider, "authenticate", &body).await?;
        Ok(resp.success)
    }

    async fn update_password(
        &self,
        provider: &str,
        entity_id: &str,
        password: &Password,
    ) -> Result<PasswordUpdate, AuthServiceError> {
        let body = UpdateBody {
            entity_id,
            password: password.expose(),
        };
        let resp = self.post(provider, "update", &body).await?;
        Ok(if resp.success {
            PasswordUpdate::Updated
        } else {
            PasswordUpdate::Rejected(resp.error)
        })
    }
}

// ── Customer directory ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpCustomerDirectory {
    pub client: reqwest::Client,
    pub base_url: Url,
}

#[derive(Deserialize)]
struct CustomerList {
    customers: Vec<Customer>,
}

#[derive(Deserialize)]
struct CustomerEnvelope {
    customer: Customer,
}

#[derive(Serialize)]
struct CreateCustomerBody<'a> {
    auth_identity_id: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
}

impl CustomerDirectory for HttpCustomerDirectory {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Customer>, AuthServiceError> {
        let mut url = endpoint(&self.base_url, &["customers"])?;
        url.query_pairs_mut().append_pair("email", email.as_str());
        let list: CustomerList = self
            .client
            .get(url)
            .send()
            .await
            .context("list customers by email")?
            .error_for_status()
            .context("list customers by email")?
            .json()
            .await
            .context("decode customer list")?;
        // The directory filters server-side; keep the exact match in case it
        // ever falls back to a prefix or case-insensitive search.
        Ok(list
            .customers
            .into_iter()
            .find(|c| c.email.as_deref() == Some(email.as_str())))
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, AuthServiceError> {
        let url = endpoint(&self.base_url, &["customers", &id.0])?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .context("get customer")?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let envelope: CustomerEnvelope = resp
            .error_for_status()
            .context("get customer")?
            .json()
            .await
            .context("decode customer")?;
        Ok(Some(envelope.customer))
    }

    async fn create_account(
        &self,
        identity: &AuthIdentityId,
        email: &Email,
        profile: &CustomerProfile,
    ) -> Result<(), AuthServiceError> {
        let url = endpoint(&self.base_url, &["customers"])?;
        let body = CreateCustomerBody {
            auth_identity_id: &identity.0,
            email: email.as_str(),
            first_name: profile.first_name.as_deref(),
            last_name: profile.last_name.as_deref(),
        };
        self.client
            .post(url)
            .json(&body)
            .send()
            .await
            .context("create customer account")?
            .error_for_status()
            .context("create customer account")?;
        Ok(())
    }
}
