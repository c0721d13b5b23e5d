use std::time::Duration;

use reqwest::Client;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Serialize;

use crate::domain::NewContact;

/// Client for the external contact-list provider (Brevo's `/v3/contacts`
/// API). It is the only place the API key leaves the process.
pub struct ProviderClient {
    http_client: Client,
    base_url: String,
    api_key: Option<Secret<String>>,
    list_id: u64,
    update_enabled: bool,
}

// establishing a HTTP connection is expensive, so a single `Client` is built at
// startup and shared (via `web::Data`) by every worker; `Client` pools
// connections internally

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateContactRequest<'a> {
    email: &'a str,
    attributes: ContactAttributes<'a>,
    list_ids: [u64; 1],
    update_enabled: bool,
}

/// Attribute names are defined by the provider account, not by us.
#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct ContactAttributes<'a> {
    firstname: &'a str,
    sms: &'a str,
    message: &'a str,
}

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    /// DNS, connection, TLS, or timeout; no response was received
    #[error("Failed to reach contact provider")]
    Unreachable(#[source] reqwest::Error),
    /// The provider answered with a non-2xx status. `message` is the provider's
    /// own explanation where it gave one.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

pub const GENERIC_REJECTION: &str = "Contact provider request failed";

impl ProviderClient {
    pub fn new(
        base_url: String,
        api_key: Option<Secret<String>>,
        list_id: u64,
        update_enabled: bool,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        // only fails if the TLS backend cannot be initialised
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            api_key,
            list_id,
            update_enabled,
        })
    }

    /// The credential, if one was configured. A blank value (e.g.
    /// `APP_PROVIDER__API_KEY=`) counts as missing.
    pub fn api_key(&self) -> Option<&Secret<String>> {
        self.api_key
            .as_ref()
            .filter(|k| !k.expose_secret().trim().is_empty())
    }

    /// Create the contact, or update it if the email is already known (when
    /// `update_enabled`). Exactly one request is made; there is no retry.
    #[tracing::instrument(name = "Forwarding contact to provider", skip_all)]
    pub async fn create_contact(
        &self,
        contact: &NewContact,
        api_key: &Secret<String>,
    ) -> Result<(), ProviderError> {
        let url = format!("{}/contacts", self.base_url);
        let body = CreateContactRequest {
            email: contact.email.as_ref(),
            attributes: ContactAttributes {
                firstname: contact.name.as_ref(),
                sms: contact.phone.as_ref(),
                message: contact.message.as_ref(),
            },
            list_ids: [self.list_id],
            update_enabled: self.update_enabled,
        };

        let resp = self
            .http_client
            .post(&url)
            .header("accept", "application/json")
            .header("api-key", api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::Unreachable)?;

        let status = resp.status();
        // the body is only of interest on failure, but it is read either way so
        // the connection can be reused. an empty or non-json body is not an error
        let data = resp.json::<serde_json::Value>().await.ok();

        if status.is_success() {
            return Ok(());
        }

        tracing::error!(status = status.as_u16(), body = ?data, "provider rejected contact");

        let message = data
            .as_ref()
            .and_then(|d| d.get("message"))
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERIC_REJECTION)
            .to_string();

        Err(ProviderError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
