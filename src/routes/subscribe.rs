use std::fmt::Debug;

use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;
use actix_web::ResponseError;
use anyhow::Context;

use super::error_chain_fmt;
use crate::domain::NewContact;
use crate::domain::SubmissionInput;
use crate::domain::SubmissionResult;
use crate::domain::ValidationError;
use crate::provider_client::ProviderClient;
use crate::provider_client::ProviderError;

pub const CONTACT_CREATED: &str = "Contact created successfully";

/// Upper bound on a submission body. Well above any real form post; the
/// `message` field is free text, so actix's 256 KiB default is too tight.
pub const MAX_SUBMISSION_BYTES: usize = 1024 * 1024;

/// Every way a submission can fail. The `Display` string is what the browser
/// gets in `error`.
#[derive(thiserror::Error)]
pub enum SubmitError {
    #[error("Server configuration error (missing API key)")]
    ServerMisconfigured,
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error("Failed to reach contact provider")]
    UpstreamUnreachable(#[source] reqwest::Error),
    #[error("{message}")]
    UpstreamRejected { status: u16, message: String },
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for SubmitError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<ProviderError> for SubmitError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Unreachable(e) => Self::UpstreamUnreachable(e),
            ProviderError::Rejected { status, message } => {
                Self::UpstreamRejected { status, message }
            }
        }
    }
}

impl ResponseError for SubmitError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ServerMisconfigured | Self::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamUnreachable(_) => StatusCode::BAD_GATEWAY,
            // the provider's own status is passed through, as long as it is
            // actually an error status (reqwest follows redirects, but a stray
            // 1xx/3xx must not reach the browser as a bodiless reply)
            Self::UpstreamRejected { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
        }
    }

    // errors are never returned raw; the browser always gets the same json shape
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(SubmissionResult::failed(self.to_string()))
    }
}

/// `POST /api/subscribe`
///
/// Validate a lead, normalise its phone number, and forward it to the contact
/// provider. Checks run in a fixed order and the first failure is returned:
///
/// 1. provider API key configured (500), before the body is even decoded
/// 2. body is readable, at most `MAX_SUBMISSION_BYTES`, and decodes (500)
/// 3. all four fields non-blank (400)
/// 4. email shape (400)
/// 5. phone parses and is a valid number (400)
/// 6. provider reachable (502)
/// 7. provider accepts (provider's status)
///
/// The phone number is re-parsed here even though `SubmissionClient` already
/// normalised it; the request may not have come from our client at all.
///
/// # Request example
///
/// ```sh
///     curl -i -H 'Content-Type: application/json' \
///         --data '{"name":"John","email":"john@foo.com","phone":"+14155552671","message":"hi"}' \
///         http://127.0.0.1:8000/api/subscribe
/// ```
#[tracing::instrument(
    name = "Capturing new lead",
    skip(payload, provider),
    fields(
        contact_email = tracing::field::Empty,
        contact_name = tracing::field::Empty,
    )
)]
pub async fn subscribe(
    // the raw stream rather than `web::Json`/`web::Bytes`: extractors run (and
    // can fail with their own plain-text errors) before the handler, but the
    // key check must come first and every reply must have our json shape
    payload: web::Payload,
    provider: web::Data<ProviderClient>,
) -> Result<HttpResponse, SubmitError> {
    let api_key = provider.api_key().ok_or(SubmitError::ServerMisconfigured)?;

    let body = payload
        .to_bytes_limited(MAX_SUBMISSION_BYTES)
        .await
        .map_err(|_| anyhow::anyhow!("Submission body too large"))?
        // `actix_web::Error` is not `Send`, so it cannot become an `anyhow::Error`
        .map_err(|e| anyhow::anyhow!("Could not read submission body: {e}"))?;

    let input: SubmissionInput =
        serde_json::from_slice(&body).context("Malformed submission body")?;

    tracing::Span::current()
        .record("contact_email", tracing::field::display(&input.email))
        .record("contact_name", tracing::field::display(&input.name));

    let contact = NewContact::try_from(input)?;

    provider
        .create_contact(&contact, api_key)
        .await
        .map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "could not forward contact");
            e
        })?;

    Ok(HttpResponse::Ok().json(SubmissionResult::succeeded(CONTACT_CREATED)))
}
