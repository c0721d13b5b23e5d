//! The browser half of the pipeline: what the contact form does when "Send
//! Message" is pressed. Validation here is only a fast path; the handler
//! repeats all of it.

use std::fmt::Display;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use reqwest::Client;

use crate::domain::ContactPhone;
use crate::domain::SubmissionInput;
use crate::domain::SubmissionResult;

/// Contents of the contact form. `website` is the honeypot: it is hidden from
/// people, so only bots fill it in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub website: String,
}

impl ContactForm {
    /// Reset the visible fields, e.g. after a successful submission.
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.phone.clear();
        self.message.clear();
    }
}

/// What the user is told after pressing submit (a toast, in the browser).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Sent,
    SpamDetected,
    MissingFields,
    InvalidPhone,
    /// The handler refused the submission; carries its `error` text
    Rejected(String),
    /// No usable response from the handler
    ServerError,
    /// A previous submission from this form has not finished yet
    Busy,
}

impl Notification {
    pub fn is_success(&self) -> bool { matches!(self, Self::Sent) }
}

const REJECTED_FALLBACK: &str = "Something went wrong. Try again.";

impl Display for Notification {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Sent => write!(f, "Message sent successfully!"),
            Self::SpamDetected => write!(f, "Spam detected. Submission blocked."),
            Self::MissingFields => write!(f, "Please fill in all fields"),
            Self::InvalidPhone => write!(
                f,
                "Please enter a valid phone number (include country code, e.g., +234...)"
            ),
            Self::Rejected(e) => write!(f, "{e}"),
            Self::ServerError => write!(f, "Server error. Please try again later."),
            Self::Busy => write!(f, "A submission is already in progress"),
        }
    }
}

/// Submits one form to the handler. Holds the form's busy flag, so one client
/// per form instance.
pub struct SubmissionClient {
    http_client: Client,
    endpoint: String,
    in_flight: AtomicBool,
}

/// Clears the busy flag when the submission finishes, or when its future is
/// dropped mid-flight.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) { self.0.store(false, Ordering::Release); }
}

impl SubmissionClient {
    /// `base_url` is the site origin, e.g. `http://localhost:8000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            endpoint: format!("{base_url}/api/subscribe"),
            in_flight: AtomicBool::new(false),
        }
    }

    fn acquire(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(&self.in_flight))
    }

    /// Validate `form` locally, then post it. The form is cleared only when the
    /// handler reports success; on any failure it is left exactly as it was.
    ///
    /// Nothing is retried; the user resubmits by hand.
    #[tracing::instrument(name = "Submitting contact form", skip_all)]
    pub async fn submit(
        &self,
        form: &mut ContactForm,
    ) -> Notification {
        let Some(_guard) = self.acquire() else {
            return Notification::Busy;
        };

        if !form.website.is_empty() {
            return Notification::SpamDetected;
        }

        let fields = [&form.name, &form.email, &form.phone, &form.message];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Notification::MissingFields;
        }

        let phone = match ContactPhone::parse(&form.phone) {
            Ok(phone) => phone,
            Err(_) => return Notification::InvalidPhone,
        };

        let input = SubmissionInput {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: phone.as_ref().to_string(),
            message: form.message.clone(),
        };

        let resp = match self.http_client.post(&self.endpoint).json(&input).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "handler unreachable");
                return Notification::ServerError;
            }
        };

        // the status code is not consulted; only an explicit `success: true`
        // counts
        let result = match resp.json::<SubmissionResult>().await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "undecodable handler response");
                return Notification::ServerError;
            }
        };

        match result.success {
            true => {
                form.clear();
                Notification::Sent
            }
            false => Notification::Rejected(
                result
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or(REJECTED_FALLBACK.to_string()),
            ),
        }
    }
}
