//! Lead capture for the marketing site: the contact form posts name, email,
//! phone and message to `POST /api/subscribe`, which validates them,
//! normalises the phone number, and files the lead in a marketing list at the
//! contact provider.
//!
//! Request flow:
//!
//! ```text
//! client::SubmissionClient -> routes::subscribe -> provider_client::ProviderClient -> provider
//! ```
//!
//! Nothing is stored locally, and nothing is retried.

pub mod client;
pub mod configuration;
pub mod domain;
pub mod provider_client;
pub mod routes;
pub mod startup;
pub mod telemetry;

// where tests live:
// 1. embedded (with #[cfg(test)]): unit tests of parsing and error mapping, with
//    access to private items
// 2. tests/api: black-box tests against a spawned server, with the provider
//    replaced by a wiremock server
