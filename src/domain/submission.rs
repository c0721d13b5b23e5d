use serde::Deserialize;
use serde::Serialize;

/// Raw form fields, as posted by the browser (or by `SubmissionClient`).
/// Absent fields deserialize as empty strings, so that they fail the presence
/// check rather than the decoder.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubmissionInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// The uniform reply to every submission: `{"success":true,"message":..}` or
/// `{"success":false,"error":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResult {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}
