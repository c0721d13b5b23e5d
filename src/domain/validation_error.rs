/// Reasons a `SubmissionInput` cannot become a `NewContact`. The `Display`
/// strings are sent back to the browser verbatim.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid or unsupported phone number")]
    InvalidPhone,
}
