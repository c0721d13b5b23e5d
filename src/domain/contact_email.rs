use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Non-whitespace local part, `@`, non-whitespace domain with at least one
/// dot. Deliberately loose: anything a browser's `type=email` accepts should
/// also pass here, and the provider does its own checks.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Email address of a lead. This is also the provider's unique key for the
/// contact, so repeated submissions with the same address update one record.
#[derive(Debug)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(email: String) -> Result<Self, ValidationError> {
        EMAIL_PATTERN
            .is_match(&email)
            .then_some(Self(email))
            .ok_or(ValidationError::InvalidEmail)
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str { &self.0 }
}
