use super::ValidationError;

/// Free text left by the lead, forwarded as the `MESSAGE` attribute.
#[derive(Debug)]
pub struct ContactMessage(String);

impl ContactMessage {
    pub fn parse(message: String) -> Result<Self, ValidationError> {
        match message.trim().is_empty() {
            true => Err(ValidationError::MissingFields),
            false => Ok(Self(message)),
        }
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str { &self.0 }
}
