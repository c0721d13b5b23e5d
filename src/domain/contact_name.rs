use super::ValidationError;

/// The contact's first name, as typed. Only blankness is rejected; the
/// provider stores whatever it receives in `FIRSTNAME`.
///
/// Must be instantiated with `ContactName::parse`.
#[derive(Debug)]
pub struct ContactName(String);

impl ContactName {
    pub fn parse(name: String) -> Result<Self, ValidationError> {
        match name.trim().is_empty() {
            true => Err(ValidationError::MissingFields),
            false => Ok(Self(name)),
        }
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str { &self.0 }
}
