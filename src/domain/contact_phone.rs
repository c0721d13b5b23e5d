use phonenumber::Mode;

use super::ValidationError;

/// A phone number in canonical international (E.164) form: `+`, country
/// calling code, subscriber number, no separators.
///
/// The country is inferred from the string alone, so anything that is not
/// already prefixed with a calling code is rejected. Both the browser-side
/// client and the handler run this parse; the handler never trusts the
/// client's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPhone(String);

impl ContactPhone {
    pub fn parse(phone: &str) -> Result<Self, ValidationError> {
        let number =
            phonenumber::parse(None, phone.trim()).map_err(|_| ValidationError::InvalidPhone)?;
        // parses can succeed for numbers that are not assignable (wrong length
        // for the region, unallocated ranges, etc)
        match phonenumber::is_valid(&number) {
            true => Ok(Self(number.format().mode(Mode::E164).to_string())),
            false => Err(ValidationError::InvalidPhone),
        }
    }
}

impl AsRef<str> for ContactPhone {
    fn as_ref(&self) -> &str { &self.0 }
}
