use super::ContactEmail;
use super::ContactMessage;
use super::ContactName;
use super::ContactPhone;
use super::SubmissionInput;
use super::ValidationError;

/// A lead that has passed every check and may be forwarded to the provider.
#[derive(Debug)]
pub struct NewContact {
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: ContactPhone,
    pub message: ContactMessage,
}

// the order of checks is observable (each failure has its own message), so all
// four fields are checked for presence before any of them is parsed
impl TryFrom<SubmissionInput> for NewContact {
    type Error = ValidationError;
    fn try_from(value: SubmissionInput) -> Result<Self, Self::Error> {
        let fields = [&value.name, &value.email, &value.phone, &value.message];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ValidationError::MissingFields);
        }

        let email = ContactEmail::parse(value.email)?;
        let phone = ContactPhone::parse(&value.phone)?;
        let name = ContactName::parse(value.name)?;
        let message = ContactMessage::parse(value.message)?;

        Ok(NewContact {
            name,
            email,
            phone,
            message,
        })
    }
}
