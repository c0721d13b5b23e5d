mod contact_email;
mod contact_message;
mod contact_name;
mod contact_phone;
mod new_contact;
mod submission;
mod validation_error;
// allow external `use` statements to skip `new_contact` etc
pub use contact_email::ContactEmail;
pub use contact_message::ContactMessage;
pub use contact_name::ContactName;
pub use contact_phone::ContactPhone;
pub use new_contact::NewContact;
pub use submission::SubmissionInput;
pub use submission::SubmissionResult;
pub use validation_error::ValidationError;
