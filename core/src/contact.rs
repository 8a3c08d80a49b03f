//! Contact messages sent from the site's "get in touch" form.

use crate::types::ContactMessage;
use crate::validation::{has_max_chars, has_min_chars, is_valid_email, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactMessage {
    /// Name 2-100 characters, a valid email, message 10-1000 characters.
    pub fn validate(&self) -> Result<(), FieldErrors<ContactField>> {
        let mut errors = FieldErrors::new();
        if !has_min_chars(&self.name, 2) || !has_max_chars(&self.name, 100) {
            errors.insert(ContactField::Name, "Name must be 2-100 characters");
        }
        if !is_valid_email(&self.email) {
            errors.insert(ContactField::Email, "Valid email is required");
        }
        if !has_min_chars(&self.message, 10) || !has_max_chars(&self.message, 1000) {
            errors.insert(ContactField::Message, "Message must be 10-1000 characters");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
