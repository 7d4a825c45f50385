//! Contact domain model.
//!
//! # Responsibility
//! - Define the single record type stored in the address book.
//! - Provide the field projection rendered by browsing surfaces.
//!
//! # Invariants
//! - `id` is assigned by storage on insert and never reused.
//! - `number` and `email` are empty strings when logically absent.

use serde::{Deserialize, Serialize};

/// Store-assigned, auto-incrementing identifier.
///
/// Ids are not dense: deleted ids are never handed out again.
pub type ContactId = i64;

/// One address book entry as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    /// Free-form phone number; may be empty when `email` is set.
    pub number: String,
    /// Email address; may be empty when `number` is set.
    pub email: String,
}

impl Contact {
    /// Returns whether the contact carries a phone number.
    pub fn has_number(&self) -> bool {
        !self.number.is_empty()
    }

    /// Returns whether the contact carries an email address.
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }

    /// Projects the displayable fields of this contact.
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            name: self.name.clone(),
            number: self.number.clone(),
            email: self.email.clone(),
        }
    }
}

/// Render model for a contact card: `{name, number, email}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub number: String,
    pub email: String,
}

impl ContactFields {
    /// Empty card shown once the last contact has been deleted.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.number.is_empty() && self.email.is_empty()
    }
}

impl From<&Contact> for ContactFields {
    fn from(value: &Contact) -> Self {
        value.fields()
    }
}

#[cfg(test)]
mod tests {
    use super::{Contact, ContactFields};

    #[test]
    fn contact_serializes_with_flat_field_names() {
        let contact = Contact {
            id: 7,
            name: "Jane".to_string(),
            number: String::new(),
            email: "jane@example.com".to_string(),
        };

        let value = serde_json::to_value(&contact).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["name"], "Jane");
        assert_eq!(value["number"], "");
        assert!(!contact.has_number());
        assert!(contact.has_email());
    }

    #[test]
    fn blank_fields_are_blank() {
        assert!(ContactFields::blank().is_blank());
    }
}
