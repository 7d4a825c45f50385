//! Contact use-case service.
//!
//! # Responsibility
//! - Validate and persist new contacts.
//! - Delete the contact under the cursor and pick the next one to show.
//! - Delegate browsing to the owned `CursorNavigator`.
//!
//! # Invariants
//! - A contact reaches storage only with a non-blank name and at least one
//!   of number/email; a non-blank email must match `EMAIL_ADDRESS_RE`.
//! - `add_contact` does not touch the navigator; callers refresh afterwards.
//! - Every failure leaves the store usable.

use crate::cursor::navigator::{CursorNavigator, Direction};
use crate::model::contact::{Contact, ContactFields, ContactId};
use crate::repo::contact_repo::{ContactRepository, RepoError};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Shown after a contact was stored.
pub const ENTRY_ADDED_MESSAGE: &str = "Entry added";

static EMAIL_ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    )
    .expect("valid email regex")
});

/// Input rejected before any storage access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is blank after trim.
    EmptyName,
    /// Both number and email are blank after trim.
    MissingContactMethod,
    /// Email is non-blank but not a valid address.
    InvalidEmail,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyName => "You must enter a name",
            Self::MissingContactMethod => "You must enter either a number or an email address",
            Self::InvalidEmail => "Email address is invalid",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "contact name must not be blank"),
            Self::MissingContactMethod => {
                write!(f, "contact needs a phone number or an email address")
            }
            Self::InvalidEmail => write!(f, "email address is not valid"),
        }
    }
}

impl Error for ValidationError {}

/// Storage-side failure of a contact use-case.
#[derive(Debug)]
pub enum StorageError {
    /// The store rejected the new row.
    InsertFailed(RepoError),
    /// No contact is positioned, or it was already gone from storage.
    NoCurrentEntry,
    /// The store failed while deleting.
    DeleteFailed(RepoError),
    /// The store failed while reading rows back.
    ReadFailed(RepoError),
    /// The storage handle could not be acquired.
    OpenFailed(RepoError),
    /// The storage handle could not be released cleanly.
    CloseFailed(RepoError),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NoCurrentEntry => "Nothing to delete",
            Self::InsertFailed(_)
            | Self::DeleteFailed(_)
            | Self::ReadFailed(_)
            | Self::OpenFailed(_)
            | Self::CloseFailed(_) => "Something went wrong, please try again.",
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsertFailed(err) => write!(f, "failed to insert contact: {err}"),
            Self::NoCurrentEntry => write!(f, "no current contact to delete"),
            Self::DeleteFailed(err) => write!(f, "failed to delete contact: {err}"),
            Self::ReadFailed(err) => write!(f, "failed to read contacts: {err}"),
            Self::OpenFailed(err) => write!(f, "failed to open contact store: {err}"),
            Self::CloseFailed(err) => write!(f, "failed to close contact store: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InsertFailed(err)
            | Self::DeleteFailed(err)
            | Self::ReadFailed(err)
            | Self::OpenFailed(err)
            | Self::CloseFailed(err) => Some(err),
            Self::NoCurrentEntry => None,
        }
    }
}

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ContactServiceError {
    Validation(ValidationError),
    Storage(StorageError),
}

impl ContactServiceError {
    /// Message suitable for a short on-screen notice.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.user_message(),
            Self::Storage(err) => err.user_message(),
        }
    }
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ContactServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for ContactServiceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

pub type ContactServiceResult<T> = Result<T, ContactServiceError>;

/// Outcome of one navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The cursor moved onto this contact.
    Moved(Contact),
    /// The step hit a boundary of a non-empty address book.
    NoMoreEntries,
    /// There are no contacts at all.
    Empty,
}

impl Navigation {
    pub fn contact(&self) -> Option<&Contact> {
        match self {
            Self::Moved(contact) => Some(contact),
            Self::NoMoreEntries | Self::Empty => None,
        }
    }

    pub fn into_contact(self) -> Option<Contact> {
        match self {
            Self::Moved(contact) => Some(contact),
            Self::NoMoreEntries | Self::Empty => None,
        }
    }

    /// Notice to show for a step that did not move, if any.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::NoMoreEntries => Some("No more entries to show"),
            Self::Moved(_) | Self::Empty => None,
        }
    }
}

/// Validated contact input, kept exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub number: String,
    pub email: String,
}

impl ContactDraft {
    /// Checks the contact invariants in order: name, then contact method,
    /// then email format.
    ///
    /// Blankness is judged after trimming; the email pattern is matched
    /// against the raw text, so surrounding whitespace makes it invalid.
    pub fn parse(name: &str, number: &str, email: &str) -> Result<Self, ValidationError> {
        if is_blank(name) {
            return Err(ValidationError::EmptyName);
        }
        if is_blank(number) && is_blank(email) {
            return Err(ValidationError::MissingContactMethod);
        }
        if !is_blank(email) && !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(Self {
            name: name.to_string(),
            number: number.to_string(),
            email: email.to_string(),
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns whether `email` is a syntactically valid address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_ADDRESS_RE.is_match(email)
}

/// Contact service facade over a repository and one cursor.
pub struct ContactService<R: ContactRepository> {
    repo: R,
    navigator: CursorNavigator,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service with an empty navigator. The store is not opened.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            navigator: CursorNavigator::new(),
        }
    }

    /// Opens the store (if needed) and loads all rows with the cursor unset.
    pub fn initialise(&mut self) -> Result<(), StorageError> {
        self.repo.open().map_err(StorageError::OpenFailed)?;
        let rows = self.repo.fetch_all().map_err(StorageError::ReadFailed)?;
        info!(
            "event=contacts_load module=service status=ok count={}",
            rows.len()
        );
        self.navigator.load(rows);
        Ok(())
    }

    /// Releases the store handle. Safe to call repeatedly.
    pub fn close(&mut self) -> Result<(), StorageError> {
        self.repo.close().map_err(StorageError::CloseFailed)
    }

    /// Re-reads rows after an external mutation, keeping the numeric position.
    pub fn refresh(&mut self) -> Result<(), StorageError> {
        let rows = self.repo.fetch_all().map_err(StorageError::ReadFailed)?;
        self.navigator.refresh_preserving_position(rows);
        Ok(())
    }

    /// Refreshes and shows the last contact, where a new entry lands.
    pub fn reload_and_show_last(&mut self) -> Result<Navigation, StorageError> {
        self.refresh()?;
        Ok(self.navigate(Direction::Last))
    }

    /// Validates and stores a new contact, returning its id.
    ///
    /// The navigator is left untouched; call `refresh` or
    /// `reload_and_show_last` to see the new row.
    pub fn add_contact(
        &mut self,
        name: &str,
        number: &str,
        email: &str,
    ) -> ContactServiceResult<ContactId> {
        let draft = match ContactDraft::parse(name, number, email) {
            Ok(draft) => draft,
            Err(err) => {
                info!("event=contact_add module=service status=rejected reason={err:?}");
                return Err(err.into());
            }
        };

        match self
            .repo
            .insert_contact(&draft.name, &draft.number, &draft.email)
        {
            Ok(id) => {
                info!("event=contact_add module=service status=ok id={id}");
                Ok(id)
            }
            Err(err) => {
                warn!("event=contact_add module=service status=error error={err}");
                Err(StorageError::InsertFailed(err).into())
            }
        }
    }

    /// Deletes the contact under the cursor and returns the one to show next.
    ///
    /// After the delete the rows are reloaded; the contact that followed the
    /// removed one is preferred, then the one before it. `Ok(None)` means no
    /// contacts remain.
    pub fn delete_current(&mut self) -> Result<Option<Contact>, StorageError> {
        let id = self
            .navigator
            .current()
            .map(|contact| contact.id)
            .ok_or(StorageError::NoCurrentEntry)?;

        let deleted = self
            .repo
            .delete_by_id(id)
            .map_err(StorageError::DeleteFailed)?;
        if !deleted {
            warn!("event=contact_delete module=service status=missing id={id}");
            return Err(StorageError::NoCurrentEntry);
        }
        info!("event=contact_delete module=service status=ok id={id}");

        let rows = self.repo.fetch_all().map_err(StorageError::ReadFailed)?;
        self.navigator.reload_after_removal(rows);

        if let Some(next) = self.navigator.move_next() {
            return Ok(Some(next.clone()));
        }
        // A failed `move_next` parks on the last row, which is the predecessor of
        // the removed one.
        Ok(self.navigator.current().cloned())
    }

    /// Moves the cursor one step.
    pub fn navigate(&mut self, direction: Direction) -> Navigation {
        if self.navigator.is_empty() {
            return Navigation::Empty;
        }

        match self.navigator.step(direction) {
            Some(contact) => Navigation::Moved(contact.clone()),
            None => Navigation::NoMoreEntries,
        }
    }

    /// Fields to render for the current contact, blank when none is current.
    pub fn current_fields(&self) -> ContactFields {
        self.navigator
            .current()
            .map(ContactFields::from)
            .unwrap_or_else(ContactFields::blank)
    }

    pub fn current(&self) -> Option<&Contact> {
        self.navigator.current()
    }

    pub fn navigator(&self) -> &CursorNavigator {
        &self.navigator
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}

#[cfg(test)]
mod tests {
    use super::{
        is_valid_email, ContactDraft, RepoError, StorageError, ValidationError,
        ENTRY_ADDED_MESSAGE,
    };

    #[test]
    fn email_pattern_accepts_common_addresses() {
        for email in [
            "jane@example.com",
            "jane.doe+tag@mail.example.co.uk",
            "j_d%1@sub-domain.org",
        ] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn email_pattern_rejects_malformed_addresses() {
        for email in [
            "not-an-email",
            "jane@",
            "@example.com",
            "jane@example",
            "jane@-example.com",
            "jane doe@example.com",
            "jane@example..com",
        ] {
            assert!(!is_valid_email(email), "{email} should be invalid");
        }
    }

    #[test]
    fn draft_checks_name_before_contact_method() {
        assert_eq!(
            ContactDraft::parse("  ", "", "").unwrap_err(),
            ValidationError::EmptyName
        );
        assert_eq!(
            ContactDraft::parse("Jane", " ", "\t").unwrap_err(),
            ValidationError::MissingContactMethod
        );
    }

    #[test]
    fn draft_keeps_fields_as_entered() {
        let draft = ContactDraft::parse(" Jane ", " 555 ", "jane@example.com").unwrap();
        assert_eq!(draft.name, " Jane ");
        assert_eq!(draft.number, " 555 ");
        assert_eq!(draft.email, "jane@example.com");

        let draft = ContactDraft::parse("Jane", "555", "  ").unwrap();
        assert_eq!(draft.email, "  ");
    }

    #[test]
    fn draft_matches_email_pattern_against_untrimmed_text() {
        assert_eq!(
            ContactDraft::parse("Jane", "", " jane@example.com ").unwrap_err(),
            ValidationError::InvalidEmail
        );
    }

    #[test]
    fn user_messages_match_form_notices() {
        assert_eq!(
            ValidationError::InvalidEmail.user_message(),
            "Email address is invalid"
        );
        assert_eq!(ENTRY_ADDED_MESSAGE, "Entry added");
    }

    #[test]
    fn close_failure_names_the_close_operation() {
        let err = StorageError::CloseFailed(RepoError::Closed);
        assert!(err.to_string().starts_with("failed to close contact store"));
        assert_eq!(err.user_message(), "Something went wrong, please try again.");
    }
}
