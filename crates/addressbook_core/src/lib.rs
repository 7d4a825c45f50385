//! Core logic for a personal address book.
//!
//! Contacts live in a local SQLite table; a cursor steps through the loaded
//! rows one at a time and the contact service validates, stores and deletes
//! entries on behalf of presentation layers.

pub mod config;
pub mod cursor;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::AddressBookConfig;
pub use cursor::navigator::{CursorNavigator, Direction};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{Contact, ContactFields, ContactId};
pub use repo::contact_repo::{
    ContactRepository, RepoError, RepoResult, SqliteContactStore, StoreLocation,
};
pub use service::contact_service::{
    is_valid_email, ContactDraft, ContactService, ContactServiceError, ContactServiceResult,
    Navigation, StorageError, ValidationError, ENTRY_ADDED_MESSAGE,
};
