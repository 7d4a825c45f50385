//! Host-supplied configuration for the address book core.
//!
//! # Responsibility
//! - Describe where the database lives and how logging is set up.
//! - Build a ready-to-browse `ContactService` from that description.
//!
//! # Invariants
//! - `db_path = None` selects a private in-memory database.
//! - `log_dir = None` leaves logging uninitialized.

use crate::logging::{default_log_level, init_logging};
use crate::repo::contact_repo::{SqliteContactStore, StoreLocation};
use crate::service::contact_service::{ContactService, StorageError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default database file name, used by hosts that only pick a data directory.
pub const DEFAULT_DB_FILE_NAME: &str = "addressbook.sqlite";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressBookConfig {
    /// SQLite file path.
    pub db_path: Option<PathBuf>,
    /// One of trace|debug|info|warn|error.
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<PathBuf>,
}

impl Default for AddressBookConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AddressBookConfig {
    /// Config with the default database file inside `data_dir`.
    pub fn in_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(data_dir.into().join(DEFAULT_DB_FILE_NAME)),
            ..Self::default()
        }
    }

    pub fn store_location(&self) -> StoreLocation {
        match &self.db_path {
            Some(path) => StoreLocation::File(path.clone()),
            None => StoreLocation::Memory,
        }
    }

    /// Starts logging when `log_dir` is set.
    pub fn init_logging(&self) -> Result<(), String> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(());
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir is not valid UTF-8: {}", log_dir.display()))?;
        init_logging(&self.log_level, log_dir)
    }

    /// Opens the configured store and loads its contacts.
    pub fn open_service(&self) -> Result<ContactService<SqliteContactStore>, StorageError> {
        let mut service = ContactService::new(SqliteContactStore::new(self.store_location()));
        service.initialise()?;
        Ok(service)
    }
}

#[cfg(test)]
mod tests {
    use super::{AddressBookConfig, DEFAULT_DB_FILE_NAME};
    use crate::logging::default_log_level;
    use crate::repo::contact_repo::StoreLocation;
    use std::path::PathBuf;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: AddressBookConfig =
            serde_json::from_str(r#"{"db_path": "/data/contacts.sqlite"}"#).unwrap();
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
        assert_eq!(
            config.store_location(),
            StoreLocation::File(PathBuf::from("/data/contacts.sqlite"))
        );
    }

    #[test]
    fn default_config_uses_memory_and_skips_logging() {
        let config = AddressBookConfig::default();
        assert_eq!(config.store_location(), StoreLocation::Memory);
        assert!(config.init_logging().is_ok());
    }

    #[test]
    fn data_dir_config_points_at_default_file() {
        let config = AddressBookConfig::in_data_dir("/data");
        assert_eq!(
            config.db_path,
            Some(PathBuf::from("/data").join(DEFAULT_DB_FILE_NAME))
        );
    }
}
