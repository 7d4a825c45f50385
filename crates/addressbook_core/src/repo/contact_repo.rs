//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Own the storage handle for the contact table (open/close).
//! - Provide insert, delete-by-id and full-table read.
//!
//! # Invariants
//! - `open` and `close` are idempotent.
//! - Every data operation on a closed store fails with `RepoError::Closed`.
//! - `fetch_all` yields rows in id order, which is insertion order for an
//!   append-only autoincrement table.
//! - No validation is performed here: the schema only requires non-null text.

use crate::db::{open_db, open_db_in_memory, DbError, CONTACTS_TABLE};
use crate::model::contact::{Contact, ContactId};
use log::{debug, error, info};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Operation attempted while the storage handle is not open.
    Closed,
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "contact store is not open"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Closed => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Where the contact database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// SQLite file; parent directories are created on open.
    File(PathBuf),
    /// Private in-memory database. Its rows are lost when the store closes.
    Memory,
}

impl StoreLocation {
    fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

/// Record store interface for contact persistence.
pub trait ContactRepository {
    /// Acquires the storage handle. No-op when already open.
    fn open(&mut self) -> RepoResult<()>;
    /// Releases the storage handle. No-op when already closed or never opened.
    fn close(&mut self) -> RepoResult<()>;
    fn is_open(&self) -> bool;
    /// Appends one row and returns the id assigned by storage.
    fn insert_contact(&self, name: &str, number: &str, email: &str) -> RepoResult<ContactId>;
    /// Removes the row with `id`. Returns `Ok(false)` when no row matched.
    fn delete_by_id(&self, id: ContactId) -> RepoResult<bool>;
    /// Reads every row in storage order.
    fn fetch_all(&self) -> RepoResult<Vec<Contact>>;
}

/// SQLite-backed contact store.
pub struct SqliteContactStore {
    location: StoreLocation,
    conn: Option<Connection>,
}

impl SqliteContactStore {
    /// Creates a closed store for `location`.
    pub fn new(location: StoreLocation) -> Self {
        Self {
            location,
            conn: None,
        }
    }

    /// Creates a closed store over a database file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreLocation::File(path.into()))
    }

    /// Creates a closed store over a private in-memory database.
    pub fn in_memory() -> Self {
        Self::new(StoreLocation::Memory)
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Borrows the live connection, if open.
    pub fn connection(&self) -> Option<&Connection> {
        self.conn.as_ref()
    }

    fn conn(&self) -> RepoResult<&Connection> {
        self.conn.as_ref().ok_or(RepoError::Closed)
    }
}

impl ContactRepository for SqliteContactStore {
    fn open(&mut self) -> RepoResult<()> {
        if self.conn.is_some() {
            return Ok(());
        }

        let conn = match &self.location {
            StoreLocation::File(path) => open_db(path)?,
            StoreLocation::Memory => open_db_in_memory()?,
        };
        self.conn = Some(conn);
        Ok(())
    }

    fn close(&mut self) -> RepoResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                info!(
                    "event=db_close module=repo status=ok mode={}",
                    self.location.mode()
                );
                Ok(())
            }
            Err((_conn, err)) => {
                // The handle is dropped either way; SQLite finalizes on drop.
                error!(
                    "event=db_close module=repo status=error mode={} error={}",
                    self.location.mode(),
                    err
                );
                Err(err.into())
            }
        }
    }

    fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    fn insert_contact(&self, name: &str, number: &str, email: &str) -> RepoResult<ContactId> {
        let conn = self.conn()?;
        conn.execute(
            &format!("INSERT INTO {CONTACTS_TABLE} (name, number, email) VALUES (?1, ?2, ?3);"),
            params![name, number, email],
        )?;

        let id = conn.last_insert_rowid();
        debug!("event=contact_insert module=repo status=ok id={id}");
        Ok(id)
    }

    fn delete_by_id(&self, id: ContactId) -> RepoResult<bool> {
        let changed = self.conn()?.execute(
            &format!("DELETE FROM {CONTACTS_TABLE} WHERE id = ?1;"),
            params![id],
        )?;

        debug!("event=contact_delete module=repo status=ok id={id} changed={changed}");
        Ok(changed > 0)
    }

    fn fetch_all(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn()?.prepare(&format!(
            "SELECT id, name, number, email FROM {CONTACTS_TABLE} ORDER BY id ASC;"
        ))?;

        let contacts = stmt
            .query_map([], parse_contact_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "event=contact_fetch_all module=repo status=ok count={}",
            contacts.len()
        );
        Ok(contacts)
    }
}

fn parse_contact_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get("id")?,
        name: row.get("name")?,
        number: row.get("number")?,
        email: row.get("email")?,
    })
}
