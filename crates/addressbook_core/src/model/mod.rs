//! Domain model for the address book.
//!
//! # Invariants
//! - Every persisted contact is identified by a store-assigned `ContactId`.
//! - Contacts are never edited in place; they are created and deleted.

pub mod contact;
