//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract used by the contact service.
//! - Isolate SQLite query details from orchestration.
//!
//! # Invariants
//! - Repositories store what they are given; input validation happens in the
//!   service layer.

pub mod contact_repo;
