//! In-memory positioning over the loaded contact rows.
//!
//! # Responsibility
//! - Track one logical position over the most recently fetched rows.
//! - Step first/last/next/previous without touching storage.

pub mod navigator;
