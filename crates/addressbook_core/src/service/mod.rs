//! Core use-case services.
//!
//! # Responsibility
//! - Validate input once, at the boundary, before it reaches storage.
//! - Keep presentation layers decoupled from storage and cursor details.

pub mod contact_service;
