//! Sanad Core - Shared types library.
//!
//! This crate provides common types used across all Sanad components:
//! - `server` - Public contact API and admin endpoints
//! - `dashboard` - Admin dashboard client (fetch, filter, export)
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, email addresses, contact messages, read flags
//! - [`text`] - Input normalization shared by server and clients

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod text;
pub mod types;

pub use text::normalize_text;
pub use types::*;
