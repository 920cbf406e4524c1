//! Sanad server library.
//!
//! The HTTP surface is a JSON API under `/api` (contact submission, admin
//! login/logout, message triage) plus `/health` endpoints. The binary in
//! `main.rs` wires configuration, the database pool, and the router together;
//! everything else lives here so integration tests can drive the router
//! in-process.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`db`] - SQLite pool, migrations, and repositories
//! - [`auth`] - Session registry, login throttle, password hashing
//! - [`middleware`] - Bearer-token extractor, request ids, security headers
//! - [`routes`] - Request handlers and router assembly
//! - [`error`] - The `AppError` taxonomy
//! - [`state`] - Shared application state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
