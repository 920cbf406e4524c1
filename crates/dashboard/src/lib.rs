//! Sanad admin dashboard client.
//!
//! Fetches the full message list from the server API, then does everything
//! else locally: filtering, sorting, pagination, and CSV export all operate
//! on the in-memory list, so the server is only consulted on refresh and on
//! mutations (mark read, delete).
//!
//! # Modules
//!
//! - [`api`] - HTTP client for the server's JSON API
//! - [`view`] - In-memory filter/sort/paginate pipeline
//! - [`csv`] - CSV export of the filtered view

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod csv;
pub mod view;

pub use api::{ApiClient, ApiError};
pub use view::{Dashboard, PageView, ReadFilter, SortOrder, Stats};
