//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers
//! 5. CORS (the contact form may be posted from a separately hosted site)

pub mod auth;
pub mod request_id;
pub mod security_headers;

pub use auth::{ClientAddr, CurrentAdmin};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
