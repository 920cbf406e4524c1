//! Authentication building blocks.
//!
//! Sessions and the login throttle are process-local maps, rebuilt empty on
//! restart (forcing re-login, which is acceptable here). Both take an
//! injected [`Clock`] so expiry and lockout timing are testable without
//! wall-clock sleeps.

pub mod clock;
pub mod password;
pub mod session;
pub mod throttle;

pub use clock::{Clock, ManualClock, SystemClock};
pub use session::{IssuedSession, Session, SessionRegistry, SessionStatus};
pub use throttle::{LoginThrottle, ThrottleKey};
