//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{Clock, LoginThrottle, SessionRegistry, SystemClock};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: the database pool, the session registry, and the
/// login throttle.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: SqlitePool,
    sessions: SessionRegistry,
    throttle: LoginThrottle,
}

impl AppState {
    /// Create a new application state on the system clock.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    /// Create a new application state with an injected clock, so tests can
    /// drive session expiry and lockout timing deterministically.
    #[must_use]
    pub fn with_clock(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                pool,
                sessions: SessionRegistry::with_clock(clock.clone()),
                throttle: LoginThrottle::with_clock(clock),
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the session registry.
    #[must_use]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.inner.sessions
    }

    /// Get a reference to the login throttle.
    #[must_use]
    pub fn throttle(&self) -> &LoginThrottle {
        &self.inner.throttle
    }
}
