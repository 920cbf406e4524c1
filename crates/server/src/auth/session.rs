//! In-memory session registry.
//!
//! Sessions are opaque 32-byte hex tokens with a sliding 12-hour expiry:
//! every successful validation pushes the deadline forward. A periodic sweep
//! evicts tokens that expired without being touched again.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

use super::clock::{Clock, SystemClock};

/// Sliding session lifetime.
const SESSION_TTL_HOURS: i64 = 12;
/// Token length in bytes (hex-encoded to 64 chars).
const TOKEN_LEN: usize = 32;

/// A live session for an authenticated admin.
#[derive(Debug, Clone)]
pub struct Session {
    /// Admin row id the session was issued to.
    pub admin_id: i64,
    /// Username the session was issued to.
    pub username: String,
    /// Instant after which the token is rejected.
    pub expires_at: DateTime<Utc>,
}

/// A freshly issued token together with its expiry.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Opaque bearer token.
    pub token: String,
    /// Initial expiry instant.
    pub expires_at: DateTime<Utc>,
}

/// Process-local store of active session tokens.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Session>>,
    clock: Arc<dyn Clock>,
}

impl SessionRegistry {
    /// Create a registry on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a registry on an injected clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Issue a new session token for the given admin.
    pub fn issue(&self, admin_id: i64, username: &str) -> IssuedSession {
        let mut bytes = [0u8; TOKEN_LEN];
        rand::rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        let expires_at = self.clock.now() + Duration::hours(SESSION_TTL_HOURS);
        let session = Session {
            admin_id,
            username: username.to_owned(),
            expires_at,
        };

        self.lock().insert(token.clone(), session);
        IssuedSession { token, expires_at }
    }

    /// Validate `token`, sliding its expiry forward on success.
    ///
    /// Expired tokens are evicted on the spot and reported as absent.
    pub fn validate(&self, token: &str) -> SessionStatus {
        let now = self.clock.now();
        let mut sessions = self.lock();

        let Some(session) = sessions.get_mut(token) else {
            return SessionStatus::Unknown;
        };

        if session.expires_at <= now {
            sessions.remove(token);
            return SessionStatus::Expired;
        }

        session.expires_at = now + Duration::hours(SESSION_TTL_HOURS);
        SessionStatus::Valid(session.clone())
    }

    /// Drop `token` if present. Idempotent.
    pub fn revoke(&self, token: &str) {
        self.lock().remove(token);
    }

    /// Evict every expired session. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at > now);
        before - sessions.len()
    }

    /// Number of live entries, counting any not yet swept.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the registry holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().expect("session registry mutex poisoned")
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.len())
            .finish_non_exhaustive()
    }
}

/// Outcome of a token validation.
#[derive(Debug, Clone)]
pub enum SessionStatus {
    /// Token is live; expiry has been extended.
    Valid(Session),
    /// Token was never issued or already revoked/swept.
    Unknown,
    /// Token existed but its deadline passed.
    Expired,
}
