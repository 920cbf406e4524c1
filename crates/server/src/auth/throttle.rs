//! Login attempt throttling.
//!
//! Failures are tracked per client address + username. Each failure opens a
//! 30-second cooldown; the fifth consecutive failure escalates to a
//! 10-minute block. A successful login clears the record, and a periodic
//! sweep forgets keys that have gone quiet.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use super::clock::{Clock, SystemClock};

/// Cooldown after each failed attempt.
const COOLDOWN_SECS: i64 = 30;
/// Block applied once `MAX_FAILURES` is reached.
const BLOCK_MINS: i64 = 10;
/// Consecutive failures before the long block kicks in.
const MAX_FAILURES: u32 = 5;
/// Quiet period after a record's deadline before [`LoginThrottle::sweep`]
/// forgets it. Keys contain attacker-chosen usernames, so stale records must
/// not pile up.
const RETENTION_MINS: i64 = 10;

/// Key a throttle record by who is trying to log in as whom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThrottleKey {
    /// Client address as reported by the connection.
    pub client: String,
    /// Username the attempt targeted.
    pub username: String,
}

impl ThrottleKey {
    /// Build a key from a client address and the attempted username.
    #[must_use]
    pub fn new(client: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            client: client.into(),
            username: username.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct Record {
    failures: u32,
    blocked_until: DateTime<Utc>,
}

/// Process-local failed-login tracker.
pub struct LoginThrottle {
    records: Mutex<HashMap<ThrottleKey, Record>>,
    clock: Arc<dyn Clock>,
}

impl LoginThrottle {
    /// Create a throttle on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a throttle on an injected clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Whether `key` is currently blocked from attempting a login.
    ///
    /// Short cooldowns lapse without forgetting the failure count, so
    /// spaced-out wrong guesses still accumulate toward the long block.
    /// Once a full block has been served the record is dropped entirely.
    pub fn is_blocked(&self, key: &ThrottleKey) -> bool {
        let now = self.clock.now();
        let mut records = self.lock();

        match records.get(key) {
            Some(record) if record.blocked_until > now => true,
            Some(record) => {
                if record.failures >= MAX_FAILURES {
                    records.remove(key);
                }
                false
            }
            None => false,
        }
    }

    /// Record a failed attempt for `key`.
    pub fn record_failure(&self, key: &ThrottleKey) {
        let now = self.clock.now();
        let mut records = self.lock();

        let record = records.entry(key.clone()).or_insert(Record {
            failures: 0,
            blocked_until: now,
        });
        record.failures += 1;
        record.blocked_until = if record.failures >= MAX_FAILURES {
            now + Duration::minutes(BLOCK_MINS)
        } else {
            now + Duration::seconds(COOLDOWN_SECS)
        };
    }

    /// Forget all failures for `key`, e.g. after a successful login.
    pub fn clear(&self, key: &ThrottleKey) {
        self.lock().remove(key);
    }

    /// Drop records whose deadline lapsed more than the retention period
    /// ago. Returns how many were removed.
    ///
    /// Recent records survive so spaced-out failures still accumulate toward
    /// the long block; only keys quiet past the retention window are
    /// forgotten.
    pub fn sweep(&self) -> usize {
        let cutoff = self.clock.now() - Duration::minutes(RETENTION_MINS);
        let mut records = self.lock();
        let before = records.len();
        records.retain(|_, record| record.blocked_until > cutoff);
        before - records.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ThrottleKey, Record>> {
        self.records.lock().expect("login throttle mutex poisoned")
    }
}

impl Default for LoginThrottle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoginThrottle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginThrottle")
            .field("records", &self.lock().len())
            .finish_non_exhaustive()
    }
}
