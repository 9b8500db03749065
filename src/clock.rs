/**
 * Clock Abstraction
 *
 * Token issuance and expiry checks read the current time through this trait
 * instead of calling `Utc::now()` directly, so tests can freeze or advance
 * time deterministically.
 */
use chrono::{DateTime, Utc};

/// Source of the current time for token signing and verification.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
