//! Time source for version and dataset timestamps.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Supplies the current time.
///
/// No monotonicity is promised: [`SystemClock`] follows the wall clock,
/// which may be stepped backwards. Each version-creation call reads the
/// clock once, so its own timestamps always agree.
pub trait Clock: Send + Sync + std::fmt::Debug + 'static {
    /// Return the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    current: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Create a clock frozen at `at`.
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(at),
        }
    }

    /// Move the clock forward. Negative durations are ignored.
    pub fn advance(&self, by: Duration) {
        if by < Duration::zero() {
            return;
        }
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}
