//! time sources for generators

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::traits::TimeSource;

/// reads the current time from [`SystemTime`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now_millis(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(dur) => dur.as_millis() as i64,
            Err(err) => -(err.duration().as_millis() as i64),
        }
    }
}

/// clock that only moves when told to
///
/// clones share the same underlying time so a test can hand one copy to a
/// generator and keep another to move time around.
///
/// ```rust
/// use snowdrift_core::clock::ManualClock;
/// use snowdrift_core::traits::TimeSource;
///
/// let clock = ManualClock::new(1_000);
/// let handle = clock.clone();
///
/// handle.advance(5);
/// assert_eq!(clock.now_millis(), 1_005);
///
/// handle.set(10);
/// assert_eq!(clock.now_millis(), 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    /// creates a clock frozen at the given milliseconds
    pub fn new(millis: i64) -> Self {
        ManualClock {
            millis: Arc::new(AtomicI64::new(millis)),
        }
    }

    /// moves the clock to the given milliseconds. can move backwards
    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    /// moves the clock by the given milliseconds, negative values rewind it
    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}
