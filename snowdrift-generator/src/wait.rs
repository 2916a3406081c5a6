//! waiting on the clock to move past a used millisecond
//!
//! the wait is a busy spin. it runs while the generator lock is held so other
//! callers queue up on the lock until it finishes.

use std::time::{Duration, Instant};

use crate::error;

/// spins until `current` returns a value greater than `last`
///
/// returns the first value past `last`. with a `limit` the spin gives up
/// once the limit has elapsed and returns
/// [`SpinTimeout`](crate::error::Error::SpinTimeout).
pub(crate) fn spin_past<F>(last: i64, mut current: F, limit: Option<Duration>) -> error::Result<i64>
where
    F: FnMut() -> i64,
{
    let start = Instant::now();

    loop {
        let now = current();

        if now > last {
            return Ok(now);
        }

        if let Some(limit) = limit {
            if start.elapsed() >= limit {
                return Err(error::Error::SpinTimeout(limit));
            }
        }

        std::hint::spin_loop();
    }
}
