use std::sync::{Arc, Mutex};
use std::time::Duration;

use snowdrift_core::clock::SystemClock;
use snowdrift_core::traits::{IdGenerator, TimeSource};
use snowdrift_flake::{parse, Parsed};

use crate::common::{Counts, Params};
use crate::config::Config;
use crate::error;

/// thread safe snowflake generator
///
/// generates ids from the configured epoch and node id. the epoch must not be
/// ahead of the clock.
///
/// this guards the last used elapsed time and sequence behind an
/// [`Arc`](std::sync::Arc) [`Mutex`](std::sync::Mutex). cloning hands out
/// another handle to the same state, so clones never produce the same id.
/// the whole read-modify-write happens while the lock is held, including the
/// spin when a millisecond runs out of sequence numbers, so other callers wait
/// on the lock while one of them spins.
///
/// ```rust
/// use snowdrift_generator::Config;
/// use snowdrift_generator::sync::MutexGenerator;
///
/// const START_TIME: i64 = 1679587200000;
///
/// let gen = MutexGenerator::new(Config::new()
///     .start_time(START_TIME)
///     .node_id(1)
///     .max_tolerate_millis(10))
///     .expect("failed to create MutexGenerator");
///
/// let handles: Vec<_> = (0..4).map(|_| {
///     let gen = gen.clone();
///
///     std::thread::spawn(move || gen.next_id().expect("failed to create id"))
/// }).collect();
///
/// for handle in handles {
///     let id = handle.join().unwrap();
///
///     assert_eq!(gen.parse(id).node_id, 1);
/// }
/// ```
pub struct MutexGenerator<T = SystemClock> {
    params: Params,
    counts: Arc<Mutex<Counts>>,
    clock: T,
}

impl<T> Clone for MutexGenerator<T>
where
    T: Clone
{
    fn clone(&self) -> Self {
        MutexGenerator {
            params: self.params,
            counts: Arc::clone(&self.counts),
            clock: self.clock.clone(),
        }
    }
}

impl MutexGenerator<SystemClock> {
    /// returns a new MutexGenerator reading from the system clock
    ///
    /// will return an error if the start time is ahead of now, the max
    /// tolerated millis is negative, the last generate time is ahead of now,
    /// the node id is out of range, or a provider fails
    pub fn new(config: Config) -> error::Result<Self> {
        Self::with_clock(config, SystemClock)
    }

    /// panicking version of [`MutexGenerator::new`]
    pub fn must_new(config: Config) -> Self {
        match Self::new(config) {
            Ok(gen) => gen,
            Err(err) => panic!("failed to create MutexGenerator: {}", err),
        }
    }
}

impl<T> MutexGenerator<T>
where
    T: TimeSource
{
    /// returns a new MutexGenerator reading from the given clock
    pub fn with_clock(config: Config, clock: T) -> error::Result<Self> {
        let (params, counts) = Params::from_config(config, &clock)?;

        Ok(MutexGenerator {
            params,
            counts: Arc::new(Mutex::new(counts)),
            clock,
        })
    }

    /// returns epoch in milliseconds since UNIX epoch
    pub fn start_time(&self) -> i64 {
        self.params.start_time
    }

    /// returns node id
    pub fn node_id(&self) -> i64 {
        self.params.node_id
    }

    pub fn max_tolerate_millis(&self) -> i64 {
        self.params.tolerate_millis
    }

    pub fn max_spin(&self) -> Option<Duration> {
        self.params.max_spin
    }

    /// retrieves the next available id
    ///
    /// fails if the clock is further behind than tolerated, the elapsed time
    /// no longer fits, a bounded spin ran out of time, or the lock was
    /// poisoned
    #[tracing::instrument(level = "trace", skip(self), fields(node_id = self.params.node_id))]
    pub fn next_id(&self) -> error::Result<i64> {
        let Ok(mut counts) = self.counts.lock() else {
            return Err(error::Error::MutexPoisoned);
        };

        // the clock is read after the lock is acquired so time spent waiting
        // on the lock is accounted for
        counts.next_id(&self.params, &self.clock)
    }

    /// decodes an id against this generator's epoch
    pub fn parse(&self, id: i64) -> Parsed {
        parse(id, Some(self.params.start_time))
    }
}

impl<T> IdGenerator for MutexGenerator<T>
where
    T: TimeSource
{
    type Error = error::Error;
    type Id = i64;

    fn next_id(&self) -> Result<Self::Id, Self::Error> {
        MutexGenerator::next_id(self)
    }
}
