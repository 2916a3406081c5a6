use std::time::Duration;

use snowdrift_core::clock::SystemClock;
use snowdrift_core::traits::{IdGeneratorMut, TimeSource};
use snowdrift_flake::{parse, Parsed};

pub mod config;
pub mod error;
pub mod providers;
pub mod sync;
mod common;
mod wait;

pub use config::Config;
pub use error::Error;

use common::{Counts, Params};

/// single owner snowflake generator
///
/// generates ids from the configured epoch and node id. the epoch must not be
/// ahead of the clock. next_id takes `&mut self` so the generator cannot be
/// shared between threads, use
/// [`MutexGenerator`](crate::sync::MutexGenerator) for that.
///
/// when 4096 ids have been handed out in a single millisecond, or the clock
/// has fallen behind by no more than `max_tolerate_millis`, the call spins
/// until the clock moves past the last used millisecond.
///
/// ```rust
/// use snowdrift_generator::{Config, Generator};
///
/// const START_TIME: i64 = 1679587200000;
///
/// let mut gen = Generator::new(Config::new()
///     .start_time(START_TIME)
///     .node_id(1)
///     .max_tolerate_millis(10))
///     .expect("failed to create Generator");
///
/// let id = gen.next_id().expect("failed to create id");
/// let parsed = gen.parse(id);
///
/// assert_eq!(parsed.node_id, 1);
/// assert_eq!(parsed.start_time, START_TIME);
/// ```
pub struct Generator<T = SystemClock> {
    params: Params,
    counts: Counts,
    clock: T,
}

impl Generator<SystemClock> {
    /// returns a new Generator reading from the system clock
    ///
    /// will return an error if the start time is ahead of now, the max
    /// tolerated millis is negative, the last generate time is ahead of now,
    /// the node id is out of range, or a provider fails
    pub fn new(config: Config) -> error::Result<Self> {
        Self::with_clock(config, SystemClock)
    }

    /// panicking version of [`Generator::new`]
    pub fn must_new(config: Config) -> Self {
        match Self::new(config) {
            Ok(gen) => gen,
            Err(err) => panic!("failed to create Generator: {}", err),
        }
    }
}

impl<T> Generator<T>
where
    T: TimeSource
{
    /// returns a new Generator reading from the given clock
    pub fn with_clock(config: Config, clock: T) -> error::Result<Self> {
        let (params, counts) = Params::from_config(config, &clock)?;

        Ok(Generator {
            params,
            counts,
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

    /// returns the clock
    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// retrieves the next available id
    ///
    /// fails if the clock is further behind than tolerated, the elapsed time
    /// no longer fits, or a bounded spin ran out of time
    #[tracing::instrument(level = "trace", skip(self), fields(node_id = self.params.node_id))]
    pub fn next_id(&mut self) -> error::Result<i64> {
        self.counts.next_id(&self.params, &self.clock)
    }

    /// decodes an id against this generator's epoch
    pub fn parse(&self, id: i64) -> Parsed {
        parse(id, Some(self.params.start_time))
    }
}

impl<T> IdGeneratorMut for Generator<T>
where
    T: TimeSource
{
    type Error = error::Error;
    type Id = i64;

    fn next_id(&mut self) -> Result<Self::Id, Self::Error> {
        Generator::next_id(self)
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;
    use std::thread;

    use snowdrift_core::clock::ManualClock;
    use snowdrift_flake::Snowflake;

    use super::*;

    const START_TIME: i64 = 1679082337000;
    const NOW: i64 = START_TIME + 1_000;

    fn generator(clock: &ManualClock, config: Config) -> Generator<ManualClock> {
        Generator::with_clock(config.start_time(START_TIME), clock.clone())
            .expect("failed to create Generator")
    }

    #[test]
    fn first_id_starts_sequence() {
        let clock = ManualClock::new(NOW);
        let mut gen = generator(&clock, Config::new().node_id(3));

        let id = gen.next_id().unwrap();

        let parsed = gen.parse(id);

        assert_eq!(parsed.elapsed_time, NOW - START_TIME);
        assert_eq!(parsed.node_id, 3);
        assert_eq!(parsed.sequence_id, 0);
        assert_eq!(parsed.generation_time, NOW);
    }

    #[test]
    fn same_millisecond_increments_sequence() {
        let clock = ManualClock::new(NOW);
        let mut gen = generator(&clock, Config::new());

        for expected in 0..10 {
            let id = gen.next_id().unwrap();
            let parsed = gen.parse(id);

            assert_eq!(parsed.sequence_id, expected);
            assert_eq!(parsed.elapsed_time, NOW - START_TIME);
        }

        clock.advance(1);

        let id = gen.next_id().unwrap();

        let parsed = gen.parse(id);
        assert_eq!(parsed.sequence_id, 0, "sequence did not reset");
        assert_eq!(parsed.elapsed_time, NOW - START_TIME + 1);
    }

    #[test]
    fn exhausted_sequence_waits_for_clock() {
        let clock = ManualClock::new(NOW);
        let mut gen = generator(&clock, Config::new().max_tolerate_millis(10));
        let mut unique = HashSet::new();

        for _ in 0..=Snowflake::MAX_SEQUENCE {
            assert!(unique.insert(gen.next_id().unwrap()));
        }

        let mover = clock.clone();
        let handle = thread::spawn(move || {
            thread::sleep(std::time::Duration::from_millis(20));
            mover.advance(1);
        });

        // the 4097th id cannot come from the frozen millisecond
        let id = gen.next_id().unwrap();
        handle.join().expect("thread paniced");

        let parsed = gen.parse(id);
        assert!(unique.insert(id), "duplicate id after waiting");
        assert_eq!(parsed.elapsed_time, NOW - START_TIME + 1);
        assert_eq!(parsed.sequence_id, 0);
    }

    #[test]
    fn small_backward_jump_keeps_counting() {
        let clock = ManualClock::new(NOW);
        let mut gen = generator(&clock, Config::new().max_tolerate_millis(10));

        let first = gen.next_id().unwrap();
        clock.advance(-5);
        let second = gen.next_id().unwrap();

        let parsed = gen.parse(second);
        assert!(second > first);
        assert_eq!(parsed.elapsed_time, NOW - START_TIME);
        assert_eq!(parsed.sequence_id, 1);
    }

    #[test]
    fn large_backward_jump_fails_without_consuming() {
        let clock = ManualClock::new(NOW);
        // resuming at the current millisecond leaves the sequence exhausted
        let mut gen = generator(&clock, Config::new()
            .max_tolerate_millis(10)
            .last_generate_time(NOW));

        clock.advance(-50);

        for _ in 0..2 {
            match gen.next_id() {
                Err(Error::ClockBackward { drift, tolerate }) => {
                    assert_eq!(drift, 50);
                    assert_eq!(tolerate, 10);
                },
                other => panic!("expected clock backward. {:?}", other),
            }
        }

        clock.set(NOW + 1);

        let id = gen.next_id().unwrap();

        let parsed = gen.parse(id);
        assert_eq!(parsed.elapsed_time, NOW - START_TIME + 1);
        assert_eq!(parsed.sequence_id, 0);
    }

    #[test]
    fn bounded_spin_times_out_without_consuming() {
        let clock = ManualClock::new(NOW);
        let limit = std::time::Duration::from_millis(10);
        let mut gen = generator(&clock, Config::new()
            .max_spin(limit)
            .last_generate_time(NOW));

        assert_eq!(gen.max_spin(), Some(limit));

        match gen.next_id() {
            Err(Error::SpinTimeout(dur)) => assert_eq!(dur, limit),
            other => panic!("expected spin timeout. {:?}", other),
        }

        clock.advance(1);

        let id = gen.next_id().unwrap();

        let parsed = gen.parse(id);
        assert_eq!(parsed.elapsed_time, NOW - START_TIME + 1);
        assert_eq!(parsed.sequence_id, 0);
    }

    #[test]
    fn over_timestamp_limit() {
        let clock = ManualClock::new(START_TIME + Snowflake::MAX_ELAPSED);
        let mut gen = generator(&clock, Config::new());

        let id = gen.next_id().unwrap();

        let parsed = gen.parse(id);
        assert_eq!(parsed.elapsed_time, Snowflake::MAX_ELAPSED);

        clock.advance(1);

        assert!(matches!(gen.next_id(), Err(Error::OverTimestampLimit)));
        assert!(matches!(gen.next_id(), Err(Error::OverTimestampLimit)));
    }

    #[test]
    fn ids_increase() {
        let clock = ManualClock::new(NOW);
        let mut gen = generator(&clock, Config::new().node_id(1023));
        let mut prev = gen.next_id().unwrap();

        for step in 0..500 {
            if step % 7 == 0 {
                clock.advance(1);
            }

            let id = gen.next_id().unwrap();
            assert!(id > prev, "{} was not greater than {}", id, prev);
            prev = id;
        }
    }

    #[test]
    fn construction_validation() {
        let clock = ManualClock::new(NOW);

        let cases: Vec<(Config, fn(&Error) -> bool)> = vec![
            (Config::new().start_time(NOW + 60_000), |e| matches!(e, Error::InvalidStartTime)),
            (Config::new().start_time(-1), |e| matches!(e, Error::InvalidStartTime)),
            (Config::new().start_time(START_TIME).max_tolerate_millis(-1), |e| matches!(e, Error::InvalidMaxTolerateMillis)),
            (Config::new().start_time(START_TIME).node_id(1024), |e| matches!(e, Error::InvalidNodeId)),
            (Config::new().start_time(START_TIME).node_id(-1), |e| matches!(e, Error::InvalidNodeId)),
            (Config::new().start_time(START_TIME).last_generate_time(NOW + 60_000), |e| matches!(e, Error::InvalidLastGenerateTime)),
            (Config::new().start_time(START_TIME).last_generate_time(i64::MIN), |e| matches!(e, Error::InvalidLastGenerateTime)),
            (Config::new().start_time(START_TIME).last_generate_time(i64::MAX), |e| matches!(e, Error::InvalidLastGenerateTime)),
            (
                Config::new().start_time(START_TIME).node_id_with(Box::new(|| -> Result<i64, error::BoxError> { Err("no node".into()) })),
                |e| matches!(e, Error::Provider(_))
            ),
        ];

        for (config, check) in cases {
            let debug = format!("{:?}", config);

            match Generator::with_clock(config, clock.clone()) {
                Ok(_) => panic!("config should have failed. {}", debug),
                Err(err) => {
                    assert!(check(&err), "unexpected error {:?} for {}", err, debug);
                    assert!(err.is_config());
                }
            }
        }
    }

    #[test]
    fn zero_last_generate_time_is_absent() {
        let clock = ManualClock::new(NOW);
        let mut gen = generator(&clock, Config::new().last_generate_time(0));

        let id = gen.next_id().unwrap();

        let parsed = gen.parse(id);
        assert_eq!(parsed.elapsed_time, NOW - START_TIME);
        assert_eq!(parsed.sequence_id, 0);
    }

    #[test]
    fn default_config() {
        let gen = Generator::new(Config::new()).expect("failed to create Generator");

        assert_eq!(gen.start_time(), snowdrift_flake::DEFAULT_START_TIME);
        assert_eq!(gen.node_id(), 0);
        assert_eq!(gen.max_tolerate_millis(), 0);
        assert_eq!(gen.max_spin(), None);
    }

    #[test]
    #[should_panic]
    fn must_new_panics() {
        Generator::must_new(Config::new().node_id(4096));
    }
}
