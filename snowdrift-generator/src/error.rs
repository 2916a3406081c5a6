use std::time::Duration;

/// boxed error returned by configuration providers
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// possible errors for generators
///
/// construction errors mean the configuration has to change before trying
/// again. of the runtime errors only [`ClockBackward`](Error::ClockBackward)
/// and [`SpinTimeout`](Error::SpinTimeout) can go away on their own once the
/// clock catches up, but they are never retried inside the generator.
///
/// ```rust
/// use snowdrift_generator::{Config, Generator, Error};
///
/// let mut gen = Generator::new(Config::new().node_id(1).max_tolerate_millis(10))
///     .expect("failed to create Generator");
///
/// match gen.next_id() {
///     Ok(id) => println!("{}", id),
///     Err(Error::ClockBackward { drift, .. }) => {
///         // the clock needs operator attention
///         println!("clock moved back {}ms", drift);
///     },
///     Err(err) => println!("{}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// the start time is ahead of the clock or before UNIX epoch
    #[error("invalid start time")]
    InvalidStartTime,

    /// the max tolerated clock fallback is negative
    #[error("invalid max tolerate millis")]
    InvalidMaxTolerateMillis,

    /// the last generate time is ahead of the clock
    #[error("invalid last generate time")]
    InvalidLastGenerateTime,

    /// the node id is outside of 0 to 1023
    #[error("invalid node id")]
    InvalidNodeId,

    /// a configuration provider failed
    #[error("provider failed: {0}")]
    Provider(#[source] BoxError),

    /// the elapsed time no longer fits in 41 bits. the generator needs a new
    /// epoch or to be retired
    #[error("over the timestamp limit")]
    OverTimestampLimit,

    /// the clock moved back further than the tolerated amount
    #[error("the clock backward")]
    ClockBackward {
        /// milliseconds the clock is behind the last used elapsed time
        drift: i64,
        /// the configured tolerance
        tolerate: i64,
    },

    /// waited the max spin duration without the clock moving past the last
    /// used millisecond
    #[error("timed out waiting {0:?} for the clock to advance")]
    SpinTimeout(Duration),

    /// a thread panicked while holding the generator lock
    #[error("mutex error")]
    MutexPoisoned,
}

impl Error {
    /// true for errors that come from the configuration given to a
    /// constructor
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::InvalidStartTime
                | Error::InvalidMaxTolerateMillis
                | Error::InvalidLastGenerateTime
                | Error::InvalidNodeId
                | Error::Provider(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
