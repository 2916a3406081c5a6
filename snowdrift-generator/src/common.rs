use std::time::Duration;

use snowdrift_core::traits::TimeSource;
use snowdrift_flake::{Snowflake, DEFAULT_START_TIME};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::wait;

/// values fixed at construction
#[derive(Debug, Clone, Copy)]
pub(crate) struct Params {
    pub start_time: i64,
    pub tolerate_millis: i64,
    pub node_id: i64,
    pub max_spin: Option<Duration>,
}

/// last used elapsed time and sequence
#[derive(Debug, Clone)]
pub(crate) struct Counts {
    pub elapsed: i64,
    pub sequence: i64,
}

impl Params {
    /// validates the config against the clock and returns the starting counts
    pub fn from_config<T>(config: Config, clock: &T) -> Result<(Params, Counts)>
    where
        T: TimeSource
    {
        let now = clock.now_millis();
        let start_time = config.start_time.unwrap_or(DEFAULT_START_TIME);

        if start_time > now || start_time < 0 {
            return Err(Error::InvalidStartTime);
        }

        if config.max_tolerate_millis < 0 {
            return Err(Error::InvalidMaxTolerateMillis);
        }

        let mut elapsed = 0;

        if let Some(provider) = config.last_generate_time {
            let last = provider().map_err(Error::Provider)?;

            // 0 is the same as not having a previous run
            if last != 0 {
                let last_elapsed = last.checked_sub(start_time)
                    .ok_or(Error::InvalidLastGenerateTime)?;

                if last_elapsed > now - start_time {
                    return Err(Error::InvalidLastGenerateTime);
                }

                elapsed = last_elapsed;
            }
        }

        let node_id = match config.node_id {
            Some(provider) => provider().map_err(Error::Provider)?,
            None => 0,
        };

        if !(0..=Snowflake::MAX_NODE_ID).contains(&node_id) {
            return Err(Error::InvalidNodeId);
        }

        tracing::debug!(
            node_id,
            start_time,
            tolerate_millis = config.max_tolerate_millis,
            resume_elapsed = elapsed,
            "created generator"
        );

        Ok((
            Params {
                start_time,
                tolerate_millis: config.max_tolerate_millis,
                node_id,
                max_spin: config.max_spin,
            },
            Counts {
                elapsed,
                // the first call that does not move elapsed forward rolls over
                // to 0 and waits for the next millisecond
                sequence: Snowflake::MAX_SEQUENCE,
            },
        ))
    }

    /// milliseconds from the epoch to now
    #[inline]
    pub fn current<T>(&self, clock: &T) -> i64
    where
        T: TimeSource
    {
        clock.now_millis() - self.start_time
    }
}

impl Counts {
    /// produces the next id
    ///
    /// nothing is stored unless an id is returned so a failed call never
    /// hands a used (elapsed, sequence) pair to a later one.
    pub fn next_id<T>(&mut self, params: &Params, clock: &T) -> Result<i64>
    where
        T: TimeSource
    {
        let current = params.current(clock);

        let (elapsed, sequence) = if current > self.elapsed {
            (current, 0)
        } else {
            let sequence = (self.sequence + 1) & Snowflake::MAX_SEQUENCE;

            if sequence != 0 {
                (self.elapsed, sequence)
            } else {
                let drift = self.elapsed - current;

                if drift > params.tolerate_millis {
                    tracing::warn!(
                        node_id = params.node_id,
                        drift,
                        tolerate = params.tolerate_millis,
                        "clock moved backward past tolerance"
                    );

                    return Err(Error::ClockBackward {
                        drift,
                        tolerate: params.tolerate_millis,
                    });
                }

                tracing::trace!(
                    node_id = params.node_id,
                    elapsed = self.elapsed,
                    drift,
                    "sequence exhausted, waiting for next millisecond"
                );

                let next = wait::spin_past(self.elapsed, || params.current(clock), params.max_spin)
                    .map_err(|err| {
                        tracing::warn!(node_id = params.node_id, elapsed = self.elapsed, "{}", err);
                        err
                    })?;

                (next, 0)
            }
        };

        if elapsed > Snowflake::MAX_ELAPSED {
            tracing::error!(
                node_id = params.node_id,
                start_time = params.start_time,
                elapsed,
                "elapsed time no longer fits in the id"
            );

            return Err(Error::OverTimestampLimit);
        }

        self.elapsed = elapsed;
        self.sequence = sequence;

        Ok(Snowflake::pack(elapsed, params.node_id, sequence))
    }
}
