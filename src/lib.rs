//! # Snowdrift
//!
//! a small library for generating 63 bit, roughly time ordered ids that are
//! unique across a cluster of up to 1024 nodes. an id packs the milliseconds
//! since a custom epoch, the node id, and a per millisecond sequence counter
//! into a positive `i64`.
//!
//! ```text
//! | 1 bit unused | 41 bit elapsed millis | 10 bit node id | 12 bit sequence |
//! ```
//!
//! ```rust
//! // 2023/03/23 9:00:00 in milliseconds, timestamps will start from this
//! // date
//! const START_TIME: i64 = 1679587200000;
//!
//! let mut gen = snowdrift::Generator::new(snowdrift::Config::new()
//!     .start_time(START_TIME)
//!     .node_id(1)
//!     .max_tolerate_millis(10))
//!     .expect("failed to create Generator");
//!
//! let id = gen.next_id().expect("failed to create id");
//! let parsed = snowdrift::parse(id, Some(START_TIME));
//!
//! assert_eq!(parsed.node_id, 1);
//! ```
//!
//! ## Behavior
//!
//! [`MutexGenerator`] is a thread safe implementation for sharing between
//! threads on a system. it uses an [`Arc`](std::sync::Arc)
//! [`Mutex`](std::sync::Mutex) to share the last used elapsed time and
//! sequence. cloning it hands out another handle to the same state.
//!
//! [`Generator`] is similar in most aspects to `MutexGenerator` except
//! next_id is a mutating call and the counts are owned directly. THIS IS NOT
//! THREAD SAFE.
//!
//! when a millisecond runs out of sequence numbers both generators spin until
//! the clock moves to the next one. a clock that stepped backward by no more
//! than `max_tolerate_millis` is waited out the same way, anything further
//! returns [`Error::ClockBackward`](generator::Error::ClockBackward) without
//! consuming a sequence number. a bound on the wait can be set with
//! [`Config::max_spin`](generator::Config::max_spin).
//!
//! ## Traits
//!
//! - [`IdGenerator`](crate::traits::IdGenerator) is implemented by
//!   [`MutexGenerator`]
//! - [`IdGeneratorMut`](crate::traits::IdGeneratorMut) is implemented by
//!   [`Generator`]
//! - [`TimeSource`](crate::traits::TimeSource) supplies the current time.
//!   [`SystemClock`](crate::clock::SystemClock) is the default and
//!   [`ManualClock`](crate::clock::ManualClock) can be stepped by hand
//! - [`Id`](crate::traits::Id) turns a [`Snowflake`] back into its base type
//!
//! ## Features
//!
//! - `serde` de/serializes [`Snowflake`] and [`Parsed`] along with the
//!   generator [`Settings`](generator::config::Settings). string forms for
//!   javascript are in [`flake::serde_ext`]
//! - `postgres` stores a [`Snowflake`] as an `INT8` column

pub use snowdrift_core::{clock, traits};
pub use snowdrift_flake as flake;
pub use snowdrift_generator as generator;

pub use snowdrift_flake::{parse, Parsed, Snowflake};
pub use snowdrift_flake::codec::{base58, base62};
pub use snowdrift_generator::{Config, Error, Generator};
pub use snowdrift_generator::sync::MutexGenerator;
