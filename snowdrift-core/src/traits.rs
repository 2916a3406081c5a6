//! seams shared between generators, ids, and clocks
//!
//! code that only needs "something that hands out ids" can be written against
//! these instead of a concrete generator.

/// basics of an id generator
///
/// describes what is needed to be considered an IdGenerator.
/// `snowdrift_generator::sync::MutexGenerator` implements this trait
pub trait IdGenerator {
    /// the potential error that could be returned from next_id
    type Error;

    /// the actual Id type that is returned from next_id
    type Id;

    /// call to get the next available id
    fn next_id(&self) -> Result<Self::Id, Self::Error>;
}

/// similar to [`IdGenerator`](crate::traits::IdGenerator) but allows for
/// mutating
///
/// `snowdrift_generator::Generator` implements this trait
pub trait IdGeneratorMut {
    /// the potential error that could be returned from next_id
    type Error;

    /// the actual Id type that is returned from next_id
    type Id;

    /// mutating call to get the next available id
    fn next_id(&mut self) -> Result<Self::Id, Self::Error>;
}

/// basic Snowflake structure
pub trait Id {
    /// what the id can be turned to and from
    type BaseType;

    /// creates the a value of BaseType from the id
    fn id(&self) -> Self::BaseType;
}

/// source of wall clock time in milliseconds
///
/// generators only ever ask for "now". swapping the source lets tests freeze,
/// rewind, or step the clock without touching the system time.
pub trait TimeSource {
    /// milliseconds since [`UNIX_EPOCH`](std::time::UNIX_EPOCH). negative if
    /// the source is before it
    fn now_millis(&self) -> i64;
}

impl<T> TimeSource for &T
where
    T: TimeSource + ?Sized
{
    #[inline]
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

impl<T> TimeSource for std::sync::Arc<T>
where
    T: TimeSource + ?Sized
{
    #[inline]
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}
