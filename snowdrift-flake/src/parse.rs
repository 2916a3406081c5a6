//! stateless decoding of packed ids

#[cfg(feature = "serde")]
use serde::ser::{self, SerializeStruct};

use crate::{Snowflake, DEFAULT_START_TIME};

/// every segment of a decoded id along with the times derived from it
///
/// with the `serde` feature this serializes as a map using the field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Parsed {
    /// the id that was decoded
    pub id: i64,
    /// epoch used for decoding, milliseconds since UNIX epoch
    pub start_time: i64,
    /// milliseconds since `start_time`
    pub elapsed_time: i64,
    /// `start_time + elapsed_time`
    pub generation_time: i64,
    pub node_id: i64,
    pub sequence_id: i64,
}

/// decodes an id produced against the given epoch
///
/// `None` decodes against [`DEFAULT_START_TIME`]. any i64 decodes, even ones
/// that were never produced by a generator, so checking that the result makes
/// sense is left to the caller.
///
/// ```rust
/// use snowdrift_flake::{parse, DEFAULT_START_TIME};
///
/// let parsed = parse((5 << 22) | (1 << 12) | 7, None);
///
/// assert_eq!(parsed.elapsed_time, 5);
/// assert_eq!(parsed.node_id, 1);
/// assert_eq!(parsed.sequence_id, 7);
/// assert_eq!(parsed.generation_time, DEFAULT_START_TIME + 5);
/// ```
pub fn parse(id: i64, start_time: Option<i64>) -> Parsed {
    let start_time = start_time.unwrap_or(DEFAULT_START_TIME);
    let elapsed_time = id >> Snowflake::ELAPSED_SHIFT;

    Parsed {
        id,
        start_time,
        elapsed_time,
        // wraps instead of failing so any epoch decodes
        generation_time: start_time.wrapping_add(elapsed_time),
        node_id: (id >> Snowflake::NODE_ID_SHIFT) & Snowflake::MAX_NODE_ID,
        sequence_id: id & Snowflake::SEQUENCE_MASK,
    }
}

#[cfg(feature = "serde")]
impl ser::Serialize for Parsed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer
    {
        let mut state = serializer.serialize_struct("Parsed", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("start_time", &self.start_time)?;
        state.serialize_field("elapsed_time", &self.elapsed_time)?;
        state.serialize_field("generation_time", &self.generation_time)?;
        state.serialize_field("node_id", &self.node_id)?;
        state.serialize_field("sequence_id", &self.sequence_id)?;
        state.end()
    }
}
