use std::fmt;
use std::hash::{Hash, Hasher};

use snowdrift_core::traits;

#[cfg(feature = "serde")]
use serde::{de, ser};

#[cfg(feature = "postgres")]
use postgres_types::{to_sql_checked, accepts, IsNull, FromSql, ToSql, Type as PgType};
#[cfg(feature = "postgres")]
use bytes::{BytesMut, BufMut};

use crate::error;
use crate::{ELAPSED_BITS, NODE_ID_BITS, SEQUENCE_BITS};

/// i64 Snowflake with a 41 bit elapsed time, 10 bit node id, and 12 bit
/// sequence
///
/// ```text
///  0 - 11111111111111111111111111111111111111111 - 1111111111 - 111111111111
///  |   |                                       |   |        |   |          |
/// 64  63                                      23  22       13  12          1
/// sign                                  elapsed time   node id     sequence
/// ```
///
/// the sign bit is never used so every valid id is a non negative i64.
///
/// # Elapsed Time
///
/// milliseconds since the epoch the generator was configured with. 41 bits
/// gives roughly 69.7 years before the generator has to be retired.
///
/// # Node Id
///
/// differentiates generators running on separate machines or processes.
/// ranges from 0 to 1023.
///
/// # Sequence
///
/// count of ids already handed out in the same millisecond by the same node.
/// ranges from 0 to 4095.
///
/// # De/Serialize
///
/// with the `serde` feature a snowflake de/serializes to and from an
/// [`i64`](core::primitive::i64). check [`serde_ext`](crate::serde_ext) for
/// string options.
///
/// # Example Usage
///
/// ```rust
/// use snowdrift_flake::Snowflake;
///
/// let flake = Snowflake::from_parts(1, 1, 1)
///     .expect("invalid parts");
///
/// let id: i64 = flake.into();
/// assert_eq!(id, 4198401);
///
/// let and_back: Snowflake = id.try_into()
///     .expect("invalid i64 was provided");
/// assert_eq!(and_back, flake);
/// ```
#[derive(Eq, Clone, Copy)]
pub struct Snowflake {
    pub(crate) elapsed: i64,
    pub(crate) nid: i64,
    pub(crate) seq: i64,
}

impl Snowflake {
    /// max value that an elapsed time can be. `(1 << 41) - 1`
    pub const MAX_ELAPSED: i64 = (1 << ELAPSED_BITS as i64) - 1;
    /// max value that a node id can be. `(1 << 10) - 1`
    pub const MAX_NODE_ID: i64 = (1 << NODE_ID_BITS as i64) - 1;
    /// max value a sequence can be. `(1 << 12) - 1`
    pub const MAX_SEQUENCE: i64 = (1 << SEQUENCE_BITS as i64) - 1;

    /// total bits to shift the elapsed time. `10 + 12`
    pub const ELAPSED_SHIFT: i64 = NODE_ID_BITS as i64 + SEQUENCE_BITS as i64;
    /// total bits to shift the node id. `12`
    pub const NODE_ID_SHIFT: i64 = SEQUENCE_BITS as i64;

    /// bit mask for elapsed time. `Self::MAX_ELAPSED << Self::ELAPSED_SHIFT`
    pub const ELAPSED_MASK: i64 = Self::MAX_ELAPSED << Self::ELAPSED_SHIFT;
    /// bit mask for node id. `Self::MAX_NODE_ID << Self::NODE_ID_SHIFT`
    pub const NODE_ID_MASK: i64 = Self::MAX_NODE_ID << Self::NODE_ID_SHIFT;
    /// bit mask for sequence. `Self::MAX_SEQUENCE`
    pub const SEQUENCE_MASK: i64 = Self::MAX_SEQUENCE;

    /// packs the segments without checking them
    ///
    /// callers are expected to have already range checked every segment.
    /// out of range values will bleed into neighboring segments
    #[inline]
    pub const fn pack(elapsed: i64, nid: i64, seq: i64) -> i64 {
        (elapsed << Self::ELAPSED_SHIFT) | (nid << Self::NODE_ID_SHIFT) | seq
    }

    /// returns elapsed milliseconds since the epoch
    pub fn elapsed(&self) -> i64 {
        self.elapsed
    }

    /// returns node id
    pub fn node_id(&self) -> i64 {
        self.nid
    }

    /// returns sequence
    pub fn sequence(&self) -> i64 {
        self.seq
    }

    /// generates a Snowflake from the provided parts
    ///
    /// checks will be performed on each part to ensure that they are
    /// valid for the layout.
    pub fn from_parts(elapsed: i64, nid: i64, seq: i64) -> error::Result<Self> {
        if !(0..=Self::MAX_ELAPSED).contains(&elapsed) {
            return Err(error::Error::ElapsedInvalid);
        }

        if !(0..=Self::MAX_NODE_ID).contains(&nid) {
            return Err(error::Error::NodeIdInvalid);
        }

        if !(0..=Self::MAX_SEQUENCE).contains(&seq) {
            return Err(error::Error::SequenceInvalid);
        }

        Ok(Self { elapsed, nid, seq })
    }

    /// splits the current Snowflake into its individual parts
    pub fn into_parts(self) -> (i64, i64, i64) {
        (self.elapsed, self.nid, self.seq)
    }

    /// generates the unique id
    pub fn id(&self) -> i64 {
        Self::pack(self.elapsed, self.nid, self.seq)
    }

    /// attempts to generate a snowflake from the given i64
    ///
    /// integer must be greater than or equal to `0` and less than or equal to
    /// [`i64::MAX`](i64::MAX)
    pub fn try_from(id: &i64) -> error::Result<Self> {
        if *id < 0 {
            return Err(error::Error::InvalidId);
        }

        Ok(Self {
            elapsed: (id & Self::ELAPSED_MASK) >> Self::ELAPSED_SHIFT,
            nid: (id & Self::NODE_ID_MASK) >> Self::NODE_ID_SHIFT,
            seq: id & Self::SEQUENCE_MASK,
        })
    }
}

impl traits::Id for Snowflake {
    type BaseType = i64;

    fn id(&self) -> Self::BaseType {
        Snowflake::id(self)
    }
}

impl From<Snowflake> for i64 {
    #[inline(always)]
    fn from(flake: Snowflake) -> i64 {
        flake.id()
    }
}

impl From<&Snowflake> for i64 {
    #[inline(always)]
    fn from(flake: &Snowflake) -> i64 {
        flake.id()
    }
}

impl TryFrom<i64> for Snowflake {
    type Error = error::Error;

    #[inline(always)]
    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Snowflake::try_from(&id)
    }
}

impl TryFrom<&i64> for Snowflake {
    type Error = error::Error;

    #[inline(always)]
    fn try_from(id: &i64) -> Result<Self, Self::Error> {
        Snowflake::try_from(id)
    }
}

impl PartialEq for Snowflake {
    fn eq(&self, rhs: &Self) -> bool {
        self.elapsed == rhs.elapsed && self.nid == rhs.nid && self.seq == rhs.seq
    }
}

impl PartialOrd for Snowflake {
    fn partial_cmp(&self, rhs: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(rhs))
    }
}

// the packed integer orders the same as the (elapsed, nid, seq) tuple
impl Ord for Snowflake {
    fn cmp(&self, rhs: &Self) -> std::cmp::Ordering {
        self.id().cmp(&rhs.id())
    }
}

impl Hash for Snowflake {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elapsed.hash(state);
        self.nid.hash(state);
        self.seq.hash(state);
    }
}

impl fmt::Debug for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id();

        f.debug_struct("Snowflake")
            .field("id", &id)
            .field("elapsed", &self.elapsed)
            .field("nid", &self.nid)
            .field("seq", &self.seq)
            .finish()
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(feature = "serde")]
impl ser::Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer
    {
        serializer.serialize_i64(self.id())
    }
}

#[cfg(feature = "serde")]
struct NumVisitor;

#[cfg(feature = "serde")]
impl<'de> de::Visitor<'de> for NumVisitor {
    type Value = Snowflake;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "integer from 0 to i64::MAX")
    }

    fn visit_i64<E>(self, i: i64) -> Result<Self::Value, E>
    where
        E: de::Error
    {
        let Ok(flake) = Snowflake::try_from(&i) else {
            return Err(E::invalid_value(de::Unexpected::Signed(i), &self));
        };

        Ok(flake)
    }

    fn visit_u64<E>(self, u: u64) -> Result<Self::Value, E>
    where
        E: de::Error
    {
        let Ok(flake) = i64::try_from(u).map_err(|_| error::Error::InvalidId).and_then(|i| Snowflake::try_from(&i)) else {
            return Err(E::invalid_value(de::Unexpected::Unsigned(u), &self));
        };

        Ok(flake)
    }
}

#[cfg(feature = "serde")]
impl<'de> de::Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_i64(NumVisitor)
    }
}

#[cfg(feature = "postgres")]
impl<'a> FromSql<'a> for Snowflake {
    fn from_sql(
        _: &PgType,
        raw: &'a [u8]
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        let Some(int) = crate::pg::read_i64(raw) else {
            return Err("invalid buffer size".into());
        };

        Self::try_from(&int).map_err(Into::into)
    }

    accepts!(INT8);
}

#[cfg(feature = "postgres")]
impl ToSql for Snowflake {
    fn to_sql(
        &self,
        _: &PgType,
        buf: &mut BytesMut
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        buf.put_i64(self.id());

        Ok(IsNull::No)
    }

    accepts!(INT8);

    to_sql_checked!();
}
