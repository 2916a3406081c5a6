//! the snowdrift identifier format
//!
//! ```text
//!  0 - 11111111111111111111111111111111111111111 - 1111111111 - 111111111111
//!  |   |                                       |   |        |   |          |
//! 64  63                                      23  22       13  12          1
//! sign                                  elapsed time   node id     sequence
//! ```
//!
//! [`Snowflake`] packs and unpacks the three segments, [`parse`] decodes any
//! i64 against an epoch, and [`codec`] turns ids into short strings.

pub mod error;
pub mod codec;

#[cfg(feature = "serde")]
pub mod serde_ext;
#[cfg(feature = "postgres")]
mod pg;

mod parse;
mod snowflake;

pub use parse::{parse, Parsed};
pub use snowflake::Snowflake;

/// number of bits for the intra millisecond sequence
pub const SEQUENCE_BITS: u8 = 12;
/// number of bits for the node id
pub const NODE_ID_BITS: u8 = 10;
/// number of bits for the elapsed milliseconds since the epoch
pub const ELAPSED_BITS: u8 = 41;

/// 2020/06/01 00:00:00 +08:00 in milliseconds. ids decode against this epoch
/// unless another is given. never change it once ids have been issued
pub const DEFAULT_START_TIME: i64 = 1590940800000;
