/// possible errors for Snowflakes and the text codecs
///
/// since the errors are not very complex only the offending character is
/// carried along for decoding errors.
///
/// ```rust
/// use snowdrift_flake::{Snowflake, error::Error};
///
/// match Snowflake::from_parts(1, 1024, 0) {
///     Ok(flake) => println!("{}", flake),
///     Err(Error::NodeIdInvalid) => {
///         // node ids only go up to 1023
///     },
///     Err(err) => println!("{}", err),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// the provided i64 is not a valid Snowflake
    #[error("invalid id")]
    InvalidId,

    /// a provided elapsed time is less than 0 or greater than the max value
    #[error("elapsed time invalid")]
    ElapsedInvalid,

    /// a provided node id is less than 0 or greater than the max value
    #[error("node id invalid")]
    NodeIdInvalid,

    /// a provided sequence is less than 0 or greater than the max value
    #[error("sequence invalid")]
    SequenceInvalid,

    /// an alphabet has the wrong length, repeats a symbol, or is not ascii
    #[error("alphabet must be {expected} unique ascii characters long")]
    InvalidAlphabet {
        expected: usize,
    },

    /// nothing was given to decode
    #[error("decoding id should not be empty")]
    EmptyInput,

    /// a character outside of the alphabet was found while decoding
    #[error("invalid decoding character - {0}")]
    InvalidCharacter(char),

    /// the decoded value does not fit in an i64
    #[error("decoded value overflows i64")]
    Overflow,

    /// negative values have no encoding
    #[error("cannot encode negative id {0}")]
    NegativeId(i64),
}

pub type Result<T> = std::result::Result<T, Error>;
