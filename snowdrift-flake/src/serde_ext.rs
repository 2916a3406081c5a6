//! additional serde options for de/serializing a snowflake
//!
//! provides modules for converting a snowflake to a string if something
//! cannot handle working with 64 bit signed integers (javascript).
//!
//! ```rust
//! use serde_derive::{Serialize, Deserialize};
//! use snowdrift_flake::Snowflake;
//! use snowdrift_flake::serde_ext::string_id;
//!
//! #[derive(Serialize, Deserialize)]
//! pub struct MyStruct {
//!     #[serde(with = "string_id")]
//!     id: Snowflake,
//! }
//!
//! let my_struct = MyStruct {
//!     id: Snowflake::from_parts(1, 1, 1).unwrap(),
//! };
//!
//! let json_string = serde_json::to_string(&my_struct).unwrap();
//!
//! assert_eq!(json_string, "{\"id\":\"4198401\"}");
//! ```

use std::fmt;

use serde::de;

use crate::Snowflake;

/// visitor for deserializing a string to a snowflake
pub struct StringVisitor;

impl<'de> de::Visitor<'de> for StringVisitor {
    type Value = Snowflake;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "non empty integer string within the valid range of the Id")
    }

    fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let Ok(num) = s.parse::<i64>() else {
            return Err(E::invalid_value(de::Unexpected::Str(s), &self));
        };

        let Ok(flake) = Snowflake::try_from(&num) else {
            return Err(E::invalid_value(de::Unexpected::Str(s), &self));
        };

        Ok(flake)
    }
}

/// visitor for deserializing an optional string to a snowflake
pub struct OptionStringVisitor;

impl<'de> de::Visitor<'de> for OptionStringVisitor {
    type Value = Option<Snowflake>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "non empty integer string with the valid range of the Id")
    }

    fn visit_some<D>(self, d: D) -> Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>
    {
        d.deserialize_str(StringVisitor).map(Some)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error
    {
        Ok(None)
    }
}

/// de/serializes a snowflake to a string
///
/// structured to be used in `#[serde(with = "string_id")]`. will assume
/// base 10 number strings
pub mod string_id {
    use serde::{ser, de};

    use crate::Snowflake;
    use super::StringVisitor;

    /// serializes a given snowflake to a string
    pub fn serialize<S>(flake: &Snowflake, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer
    {
        serializer.serialize_str(flake.id().to_string().as_str())
    }

    /// deserializes a given string to a snowflake
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Snowflake, D::Error>
    where
        D: de::Deserializer<'de>
    {
        deserializer.deserialize_str(StringVisitor)
    }
}

/// de/serializes an optional snowflake to a string
///
/// structured to be used in `#[serde(with = "option_string_id")]`
pub mod option_string_id {
    use serde::{ser, de};

    use crate::Snowflake;
    use super::OptionStringVisitor;

    /// serializes a given snowflake to a string
    pub fn serialize<S>(flake: &Option<Snowflake>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer
    {
        match flake {
            Some(v) => serializer.serialize_some(v.id().to_string().as_str()),
            None => serializer.serialize_none()
        }
    }

    /// deserializes a given string to a snowflake
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Snowflake>, D::Error>
    where
        D: de::Deserializer<'de>
    {
        deserializer.deserialize_option(OptionStringVisitor)
    }
}
