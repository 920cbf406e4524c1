//! Read-flag coercion for the message read/unread toggle.

use core::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};

/// A boolean read flag parsed from loosely typed client input.
///
/// Clients have historically sent the read flag as a JSON boolean, as the
/// numbers `0`/`1`, or as the strings `"0"`/`"1"`/`"true"`/`"false"`. This
/// type accepts exactly those forms and rejects everything else, so handlers
/// get a typed boolean instead of scattering truthiness checks.
///
/// ## Examples
///
/// ```
/// use sanad_core::ReadFlag;
///
/// let flag: ReadFlag = serde_json::from_str("true").unwrap();
/// assert!(flag.as_bool());
///
/// let flag: ReadFlag = serde_json::from_str("\"1\"").unwrap();
/// assert!(flag.as_bool());
///
/// assert!(serde_json::from_str::<ReadFlag>("\"yes\"").is_err());
/// assert!(serde_json::from_str::<ReadFlag>("2").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadFlag(bool);

impl ReadFlag {
    /// Wrap a boolean.
    #[must_use]
    pub const fn new(value: bool) -> Self {
        Self(value)
    }

    /// Get the parsed boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> bool {
        self.0
    }
}

impl From<bool> for ReadFlag {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl From<ReadFlag> for bool {
    fn from(flag: ReadFlag) -> Self {
        flag.0
    }
}

impl Serialize for ReadFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

struct ReadFlagVisitor;

impl Visitor<'_> for ReadFlagVisitor {
    type Value = ReadFlag;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, 0 or 1, or \"0\"/\"1\"/\"true\"/\"false\"")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(ReadFlag(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        match v {
            0 => Ok(ReadFlag(false)),
            1 => Ok(ReadFlag(true)),
            other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        match v {
            0 => Ok(ReadFlag(false)),
            1 => Ok(ReadFlag(true)),
            other => Err(E::invalid_value(de::Unexpected::Signed(other), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.eq_ignore_ascii_case("true") || v == "1" {
            Ok(ReadFlag(true))
        } else if v.eq_ignore_ascii_case("false") || v == "0" {
            Ok(ReadFlag(false))
        } else {
            Err(E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for ReadFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ReadFlagVisitor)
    }
}
