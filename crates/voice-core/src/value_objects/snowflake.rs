//! Snowflake ID - the platform's 64-bit identifier for guilds, users and channels
//!
//! The tracker never generates snowflakes; it only carries the ones delivered by the
//! presence source. They are persisted and serialized as decimal strings, and a valid
//! one is always strictly positive.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Guild, user or channel id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Wrap a raw id without validating it
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Parse a plain decimal id. Signs, whitespace and zero are rejected.
    pub fn parse(raw: &str) -> Result<Self, SnowflakeParseError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SnowflakeParseError::NotDecimal);
        }
        let id = raw
            .parse::<i64>()
            .map_err(|_| SnowflakeParseError::OutOfRange)?;
        Self::try_from(id)
    }
}

/// Why a raw value is not a usable snowflake
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("snowflake must be a decimal number")]
    NotDecimal,

    #[error("snowflake does not fit in 64 bits")]
    OutOfRange,

    #[error("snowflake must be positive, got {0}")]
    NotPositive(i64),
}

impl TryFrom<i64> for Snowflake {
    type Error = SnowflakeParseError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(SnowflakeParseError::NotPositive(id))
        }
    }
}

impl FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// JSON clients cannot hold 64-bit integers exactly, so ids go out as strings
impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Accepts either a decimal string or a JSON integer
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = Snowflake;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a positive snowflake id as a string or integer")
            }

            fn visit_i64<E: de::Error>(self, id: i64) -> Result<Snowflake, E> {
                Snowflake::try_from(id).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, id: u64) -> Result<Snowflake, E> {
                let id = i64::try_from(id).map_err(|_| E::custom(SnowflakeParseError::OutOfRange))?;
                self.visit_i64(id)
            }

            fn visit_str<E: de::Error>(self, raw: &str) -> Result<Snowflake, E> {
                Snowflake::parse(raw).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}
