//! Value objects - immutable types that represent domain concepts

mod period;
mod snowflake;

pub use period::{Period, PeriodParseError};
pub use snowflake::{Snowflake, SnowflakeParseError};
