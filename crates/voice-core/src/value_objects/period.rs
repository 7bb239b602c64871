//! Query period - a named time window a voice-time query resolves against

use chrono::{DateTime, Datelike, Days, LocalResult, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named time window for voice-time totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// The in-progress session only (live tracker state)
    Current,
    /// Since the start of the current calendar day
    Today,
    /// Since Monday 00:00 of the current week
    Week,
    /// Since the first day of the current calendar month
    Month,
    /// Everything ever recorded
    All,
}

impl Period {
    /// All periods in the order they are offered to users
    pub const ALL: [Period; 5] = [
        Period::Current,
        Period::Today,
        Period::Week,
        Period::Month,
        Period::All,
    ];

    /// Wire name of the period
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::All => "all",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Current => "Current Session",
            Self::Today => "Today",
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::All => "Overall",
        }
    }

    /// Resolve the inclusive lower bound (unix milliseconds) of this period.
    ///
    /// Calendar boundaries are taken in `now`'s time zone. Returns `None` for
    /// [`Period::Current`], which has no lower bound.
    pub fn lower_bound<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<i64> {
        let today = now.date_naive();
        let first_day = match self {
            Self::Current => return None,
            Self::All => return Some(0),
            Self::Today => today,
            Self::Week => {
                let back = u64::from(today.weekday().num_days_from_monday());
                today.checked_sub_days(Days::new(back)).unwrap_or(today)
            }
            Self::Month => NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today),
        };

        Some(start_of_day(&now.timezone(), first_day))
    }
}

/// First instant of `date` in `tz`, in unix milliseconds.
///
/// When midnight does not exist locally (DST gap) the first valid hour is used.
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    let resolved = match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt),
        LocalResult::None => tz
            .from_local_datetime(&(midnight + TimeDelta::hours(1)))
            .earliest(),
    };

    resolved.map_or_else(
        || midnight.and_utc().timestamp_millis(),
        |dt| dt.timestamp_millis(),
    )
}

/// Error when parsing a period name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown period '{0}' (expected one of: current, today, week, month, all)")]
pub struct PeriodParseError(pub String);

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "current" => Ok(Self::Current),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "all" => Ok(Self::All),
            _ => Err(PeriodParseError(s.to_string())),
        }
    }
}
