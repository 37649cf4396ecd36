use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::{DateTime, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::prelude::*;

/// Used when the caller knows nothing better about the zone of «now».
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Europe::Oslo;

/// Wall-clock time without a date, written as `HH:MM`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, DeserializeFromStr, SerializeDisplay)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    #[must_use]
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Resolve the clock time on the same local date as `now`, in the zone of `now`.
    ///
    /// A time skipped by a DST transition resolves one hour later, which lands after the gap.
    #[must_use]
    pub fn on_date_of<Z: TimeZone>(self, now: &DateTime<Z>) -> Option<DateTime<Z>> {
        let local = now.date_naive().and_time(self.0);
        let zone = now.timezone();
        zone.from_local_datetime(&local)
            .earliest()
            .or_else(|| zone.from_local_datetime(&(local + TimeDelta::hours(1))).earliest())
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for ClockTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (hour, minute) =
            s.split_once(':').with_context(|| format!("`{s}` is not in the `HH:MM` format"))?;
        ensure!(
            hour.len() == 2 && minute.len() == 2,
            "`{s}` must have two-digit hours and minutes"
        );
        let hour: u32 = hour.parse().with_context(|| format!("invalid hour in `{s}`"))?;
        let minute: u32 = minute.parse().with_context(|| format!("invalid minute in `{s}`"))?;
        Self::from_hm(hour, minute).with_context(|| format!("`{s}` is out of range"))
    }
}

/// Pin an instant to the `zone`, or [`DEFAULT_TIME_ZONE`] when there is none.
#[must_use]
pub fn in_zone_or_default<Z: TimeZone>(instant: &DateTime<Z>, zone: Option<Tz>) -> DateTime<Tz> {
    instant.with_timezone(&zone.unwrap_or(DEFAULT_TIME_ZONE))
}
