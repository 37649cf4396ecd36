use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::quantity::rate::KilowattHourRate;

pub const SLOT_MINUTES: u32 = 15;
pub const SLOTS_PER_HOUR: i32 = 4;

/// Provider's own classification of a price relative to the recent average.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceLevel {
    VeryCheap,
    Cheap,
    #[default]
    Normal,
    Expensive,
    VeryExpensive,
}

/// Single quarter-hourly price quote.
#[derive(Copy, Clone, Debug, PartialEq, Eq, bon::Builder, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSlot {
    /// Unique within a series, used to find the current slot.
    pub starts_at: DateTime<FixedOffset>,

    #[builder(into)]
    pub total: KilowattHourRate,

    #[builder(into)]
    pub energy: KilowattHourRate,

    #[builder(into)]
    pub tax: KilowattHourRate,

    #[builder(default)]
    #[serde(default)]
    pub level: PriceLevel,
}

impl PriceSlot {
    #[must_use]
    pub fn ends_at(&self) -> DateTime<FixedOffset> {
        self.starts_at + TimeDelta::minutes(i64::from(SLOT_MINUTES))
    }
}

/// Start of the slot containing the `time`: truncate to the minute and floor the minute
/// to the slot width.
///
/// Works on the instant rather than on the wall clock, so that ambiguous local times
/// (the repeated hour when the clocks go back) keep their offset.
#[must_use]
pub fn floor_to_slot<Tz: TimeZone>(time: &DateTime<Tz>) -> DateTime<Tz> {
    let seconds = i64::from(time.minute() % SLOT_MINUTES) * 60 + i64::from(time.second());
    time.clone()
        - TimeDelta::seconds(seconds)
        - TimeDelta::nanoseconds(i64::from(time.nanosecond()))
}
