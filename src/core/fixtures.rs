//! Three days of ascending quarter-hourly prices: yesterday `1..=96`, today `101..=196`,
//! and tomorrow `201..=296`, where «today» is 2023-02-01 in Oslo.
//!
//! For the daylight saving time switches, [`continuous_series`] numbers slots `1, 2, 3, …`
//! without restarting at midnight.

use chrono::{DateTime, TimeDelta};
use chrono_tz::{Europe, Tz};

use crate::core::{slot::PriceSlot, snapshot::PriceSnapshot};

pub fn ascending_series() -> Vec<PriceSlot> {
    let start = DateTime::parse_from_rfc3339("2023-01-31T00:00:00+01:00").unwrap();
    (0..3_i32)
        .flat_map(|day| {
            (0..96_i32).map(move |index| {
                let value = f64::from(1 + day * 100 + index);
                PriceSlot::builder()
                    .starts_at(start + TimeDelta::minutes(i64::from(15 * (day * 96 + index))))
                    .total(value)
                    .energy(value)
                    .tax(value)
                    .build()
            })
        })
        .collect()
}

/// `n_slots` consecutive slots from `start` priced `1, 2, 3, …`, with Oslo offsets.
pub fn continuous_series(start: &str, n_slots: i32) -> Vec<PriceSlot> {
    let start = oslo(start);
    (0..n_slots)
        .map(|index| {
            let value = f64::from(1 + index);
            PriceSlot::builder()
                .starts_at((start + TimeDelta::minutes(i64::from(15 * index))).fixed_offset())
                .total(value)
                .energy(value)
                .tax(0.0)
                .build()
        })
        .collect()
}

pub fn oslo(rfc3339: &str) -> DateTime<Tz> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Europe::Oslo)
}

pub fn snapshot(series: &[PriceSlot], now: &DateTime<Tz>) -> PriceSnapshot {
    PriceSnapshot::try_new(series, now).unwrap()
}
