use chrono::{DateTime, TimeZone};
use itertools::Itertools;

use crate::{
    core::slot::{PriceSlot, floor_to_slot},
    ops::Aggregate,
    prelude::*,
};

/// Aggregates over the series which callers recompute whenever «now» advances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceSnapshot {
    /// Slots of the local date of «now».
    pub today: Vec<PriceSlot>,

    /// Slot containing «now», absent when «now» falls outside the series.
    pub latest: Option<PriceSlot>,

    pub lowest_today: PriceSlot,
    pub highest_today: PriceSlot,
}

impl PriceSnapshot {
    pub fn try_new<Z: TimeZone>(series: &[PriceSlot], now: &DateTime<Z>) -> Result<Self> {
        let zone = now.timezone();
        let date = now.date_naive();
        let today = series
            .iter()
            .filter(|slot| slot.starts_at.with_timezone(&zone).date_naive() == date)
            .copied()
            .collect_vec();
        let lowest_today = today
            .iter()
            .copied()
            .first_min_by_key(|slot| slot.total)
            .with_context(|| format!("there are no prices for {date}"))?;
        let highest_today = today
            .iter()
            .copied()
            .first_max_by_key(|slot| slot.total)
            .with_context(|| format!("there are no prices for {date}"))?;

        let current_slot_start = floor_to_slot(now);
        let latest = series.iter().find(|slot| slot.starts_at == current_slot_start).copied();
        if latest.is_none() {
            warn!(%date, "the current slot is missing from the prices");
        }

        Ok(Self { today, latest, lowest_today, highest_today })
    }
}
