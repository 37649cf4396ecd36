use chrono::{DateTime, Days, TimeZone};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    conditions::{
        Context,
        extremes::{is_ranked, rank_of},
        sink::DiagnosticSink,
    },
    core::{clock::ClockTime, interval::Interval},
    prelude::*,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowestPricesWithinTimeFrameOptions {
    pub ranked_slots: usize,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

/// Check whether the current slot is among `options.ranked_slots` cheapest slots
/// of the clock-time window containing «now».
///
/// The window may wrap over midnight, for example, `22:00`–`06:00`.
#[instrument(
    level = "debug",
    skip_all,
    fields(
        ranked_slots = options.ranked_slots,
        start_time = %options.start_time,
        end_time = %options.end_time,
    ),
)]
pub fn lowest_prices_within_time_frame(
    sink: &dyn DiagnosticSink,
    context: &Context<'_>,
    options: &LowestPricesWithinTimeFrameOptions,
) -> bool {
    if options.ranked_slots == 0 {
        return false;
    }

    let Some(time_frame) = resolve_time_frame(&context.now, options.start_time, options.end_time)
    else {
        sink.log("Cannot determine condition. The time frame does not exist in the local time");
        return false;
    };

    if !time_frame.contains(&context.now) {
        sink.log("Time conditions not met");
        return false;
    }

    let window = context
        .series
        .iter()
        .filter(|slot| time_frame.contains(&slot.starts_at))
        .copied()
        .collect_vec();
    if window.is_empty() {
        sink.log("Cannot determine condition. No prices in the time window.");
        return false;
    }

    let Some(latest) = context.snapshot.latest else {
        sink.log("Cannot determine condition. The last price is undefined");
        return false;
    };

    let Some(rank) = rank_of(&window, &latest) else {
        sink.log("Could not find the current slot rank among window prices");
        return false;
    };

    let is_met = is_ranked(rank, window.len(), options.ranked_slots, true);
    sink.log(&format!(
        "{} is among the lowest {} prices between {time_frame} = {is_met}",
        latest.total, options.ranked_slots,
    ));
    is_met
}

/// Anchor the clock times to the date of `now`.
///
/// When the start is after the end, the window wraps over midnight: before the end,
/// «now» is in the tail of the window which started yesterday; after the end,
/// the next window ends tomorrow.
pub fn resolve_time_frame<Z: TimeZone>(
    now: &DateTime<Z>,
    start_time: ClockTime,
    end_time: ClockTime,
) -> Option<Interval<Z>> {
    let time_frame = Interval::new(start_time.on_date_of(now)?, end_time.on_date_of(now)?);
    if !time_frame.is_inverted() {
        Some(time_frame)
    } else if *now < time_frame.end {
        time_frame.with_start_days_before(Days::new(1))
    } else if *now > time_frame.end {
        time_frame.with_end_days_after(Days::new(1))
    } else {
        Some(time_frame)
    }
}
