use serde::{Deserialize, Serialize};

use crate::{
    conditions::{
        Context,
        sink::DiagnosticSink,
        window::{Bound, RelativeHours, select_window},
    },
    core::slot::{PriceSlot, floor_to_slot},
    ops::{Aggregate, Rank},
    prelude::*,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceExtremesOptions {
    /// Signed window length relative to the current slot, `None` means the whole of today.
    #[serde(default)]
    pub hours: Option<f64>,

    /// Switches to the rank mode: whether the current slot is among this many
    /// lowest or highest slots of the window.
    #[serde(default)]
    pub ranked_slots: Option<usize>,
}

/// Check whether the current slot is the lowest or highest of the window,
/// or ranks among `options.ranked_slots` lowest or highest ones.
///
/// Unlike [`super::average::average_price`], the window includes the current slot.
#[instrument(
    level = "debug",
    skip_all,
    fields(hours = ?options.hours, ranked_slots = ?options.ranked_slots, lowest = lowest),
)]
pub fn price_extremes(
    sink: &dyn DiagnosticSink,
    context: &Context<'_>,
    options: &PriceExtremesOptions,
    lowest: bool,
) -> bool {
    if options.hours == Some(0.0) || options.ranked_slots == Some(0) {
        return false;
    }

    let current_slot_start = floor_to_slot(&context.now);
    let window = select_window(
        context.series,
        &context.snapshot.today,
        &current_slot_start,
        options.hours,
        Bound::Inclusive,
    );
    if window.is_empty() {
        sink.log("Cannot determine condition. No prices for next slots available.");
        return false;
    }

    let Some(latest) = context.snapshot.latest else {
        sink.log("Cannot determine condition. The last price is undefined");
        return false;
    };

    let period = RelativeHours(options.hours);
    let direction = if lowest { "lowest" } else { "highest" };

    if let Some(ranked_slots) = options.ranked_slots {
        let Some(rank) = rank_of(&window, &latest) else {
            sink.log(&format!("Could not find the current slot rank among the slots of {period}"));
            return false;
        };
        let is_met = is_ranked(rank, window.len(), ranked_slots, lowest);
        sink.log(&format!(
            "{} is among the {direction} {ranked_slots} slots of {period} = {is_met}",
            latest.total,
        ));
        is_met
    } else {
        let extreme = if lowest {
            window.iter().first_min_by_key(|slot| slot.total)
        } else {
            window.iter().first_max_by_key(|slot| slot.total)
        };
        let Some(extreme) = extreme.map(|slot| slot.total) else {
            sink.log("Cannot determine condition. No prices for next slots available.");
            return false;
        };
        let is_met = if lowest { latest.total <= extreme } else { latest.total >= extreme };
        sink.log(&format!(
            "{} is {} ({extreme}) of {period} = {is_met}",
            latest.total,
            if lowest { "lower than the lowest" } else { "higher than the highest" },
        ));
        is_met
    }
}

/// Position of the slot in the window sorted by price, cheapest first.
pub(super) fn rank_of(window: &[PriceSlot], slot: &PriceSlot) -> Option<usize> {
    window.iter().rank_by_key(|item| item.total, |item| item.starts_at == slot.starts_at)
}

pub(super) const fn is_ranked(rank: usize, n_slots: usize, ranked_slots: usize, lowest: bool) -> bool {
    if lowest { rank < ranked_slots } else { rank >= n_slots.saturating_sub(ranked_slots) }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta};
    use chrono_tz::Tz;

    use super::*;
    use crate::{
        conditions::sink::testing::Collector,
        core::fixtures::{ascending_series, continuous_series, oslo, snapshot},
    };

    fn evaluate(now: &str, options: PriceExtremesOptions, lowest: bool) -> bool {
        let series = ascending_series();
        let now = oslo(now);
        let snapshot = snapshot(&series, &now);
        price_extremes(&|_: &str| {}, &Context::new(&series, &snapshot, now), &options, lowest)
    }

    #[test]
    fn test_today() {
        for (now, expected_lowest, expected_highest) in [
            ("2023-02-01T00:00:00+01:00", true, false),
            ("2023-02-01T00:15:00+01:00", false, false),
            ("2023-02-01T12:00:00+01:00", false, false),
            ("2023-02-01T23:45:00+01:00", false, true),
        ] {
            let options = PriceExtremesOptions::default();
            assert_eq!(evaluate(now, options, true), expected_lowest, "lowest at {now}");
            assert_eq!(evaluate(now, options, false), expected_highest, "highest at {now}");
        }
    }

    #[test]
    fn test_next_hours() {
        let options = PriceExtremesOptions { hours: Some(3.0), ranked_slots: None };
        assert!(!evaluate("2023-02-01T00:15:00+01:00", options, false));
        assert!(evaluate("2023-02-01T00:15:00+01:00", options, true));
        // Mid-slot «now» still includes the current slot.
        assert!(evaluate("2023-02-01T00:29:59+01:00", options, true));
    }

    #[test]
    fn test_previous_hours() {
        let options = PriceExtremesOptions { hours: Some(-2.0), ranked_slots: None };
        assert!(evaluate("2023-02-01T23:45:00+01:00", options, false));
        assert!(!evaluate("2023-02-01T23:45:00+01:00", options, true));
    }

    #[test]
    fn test_fractional_hours() {
        // The next hour and a half from 00:15 is 102..=107.
        let options = PriceExtremesOptions { hours: Some(1.5), ranked_slots: None };
        assert!(evaluate("2023-02-01T00:15:00+01:00", options, true));
        assert!(!evaluate("2023-02-01T00:15:00+01:00", options, false));

        // The previous quarter is the current slot alone.
        let options = PriceExtremesOptions { hours: Some(-0.25), ranked_slots: None };
        assert!(evaluate("2023-02-01T12:10:00+01:00", options, true));
        assert!(evaluate("2023-02-01T12:10:00+01:00", options, false));

        let options = PriceExtremesOptions { hours: Some(-1.5), ranked_slots: Some(1) };
        assert!(evaluate("2023-02-01T01:30:00+01:00", options, false));
        assert!(!evaluate("2023-02-01T01:30:00+01:00", options, true));
    }

    #[test]
    fn test_repeated_hour() {
        let series = continuous_series("2023-10-28T00:00:00+02:00", 96 + 100 + 96);
        let options = PriceExtremesOptions { hours: Some(1.0), ranked_slots: None };
        for now in ["2023-10-29T02:07:31+02:00", "2023-10-29T02:52:00+01:00"] {
            let now = oslo(now);
            let snapshot = snapshot(&series, &now);
            let collector = Collector::default();
            let context = Context::new(&series, &snapshot, now);
            assert!(price_extremes(&collector, &context, &options, true), "{now}");
            assert!(!collector.messages()[0].starts_with("Cannot"), "{now}");
        }
    }

    #[test]
    fn test_skipped_hour() {
        // At 01:45, the next hour runs through 03:30 because 02:00 jumps to 03:00.
        let series = continuous_series("2023-03-25T00:00:00+01:00", 96 + 92 + 96);
        let now = oslo("2023-03-26T01:45:00+01:00");
        let snapshot = snapshot(&series, &now);
        let context = Context::new(&series, &snapshot, now);
        let options = PriceExtremesOptions { hours: Some(1.0), ranked_slots: Some(1) };
        assert!(price_extremes(&|_: &str| {}, &context, &options, true));
        let next_hour = select_window(&series, &[], &now, Some(1.0), Bound::Inclusive);
        assert_eq!(next_hour.last().unwrap().starts_at, oslo("2023-03-26T03:30:00+02:00"));
    }

    #[test]
    fn test_ranked_next_hours() {
        let options = PriceExtremesOptions { hours: Some(12.0), ranked_slots: Some(3) };
        assert!(!evaluate("2023-02-01T00:15:00+01:00", options, false));
        assert!(evaluate("2023-02-01T00:15:00+01:00", options, true));
    }

    #[test]
    fn test_ranked_today() {
        let options = PriceExtremesOptions { hours: None, ranked_slots: Some(3) };
        assert!(!evaluate("2023-02-01T23:00:00+01:00", options, false));
        assert!(evaluate("2023-02-01T23:15:00+01:00", options, false));
        assert!(evaluate("2023-02-01T23:45:00+01:00", options, false));
        assert!(evaluate("2023-02-01T00:30:00+01:00", options, true));
        assert!(!evaluate("2023-02-01T00:45:00+01:00", options, true));
    }

    #[test]
    fn test_ranked_more_than_window() {
        let options = PriceExtremesOptions { hours: Some(1.0), ranked_slots: Some(10) };
        assert!(evaluate("2023-02-01T12:00:00+01:00", options, true));
        assert!(evaluate("2023-02-01T12:00:00+01:00", options, false));
    }

    #[test]
    fn test_zero_is_false_and_silent() {
        let series = ascending_series();
        let now = oslo("2023-02-01T00:00:00+01:00");
        let snapshot = snapshot(&series, &now);
        let context = Context::new(&series, &snapshot, now);
        let collector = Collector::default();
        for options in [
            PriceExtremesOptions { hours: Some(0.0), ranked_slots: None },
            PriceExtremesOptions { hours: None, ranked_slots: Some(0) },
            PriceExtremesOptions { hours: Some(0.0), ranked_slots: Some(3) },
        ] {
            assert!(!price_extremes(&collector, &context, &options, true));
        }
        assert!(collector.messages().is_empty());
    }

    #[test]
    fn test_empty_window() {
        let series = ascending_series();
        let snapshot = snapshot(&series, &oslo("2023-02-01T12:00:00+01:00"));
        let context = Context::new(&series, &snapshot, oslo("2023-02-03T00:00:00+01:00"));
        let collector = Collector::default();
        let options = PriceExtremesOptions { hours: Some(1.0), ranked_slots: None };
        assert!(!price_extremes(&collector, &context, &options, true));
        assert_eq!(collector.messages(), ["Cannot determine condition. No prices for next slots available."]);
    }

    #[test]
    fn test_missing_latest() {
        let series = ascending_series();
        let now = oslo("2023-02-01T12:00:00+01:00");
        let mut snapshot = snapshot(&series, &now);
        snapshot.latest = None;
        let collector = Collector::default();
        let options = PriceExtremesOptions::default();
        assert!(!price_extremes(&collector, &Context::new(&series, &snapshot, now), &options, true));
        assert_eq!(collector.messages(), ["Cannot determine condition. The last price is undefined"]);
    }

    #[test]
    fn test_latest_outside_ranked_window() {
        let series = ascending_series();
        let snapshot = snapshot(&series, &oslo("2023-02-01T12:00:00+01:00"));
        let context = Context::new(&series, &snapshot, oslo("2023-02-01T15:00:00+01:00"));
        let collector = Collector::default();
        let options = PriceExtremesOptions { hours: Some(-1.0), ranked_slots: Some(2) };
        assert!(!price_extremes(&collector, &context, &options, true));
        assert_eq!(
            collector.messages(),
            ["Could not find the current slot rank among the slots of the previous 1 hours"],
        );
    }

    /// Prices repeating `[3, 1, 1, 2]` over the day, so the minimum and maximum are tied.
    fn tied_series(start: &DateTime<Tz>) -> Vec<PriceSlot> {
        (0..96_i64)
            .map(|index| {
                let total = [3.0, 1.0, 1.0, 2.0][(index % 4) as usize];
                PriceSlot::builder()
                    .starts_at((*start + TimeDelta::minutes(15 * index)).fixed_offset())
                    .total(total)
                    .energy(total)
                    .tax(0.0)
                    .build()
            })
            .collect()
    }

    #[test]
    fn test_ties_all_satisfy_single_extreme() {
        let start = oslo("2023-02-01T00:00:00+01:00");
        let series = tied_series(&start);
        for minutes in [0, 60, 1380] {
            let now = start + TimeDelta::minutes(minutes);
            let snapshot = snapshot(&series, &now);
            let context = Context::new(&series, &snapshot, now);
            assert!(price_extremes(&|_: &str| {}, &context, &PriceExtremesOptions::default(), false));
        }
        for minutes in [15, 30, 1410] {
            let now = start + TimeDelta::minutes(minutes);
            let snapshot = snapshot(&series, &now);
            let context = Context::new(&series, &snapshot, now);
            assert!(price_extremes(&|_: &str| {}, &context, &PriceExtremesOptions::default(), true));
        }
    }

    #[test]
    fn test_ties_rank_in_window_order() {
        let start = oslo("2023-02-01T00:00:00+01:00");
        let series = tied_series(&start);
        let options = PriceExtremesOptions { hours: Some(1.0), ranked_slots: Some(1) };

        // Window 00:15..01:15 is `[1, 1, 2, 3]`, the earlier tie ranks first.
        let now = start + TimeDelta::minutes(15);
        let first = snapshot(&series, &now);
        assert!(price_extremes(&|_: &str| {}, &Context::new(&series, &first, now), &options, true));

        // Window 00:30..01:30 is `[1, 2, 3, 1]`, the later 1 at 01:15 ranks second.
        let now = start + TimeDelta::minutes(30);
        let second = snapshot(&series, &now);
        assert!(price_extremes(&|_: &str| {}, &Context::new(&series, &second, now), &options, true));
    }

    #[test]
    fn test_single_extreme_ignores_order() {
        let series = ascending_series();
        for index in (0..96).step_by(5) {
            let now = oslo("2023-02-01T00:00:00+01:00") + TimeDelta::minutes(15 * index);
            let snapshot = snapshot(&series, &now);
            let mut reversed = snapshot.clone();
            reversed.today.reverse();
            for lowest in [true, false] {
                let options = PriceExtremesOptions::default();
                let expected =
                    price_extremes(&|_: &str| {}, &Context::new(&series, &snapshot, now), &options, lowest);
                let actual =
                    price_extremes(&|_: &str| {}, &Context::new(&series, &reversed, now), &options, lowest);
                assert_eq!(actual, expected, "lowest = {lowest} at {now}");
            }
        }
    }

    #[test]
    fn test_rank_is_injective_for_unique_prices() {
        let series = ascending_series();
        let window = &series[96..192];
        let mut ranks = window.iter().map(|slot| rank_of(window, slot).unwrap()).collect::<Vec<_>>();
        ranks.sort_unstable();
        assert_eq!(ranks, (0..96).collect::<Vec<_>>());
    }

    #[test]
    fn test_is_ranked() {
        assert!(is_ranked(0, 10, 1, true));
        assert!(!is_ranked(1, 10, 1, true));
        assert!(is_ranked(9, 10, 1, false));
        assert!(!is_ranked(8, 10, 1, false));
        assert!(is_ranked(0, 3, 5, false));
    }
}
