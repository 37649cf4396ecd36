use serde::{Deserialize, Serialize};

use crate::{
    conditions::{
        Context,
        sink::DiagnosticSink,
        window::{Bound, RelativeHours, select_window},
    },
    ops::Aggregate,
    prelude::*,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AveragePriceOptions {
    /// Signed window length relative to «now», `None` means the whole of today.
    #[serde(default)]
    pub hours: Option<f64>,

    /// Minimal deviation from the average, in percent.
    pub percentage: f64,
}

/// Check whether the current price deviates from the window average by more than
/// `options.percentage`, below or above it.
///
/// The window excludes the slot starting exactly at «now».
#[instrument(
    level = "debug",
    skip_all,
    fields(hours = ?options.hours, percentage = options.percentage, below = below),
)]
pub fn average_price(
    sink: &dyn DiagnosticSink,
    context: &Context<'_>,
    options: &AveragePriceOptions,
    below: bool,
) -> bool {
    if options.hours == Some(0.0) {
        return false;
    }

    let window = select_window(
        context.series,
        &context.snapshot.today,
        &context.now,
        options.hours,
        Bound::Exclusive,
    );
    let Some(average) = window.iter().map(|slot| slot.total).mean() else {
        sink.log("Cannot determine condition. No prices for next slots available.");
        return false;
    };

    let Some(latest) = context.snapshot.latest else {
        sink.log("Cannot determine condition. The last price is undefined");
        return false;
    };

    let mut difference = (latest.total - average) / average * 100.0;
    if below {
        difference = -difference;
    }
    let is_met = difference > options.percentage;

    sink.log(&format!(
        "{} is {difference:.2}% {} average ({average}) over {}. Condition of min {}% met = {is_met}",
        latest.total,
        if below { "below" } else { "above" },
        RelativeHours(options.hours),
        options.percentage,
    ));
    is_met
}
