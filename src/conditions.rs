pub mod average;
pub mod extremes;
pub mod sink;
pub mod time_frame;
pub mod window;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub use self::{
    average::{AveragePriceOptions, average_price},
    extremes::{PriceExtremesOptions, price_extremes},
    sink::{DiagnosticSink, NoopSink, TracingSink},
    time_frame::{LowestPricesWithinTimeFrameOptions, lowest_prices_within_time_frame},
};
use crate::core::{clock::ClockTime, slot::PriceSlot, snapshot::PriceSnapshot};

/// Everything the conditions are evaluated against.
#[derive(Clone, Debug, derive_more::Constructor)]
pub struct Context<'a> {
    /// Full chronological series, spanning at least yesterday, today, and tomorrow.
    pub series: &'a [PriceSlot],

    pub snapshot: &'a PriceSnapshot,

    pub now: DateTime<Tz>,
}

/// Any of the supported conditions together with its arguments.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum Condition {
    AveragePrice {
        #[serde(default)]
        hours: Option<f64>,

        percentage: f64,

        #[serde(default)]
        below: bool,
    },

    PriceExtremes {
        #[serde(default)]
        hours: Option<f64>,

        #[serde(default)]
        ranked_slots: Option<usize>,

        #[serde(default)]
        lowest: bool,
    },

    LowestPricesWithinTimeFrame {
        ranked_slots: usize,
        start_time: ClockTime,
        end_time: ClockTime,
    },
}

impl Condition {
    #[must_use]
    pub fn evaluate(&self, sink: &dyn DiagnosticSink, context: &Context<'_>) -> bool {
        match *self {
            Self::AveragePrice { hours, percentage, below } => {
                average_price(sink, context, &AveragePriceOptions { hours, percentage }, below)
            }
            Self::PriceExtremes { hours, ranked_slots, lowest } => {
                price_extremes(sink, context, &PriceExtremesOptions { hours, ranked_slots }, lowest)
            }
            Self::LowestPricesWithinTimeFrame { ranked_slots, start_time, end_time } => {
                lowest_prices_within_time_frame(
                    sink,
                    context,
                    &LowestPricesWithinTimeFrameOptions { ranked_slots, start_time, end_time },
                )
            }
        }
    }
}
