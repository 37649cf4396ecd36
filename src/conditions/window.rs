use std::fmt::{Display, Formatter};

use chrono::{DateTime, TimeZone};

use crate::{
    core::slot::{PriceSlot, SLOTS_PER_HOUR},
    ops::TakeSigned,
};

/// How slots starting exactly at the reference instant are treated.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Bound {
    Exclusive,
    Inclusive,
}

/// Window relative to «now», used in diagnostics.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RelativeHours(pub Option<f64>);

impl Display for RelativeHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            None => write!(f, "today"),
            Some(hours) if hours < 0.0 => write!(f, "the previous {} hours", -hours),
            Some(hours) => write!(f, "the next {hours} hours"),
        }
    }
}

/// Select the slots of the window.
///
/// Without `hours`, this is the whole of `today`. A positive `hours` selects the slots after
/// the reference, and a negative one selects the slots before it, up to `|hours|` hours
/// in both cases. Fractional hours select whole slots, rounding towards zero.
#[must_use]
pub fn select_window<Z: TimeZone>(
    series: &[PriceSlot],
    today: &[PriceSlot],
    reference: &DateTime<Z>,
    hours: Option<f64>,
    bound: Bound,
) -> Vec<PriceSlot> {
    let Some(hours) = hours else {
        return today.to_vec();
    };
    let is_ahead = hours > 0.0;
    let candidates: Vec<PriceSlot> = series
        .iter()
        .filter(|slot| match (is_ahead, bound) {
            (true, Bound::Exclusive) => slot.starts_at > *reference,
            (true, Bound::Inclusive) => slot.starts_at >= *reference,
            (false, Bound::Exclusive) => slot.starts_at < *reference,
            (false, Bound::Inclusive) => slot.starts_at <= *reference,
        })
        .copied()
        .collect();
    #[expect(clippy::cast_possible_truncation)]
    let n_slots = (hours * f64::from(SLOTS_PER_HOUR)).trunc() as isize;
    candidates.take_signed(n_slots).to_vec()
}
