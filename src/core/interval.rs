use std::fmt::{Debug, Display, Formatter};

use chrono::{DateTime, Days, TimeZone};
use chrono_tz::Tz;

#[derive(Clone, Eq, PartialEq)]
#[must_use]
pub struct Interval<Z: TimeZone = Tz> {
    /// Inclusive.
    pub start: DateTime<Z>,

    /// Exclusive.
    pub end: DateTime<Z>,
}

impl<Z: TimeZone> Debug for Interval<Z> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl<Z: TimeZone> Display for Interval<Z>
where
    Z::Offset: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} and {}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

impl<Z: TimeZone> Interval<Z> {
    pub const fn new(start: DateTime<Z>, end: DateTime<Z>) -> Self {
        Self { start, end }
    }

    /// Whether the interval wraps over midnight, that is, its start is after its end.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Move the start `days` back, keeping the local wall-clock time.
    pub fn with_start_days_before(mut self, days: Days) -> Option<Self> {
        self.start = self.start.checked_sub_days(days)?;
        Some(self)
    }

    /// Move the end `days` forward, keeping the local wall-clock time.
    pub fn with_end_days_after(mut self, days: Days) -> Option<Self> {
        self.end = self.end.checked_add_days(days)?;
        Some(self)
    }

    #[must_use]
    pub fn contains<Z2: TimeZone>(&self, other: &DateTime<Z2>) -> bool {
        (self.start <= *other) && (*other < self.end)
    }
}
