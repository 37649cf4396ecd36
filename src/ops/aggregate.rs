use std::ops::{Add, Div};

impl<T> Aggregate for T where T: Iterator {}

pub trait Aggregate: Iterator + Sized {
    /// Arithmetic mean, or `None` when there is nothing to average.
    #[must_use]
    fn mean(self) -> Option<Self::Item>
    where
        Self::Item: Add<Output = Self::Item> + Div<f64, Output = Self::Item>,
    {
        let mut n_values = 0_u32;
        let sum = self.inspect(|_| n_values += 1).reduce(|sum, value| sum + value)?;
        Some(sum / f64::from(n_values))
    }

    /// The first item with the smallest key.
    #[must_use]
    fn first_min_by_key<K: Ord>(self, mut key: impl FnMut(&Self::Item) -> K) -> Option<Self::Item> {
        self.reduce(|best, item| if key(&item) < key(&best) { item } else { best })
    }

    /// The first item with the largest key.
    ///
    /// Unlike [`Iterator::max_by_key`], ties resolve to the earliest item.
    #[must_use]
    fn first_max_by_key<K: Ord>(self, mut key: impl FnMut(&Self::Item) -> K) -> Option<Self::Item> {
        self.reduce(|best, item| if key(&item) > key(&best) { item } else { best })
    }
}
