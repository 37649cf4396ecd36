use itertools::Itertools;

impl<T> Rank for T where T: Iterator {}

pub trait Rank: Iterator + Sized {
    /// Position of the first item matching `is_target` after a stable ascending sort by `key`.
    ///
    /// Items with equal keys keep their original relative order.
    #[must_use]
    fn rank_by_key<K: Ord>(
        self,
        key: impl FnMut(&Self::Item) -> K,
        is_target: impl FnMut(Self::Item) -> bool,
    ) -> Option<usize> {
        self.sorted_by_key(key).position(is_target)
    }
}
