pub trait TakeSigned {
    /// Take `n` items from the front, or `|n|` items from the back when `n` is negative.
    ///
    /// Takes everything when there are fewer items than requested.
    #[must_use]
    fn take_signed(&self, n: isize) -> &Self;
}

impl<T> TakeSigned for [T] {
    fn take_signed(&self, n: isize) -> &Self {
        let n_taken = n.unsigned_abs().min(self.len());
        if n < 0 { &self[self.len() - n_taken..] } else { &self[..n_taken] }
    }
}
