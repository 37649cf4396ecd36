pub mod clock;
#[cfg(test)]
pub mod fixtures;
pub mod interval;
pub mod series;
pub mod slot;
pub mod snapshot;
