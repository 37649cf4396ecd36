mod aggregate;
mod rank;
mod take;

pub use self::{aggregate::Aggregate, rank::Rank, take::TakeSigned};
