//! Trigger conditions for automations driven by quarter-hourly electricity prices.
//!
//! Every condition is a pure function of the price series, a [`core::snapshot::PriceSnapshot`],
//! and «now», and explains its decision through a [`conditions::DiagnosticSink`].

pub mod conditions;
pub mod core;
pub mod ops;
pub mod prelude;
pub mod quantity;
pub mod rules;
