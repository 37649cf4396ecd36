use crate::prelude::*;

/// Receiver of human-readable explanations of why a condition is or is not met.
pub trait DiagnosticSink {
    fn log(&self, message: &str);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&str),
{
    fn log(&self, message: &str) {
        self(message);
    }
}

/// Forwards the diagnostics to the `tracing` subscriber.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, message: &str) {
        info!("{message}");
    }
}

/// Discards everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn log(&self, _message: &str) {}
}
