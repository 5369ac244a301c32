//! Diagnostic sinks for validation failures.
//!
//! Validation never raises; it returns `false` and hands a human-readable
//! reason to a [`DiagnosticSink`]. Production code uses [`TracingSink`],
//! which forwards to `tracing::error!`. Tests use [`CapturingSink`] and
//! assert on what was reported.

use parking_lot::Mutex;
use tracing::error;

/// Receives one message per rejected transaction.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, message: &str);
}

/// Forwards diagnostics to the `tracing` subscriber at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, message: &str) {
        error!(target: "tally_protocol::validation", "{}", message);
    }
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct CapturingSink {
    messages: Mutex<Vec<String>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }
}

impl DiagnosticSink for CapturingSink {
    fn report(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capturing_sink_keeps_order() {
        let sink = CapturingSink::new();
        assert!(sink.is_empty());
        sink.report("first");
        sink.report("second");
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.messages(), vec!["first", "second"]);
    }

    #[test]
    fn tracing_sink_does_not_panic_without_subscriber() {
        TracingSink.report("nobody is listening");
    }
}
