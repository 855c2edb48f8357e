//! EventDispatcher: synchronous event dispatch, free when empty.

use std::sync::Arc;

use super::handler::FixmarkEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn FixmarkEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn FixmarkEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler does not prevent later handlers from receiving the event.
    fn emit<F: Fn(&dyn FixmarkEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                ::tracing::error!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    pub fn emit_run_started(&self, event: &RunStartedEvent) {
        self.emit(|h| h.on_run_started(event));
    }

    pub fn emit_file_verified(&self, event: &FileVerifiedEvent) {
        self.emit(|h| h.on_file_verified(event));
    }

    pub fn emit_mismatch_found(&self, event: &MismatchFoundEvent) {
        self.emit(|h| h.on_mismatch_found(event));
    }

    pub fn emit_fixture_malformed(&self, event: &FixtureMalformedEvent) {
        self.emit(|h| h.on_fixture_malformed(event));
    }

    pub fn emit_file_errored(&self, event: &FileErroredEvent) {
        self.emit(|h| h.on_file_errored(event));
    }

    pub fn emit_run_complete(&self, event: &RunCompleteEvent) {
        self.emit(|h| h.on_run_complete(event));
    }
}
