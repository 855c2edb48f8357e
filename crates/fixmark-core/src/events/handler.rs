//! FixmarkEventHandler trait, all methods no-op by default.

use super::types::*;

/// Trait for observing a verification run.
///
/// Handlers only override the events they care about. `Send + Sync` because
/// file events are emitted from rayon worker threads.
pub trait FixmarkEventHandler: Send + Sync {
    fn on_run_started(&self, _event: &RunStartedEvent) {}
    fn on_file_verified(&self, _event: &FileVerifiedEvent) {}
    fn on_mismatch_found(&self, _event: &MismatchFoundEvent) {}
    fn on_fixture_malformed(&self, _event: &FixtureMalformedEvent) {}
    fn on_file_errored(&self, _event: &FileErroredEvent) {}
    fn on_run_complete(&self, _event: &RunCompleteEvent) {}
}
