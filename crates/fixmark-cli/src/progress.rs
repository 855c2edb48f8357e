//! Event handler that forwards verification progress to `tracing`.

use fixmark_core::events::{
    FileErroredEvent, FileVerifiedEvent, FixmarkEventHandler, FixtureMalformedEvent,
    MismatchFoundEvent, RunCompleteEvent, RunStartedEvent,
};

/// Logs run progress. Registered by the CLI on every `verify`.
pub struct TracingProgress;

impl FixmarkEventHandler for TracingProgress {
    fn on_run_started(&self, event: &RunStartedEvent) {
        tracing::info!(files = event.file_count, threads = event.threads, "verifying fixtures");
    }

    fn on_file_verified(&self, event: &FileVerifiedEvent) {
        tracing::debug!(
            path = %event.path.display(),
            passed = event.passed,
            matched = event.matched,
            mismatches = event.mismatches,
            "file verified"
        );
    }

    fn on_mismatch_found(&self, event: &MismatchFoundEvent) {
        tracing::debug!(
            path = %event.path.display(),
            kind = %event.kind,
            line = event.line,
            "{}",
            event.message
        );
    }

    fn on_fixture_malformed(&self, event: &FixtureMalformedEvent) {
        tracing::warn!(
            path = %event.path.display(),
            line = event.line,
            "malformed fixture: {}",
            event.message
        );
    }

    fn on_file_errored(&self, event: &FileErroredEvent) {
        tracing::error!(
            path = %event.path.display(),
            code = event.code,
            "{}",
            event.message
        );
    }

    fn on_run_complete(&self, event: &RunCompleteEvent) {
        tracing::info!(
            files = event.files,
            passed = event.passed,
            failed = event.failed,
            errored = event.errored,
            duration_ms = event.duration_ms,
            "run complete"
        );
    }
}
