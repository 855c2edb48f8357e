//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the fixmark tracing/logging system.
///
/// Reads `FIXMARK_LOG` for per-module log levels, e.g.
/// `FIXMARK_LOG=fixmark_analysis::runner=debug,fixmark_core=warn`.
/// Falls back to `fixmark=info` if unset or invalid. Output goes to stderr so
/// machine-readable reports on stdout stay clean.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("FIXMARK_LOG")
            .unwrap_or_else(|_| EnvFilter::new("fixmark=info"));

        // A subscriber installed by the host (e.g. a test harness) wins.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
