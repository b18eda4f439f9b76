//! Reporting collaborator for the decoy toolkit.
//!
//! The core never formats console output. Everything it has to say (an
//! assertion passed, an assertion failed, a comparison needed a risky cast)
//! goes through a [`Reporter`] sink owned by the surrounding test harness.
//!
//! # Context
//!
//! [`TestContext`] is the explicitly threaded replacement for a process-wide
//! "current test run" singleton. It holds the reporter, the last source
//! location supplied by an assertion entry point, and a few run-wide
//! switches. It is a cheap `Arc` handle: mocks, adapter shims and the
//! comparison engine each keep or borrow a clone.
//!
//! # Tracing
//!
//! [`init_tracing`] installs a `tracing-subscriber` registry once, and only
//! when `RUST_LOG` is set. Enable with `RUST_LOG=decoy_double=debug`.

mod context;
mod location;
mod reporter;

pub use context::{RunSummary, TestContext};
pub use location::SourceLocation;
pub use reporter::{
    buffer_reporter, silent_reporter, tracing_reporter, BufferReporter, Report, ReportKind,
    Reporter, SharedReporter, SilentReporter, TracingReporter,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for decoy crates.
///
/// Safe to call multiple times. Only the first call does anything, and it
/// installs a subscriber only when `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // A subscriber installed by the host harness wins.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
