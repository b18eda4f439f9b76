//! Run-wide test context.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::reporter::{buffer_reporter, silent_reporter, BufferReporter, SharedReporter};
use crate::SourceLocation;

/// Counts of events routed through a [`TestContext`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

struct ContextState {
    reporter: SharedReporter,
    last_location: Mutex<Option<SourceLocation>>,
    warns_about_sign_comparisons: AtomicBool,
    passed: AtomicUsize,
    failed: AtomicUsize,
    warnings: AtomicUsize,
}

/// Handle to the current test run.
///
/// Cloning is cheap and every clone observes the same state. Assertion entry
/// points call [`cache_location`](Self::cache_location) before doing any work
/// so that events raised deeper in the stack (for example a sign-comparison
/// warning from the comparison engine) can be attributed to the assertion.
#[derive(Clone)]
pub struct TestContext {
    state: Arc<ContextState>,
}

impl TestContext {
    /// Create a context that routes events to `reporter`.
    pub fn new(reporter: SharedReporter) -> Self {
        TestContext {
            state: Arc::new(ContextState {
                reporter,
                last_location: Mutex::new(None),
                warns_about_sign_comparisons: AtomicBool::new(true),
                passed: AtomicUsize::new(0),
                failed: AtomicUsize::new(0),
                warnings: AtomicUsize::new(0),
            }),
        }
    }

    /// Context backed by a fresh [`BufferReporter`], returned alongside it.
    pub fn buffered() -> (Self, Arc<BufferReporter>) {
        let buffer = buffer_reporter();
        let context = TestContext::new(buffer.clone());
        (context, buffer)
    }

    /// Context that discards every event but still counts them.
    pub fn silent() -> Self {
        TestContext::new(silent_reporter())
    }

    pub fn reporter(&self) -> &SharedReporter {
        &self.state.reporter
    }

    // === Location cache ===

    /// Remember `location` as the most recent assertion call site.
    pub fn cache_location(&self, location: SourceLocation) {
        *self.state.last_location.lock() = Some(location);
    }

    /// The most recently cached call site, if any.
    pub fn last_location(&self) -> Option<SourceLocation> {
        self.state.last_location.lock().clone()
    }

    // === Switches ===

    /// Whether numeric comparisons that convert a signed operand to unsigned
    /// emit a warning. Defaults to `true`.
    pub fn warns_about_sign_comparisons(&self) -> bool {
        self.state
            .warns_about_sign_comparisons
            .load(Ordering::Relaxed)
    }

    pub fn set_warns_about_sign_comparisons(&self, enabled: bool) {
        self.state
            .warns_about_sign_comparisons
            .store(enabled, Ordering::Relaxed);
    }

    // === Events ===

    /// Report a passing assertion at `location`.
    pub fn pass(&self, message: &str, location: Option<&SourceLocation>) {
        self.state.passed.fetch_add(1, Ordering::Relaxed);
        self.state.reporter.report_pass(message, location);
    }

    /// Report a failure at `location`.
    pub fn fail(&self, message: &str, location: Option<&SourceLocation>) {
        self.state.failed.fetch_add(1, Ordering::Relaxed);
        self.state.reporter.report_failure(message, location);
    }

    /// Report a warning at `location`.
    pub fn warn(&self, message: &str, location: Option<&SourceLocation>) {
        self.state.warnings.fetch_add(1, Ordering::Relaxed);
        self.state.reporter.report_warning(message, location);
    }

    /// Report a failure at the last cached location.
    pub fn fail_at_last_location(&self, message: &str) {
        let location = self.last_location();
        self.fail(message, location.as_ref());
    }

    /// Report a warning at the last cached location.
    pub fn warn_at_last_location(&self, message: &str) {
        let location = self.last_location();
        self.warn(message, location.as_ref());
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            passed: self.state.passed.load(Ordering::Relaxed),
            failed: self.state.failed.load(Ordering::Relaxed),
            warnings: self.state.warnings.load(Ordering::Relaxed),
        }
    }
}

impl fmt::Debug for TestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestContext")
            .field("last_location", &self.last_location())
            .field("summary", &self.summary())
            .finish_non_exhaustive()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        TestContext::silent()
    }
}
