//! Reporter sinks.
//!
//! Each sink implements [`Reporter`]. The harness picks one when it builds
//! its [`TestContext`](crate::TestContext):
//! - [`BufferReporter`] collects reports for later inspection (tests, IDE runners)
//! - [`TracingReporter`] forwards to `tracing` events
//! - [`SilentReporter`] drops everything

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::SourceLocation;

/// Receiver of pass, failure and warning events.
pub trait Reporter: Send + Sync {
    /// An assertion held.
    fn report_pass(&self, message: &str, location: Option<&SourceLocation>);

    /// An assertion failed, or a mock detected a contract violation.
    fn report_failure(&self, message: &str, location: Option<&SourceLocation>);

    /// Something suspicious happened that does not fail the test.
    fn report_warning(&self, message: &str, location: Option<&SourceLocation>);
}

/// Shared reporter handle.
pub type SharedReporter = Arc<dyn Reporter>;

/// Severity of a recorded report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Pass,
    Failure,
    Warning,
}

impl ReportKind {
    /// Lowercase label used in rendered output.
    pub const fn label(self) -> &'static str {
        match self {
            ReportKind::Pass => "pass",
            ReportKind::Failure => "failure",
            ReportKind::Warning => "warning",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single recorded event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub kind: ReportKind,
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{loc}: {}: {}", self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

// === Buffer ===

/// Reporter that records every event in memory.
#[derive(Default)]
pub struct BufferReporter {
    reports: Mutex<Vec<Report>>,
}

impl BufferReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, kind: ReportKind, message: &str, location: Option<&SourceLocation>) {
        self.reports.lock().push(Report {
            kind,
            message: message.to_string(),
            location: location.cloned(),
        });
    }

    /// Snapshot of everything recorded so far.
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().clone()
    }

    /// Recorded reports of one kind, in arrival order.
    pub fn of_kind(&self, kind: ReportKind) -> Vec<Report> {
        self.reports
            .lock()
            .iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect()
    }

    pub fn failures(&self) -> Vec<Report> {
        self.of_kind(ReportKind::Failure)
    }

    pub fn warnings(&self) -> Vec<Report> {
        self.of_kind(ReportKind::Warning)
    }

    pub fn passes(&self) -> Vec<Report> {
        self.of_kind(ReportKind::Pass)
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<Report> {
        std::mem::take(&mut *self.reports.lock())
    }

    pub fn clear(&self) {
        self.reports.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }
}

impl fmt::Debug for BufferReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferReporter")
            .field("reports", &self.reports.lock().len())
            .finish()
    }
}

impl Reporter for BufferReporter {
    fn report_pass(&self, message: &str, location: Option<&SourceLocation>) {
        self.push(ReportKind::Pass, message, location);
    }

    fn report_failure(&self, message: &str, location: Option<&SourceLocation>) {
        self.push(ReportKind::Failure, message, location);
    }

    fn report_warning(&self, message: &str, location: Option<&SourceLocation>) {
        self.push(ReportKind::Warning, message, location);
    }
}

// === Tracing ===

/// Reporter that emits `tracing` events under the `decoy::report` target.
#[derive(Default, Debug, Clone, Copy)]
pub struct TracingReporter;

fn render(location: Option<&SourceLocation>) -> String {
    location.map_or_else(String::new, ToString::to_string)
}

impl Reporter for TracingReporter {
    fn report_pass(&self, message: &str, location: Option<&SourceLocation>) {
        tracing::debug!(target: "decoy::report", location = %render(location), "{message}");
    }

    fn report_failure(&self, message: &str, location: Option<&SourceLocation>) {
        tracing::error!(target: "decoy::report", location = %render(location), "{message}");
    }

    fn report_warning(&self, message: &str, location: Option<&SourceLocation>) {
        tracing::warn!(target: "decoy::report", location = %render(location), "{message}");
    }
}

// === Silent ===

/// Reporter that discards everything.
#[derive(Default, Debug, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report_pass(&self, _message: &str, _location: Option<&SourceLocation>) {}
    fn report_failure(&self, _message: &str, _location: Option<&SourceLocation>) {}
    fn report_warning(&self, _message: &str, _location: Option<&SourceLocation>) {}
}

// === Factories ===

pub fn buffer_reporter() -> Arc<BufferReporter> {
    Arc::new(BufferReporter::new())
}

pub fn tracing_reporter() -> SharedReporter {
    Arc::new(TracingReporter)
}

pub fn silent_reporter() -> SharedReporter {
    Arc::new(SilentReporter)
}
