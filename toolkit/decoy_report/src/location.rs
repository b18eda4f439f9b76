//! Source locations supplied by assertion entry points.

use std::fmt;
use std::sync::Arc;

/// A `(file, line)` pair identifying the call site of an assertion.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    file: Arc<str>,
    line: u32,
}

impl SourceLocation {
    /// Create a location from a file path and a 1-based line number.
    pub fn new(file: impl Into<Arc<str>>, line: u32) -> Self {
        SourceLocation {
            file: file.into(),
            line,
        }
    }

    /// The file path as given by the caller.
    #[inline]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The 1-based line number.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Capture the current call site as a [`SourceLocation`].
#[macro_export]
macro_rules! location {
    () => {
        $crate::SourceLocation::new(file!(), line!())
    };
}
