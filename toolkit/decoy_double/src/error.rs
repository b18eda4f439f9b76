//! Interception and verification errors.

use std::fmt;

use decoy_encoding::EncodingError;
use decoy_value::BoxedValue;
use thiserror::Error;

use crate::{Bucket, MethodId};

/// An expectation still outstanding at verification time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnmetExpectation {
    pub bucket: Bucket,
    pub method: MethodId,
    /// Rendered template, e.g. `setValue:(3)`.
    pub call: String,
}

impl fmt::Display for UnmetExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected call {} ({}) was never received",
            self.call,
            self.bucket.name()
        )
    }
}

/// Failure while intercepting or verifying calls.
#[derive(Clone, Debug, Error)]
pub enum DoubleError {
    /// The method was registered as rejected.
    #[error("{target} received rejected call {call}")]
    RejectedCall { target: String, call: String },

    /// No template matched and the mock does not accept by default.
    #[error("{target} received unexpected call {call}")]
    UnexpectedCall { target: String, call: String },

    /// A matching template was set up to raise.
    #[error("{method} raised {exception}")]
    Raised {
        method: MethodId,
        exception: BoxedValue,
    },

    /// The call does not fit the method's fixed signature.
    #[error("{call} does not match the signature of {method}: {detail}")]
    SignatureMismatch {
        method: MethodId,
        call: String,
        detail: String,
    },

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// One or more expectations were never met.
    #[error("{}", render_unmet(.0))]
    Unmet(Vec<UnmetExpectation>),
}

fn render_unmet(unmet: &[UnmetExpectation]) -> String {
    let mut out = format!("{} expectation(s) not met", unmet.len());
    for expectation in unmet {
        out.push_str("\n  ");
        out.push_str(&expectation.to_string());
    }
    out
}

impl DoubleError {
    #[cold]
    pub fn rejected(target: impl fmt::Display, call: impl fmt::Display) -> Self {
        DoubleError::RejectedCall {
            target: target.to_string(),
            call: call.to_string(),
        }
    }

    #[cold]
    pub fn unexpected(target: impl fmt::Display, call: impl fmt::Display) -> Self {
        DoubleError::UnexpectedCall {
            target: target.to_string(),
            call: call.to_string(),
        }
    }

    #[cold]
    pub fn signature_mismatch(
        method: &MethodId,
        call: impl fmt::Display,
        detail: impl Into<String>,
    ) -> Self {
        DoubleError::SignatureMismatch {
            method: method.clone(),
            call: call.to_string(),
            detail: detail.into(),
        }
    }
}
