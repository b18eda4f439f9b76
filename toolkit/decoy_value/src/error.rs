//! Value construction and comparison errors.

use decoy_encoding::{EncodingError, TypeDescriptor};
use thiserror::Error;

/// Failure to build a [`BoxedValue`](crate::BoxedValue).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("a `{descriptor}` value needs {expected} bytes, got {actual}")]
    BufferSize {
        descriptor: String,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Failure to compare two boxed values.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompareError {
    /// The two kinds cannot be compared at all.
    #[error("cannot compare `{lhs}` with `{rhs}`: {reason}")]
    TypeMismatch {
        lhs: String,
        rhs: String,
        reason: &'static str,
    },

    /// The values can be tested for equality but have no ordering.
    #[error("`{lhs}` and `{rhs}` have no ordering: {reason}")]
    InvalidComparison {
        lhs: String,
        rhs: String,
        reason: &'static str,
    },

    /// A value whose type cannot take part in any comparison.
    #[error("`{descriptor}` values cannot be compared")]
    InvalidType { descriptor: String },
}

impl CompareError {
    #[cold]
    pub fn type_mismatch(lhs: &TypeDescriptor, rhs: &TypeDescriptor, reason: &'static str) -> Self {
        CompareError::TypeMismatch {
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
            reason,
        }
    }

    #[cold]
    pub fn invalid_comparison(
        lhs: &TypeDescriptor,
        rhs: &TypeDescriptor,
        reason: &'static str,
    ) -> Self {
        CompareError::InvalidComparison {
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
            reason,
        }
    }

    #[cold]
    pub fn invalid_type(descriptor: &TypeDescriptor) -> Self {
        CompareError::InvalidType {
            descriptor: descriptor.to_string(),
        }
    }
}
