//! Errors raised while parsing or measuring descriptors.

use thiserror::Error;

/// Failure to parse or lay out a type descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The input is not exactly one well-formed type.
    #[error("malformed type descriptor {input:?} (stopped at byte {position})")]
    MalformedDescriptor { input: String, position: usize },

    /// The type parses but has no defined size or alignment.
    #[error("invalid type `{descriptor}`: {reason}")]
    InvalidType {
        descriptor: String,
        reason: &'static str,
    },

    /// A method signature string could not be split into types.
    #[error("malformed method signature {input:?} (stopped at byte {position})")]
    MalformedSignature { input: String, position: usize },
}

impl EncodingError {
    #[cold]
    pub fn malformed(input: &str, position: usize) -> Self {
        EncodingError::MalformedDescriptor {
            input: input.to_string(),
            position,
        }
    }

    #[cold]
    pub fn invalid_type(descriptor: impl ToString, reason: &'static str) -> Self {
        EncodingError::InvalidType {
            descriptor: descriptor.to_string(),
            reason,
        }
    }

    #[cold]
    pub fn malformed_signature(input: &str, position: usize) -> Self {
        EncodingError::MalformedSignature {
            input: input.to_string(),
            position,
        }
    }
}
