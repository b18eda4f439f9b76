//! Runtime type descriptors for decoy.
//!
//! A type descriptor is the compact string a dynamically-dispatched object
//! runtime uses to describe a value's C type: `i` for `int`, `^{Point=dd}`
//! for a pointer to a struct of two doubles, `[16c]` for a char array, and
//! so on. This crate parses those strings into an immutable
//! [`TypeDescriptor`] tree and computes sizes and alignments under the LP64
//! ABI.
//!
//! # Modules
//!
//! - [`descriptor`]: the tree (`Kind`, `IntWidth`, `TypeDescriptor`)
//! - [`qualifiers`]: method-argument qualifiers (`const`, `in`, `out`, ...)
//! - [`scanner`]: the recursive-descent parser
//! - [`layout`]: size and alignment
//! - [`signature`]: full method signature strings such as `v24@0:8@16`
//! - [`cache`]: parse-once memoization shared across mocks
//!
//! # Usage
//!
//! ```text
//! let desc = decoy_encoding::parse("{CGPoint=dd}")?;
//! assert_eq!(desc.standalone_size()?, 16);
//! ```

pub mod cache;
pub mod descriptor;
mod error;
pub mod layout;
pub mod qualifiers;
pub mod scanner;
pub mod signature;

pub use cache::DescriptorCache;
pub use descriptor::{IntWidth, Kind, TypeDescriptor};
pub use error::EncodingError;
pub use layout::{alignment, embedded_size, layout, standalone_size, Layout};
pub use qualifiers::Qualifiers;
pub use scanner::{parse, parse_prefix, Scanner};
pub use signature::MethodSignature;
