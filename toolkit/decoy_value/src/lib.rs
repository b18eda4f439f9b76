//! Boxed runtime-typed values and their comparison engine.
//!
//! [`BoxedValue`] carries any value the object runtime can pass around
//! (numbers of every width and signedness, objects, selectors, C strings,
//! pointers, arrays and structs) together with its
//! [`TypeDescriptor`](decoy_encoding::TypeDescriptor). [`is_equal`] and
//! [`compare`] then compare two such values without per-type code, applying
//! C's usual arithmetic conversions to numbers and the runtime's equality
//! hooks to objects.
//!
//! Comparisons take the [`TestContext`](decoy_report::TestContext) so that a
//! risky signed/unsigned conversion can be reported as a warning at the
//! assertion that triggered it.

mod boxed;
mod compare;
mod error;
pub mod numeric;
pub mod object;

pub use boxed::BoxedValue;
pub use compare::{compare, is_equal, is_within};
pub use error::{CompareError, ValueError};
pub use numeric::Numeric;
pub use object::{ObjectRef, RuntimeObject};
