//! Call interception and expectations for decoy mocks.
//!
//! A [`Mock`] receives [`CallRecord`]s through [`Mock::intercept`] (or the
//! shim-friendly [`Mock::invoke`]) and answers them from its
//! [`ExpectationSet`]: six buckets of [`Stub`] templates searched in a fixed
//! precedence order. Arguments are matched by value with
//! [`decoy_value::is_equal`], so a template registered with an `int` matches
//! a call carrying the same number as a `long long`.
//!
//! ```text
//! let mut mock = Mock::for_protocol("DataSource", cx);
//! mock.expect(mock.call("numberOfRows", [])).returning(BoxedValue::i64(3));
//! let rows = mock.invoke("numberOfRows", [])?;
//! assert!(mock.verify().is_empty());
//! ```

mod call;
mod error;
pub mod expectations;
mod method;
mod mock;
mod stub;

pub use call::{Arguments, CallRecord};
pub use error::{DoubleError, UnmetExpectation};
pub use expectations::{Bucket, Dispatch, ExpectationSet};
pub use method::{MethodId, TargetId};
pub use mock::{MatchOutcome, Mock, MockTarget};
pub use stub::Stub;
