//! decoy: mock objects, stubs and runtime-typed value assertions.
//!
//! This crate bundles the decoy toolkit behind one dependency:
//!
//! - [`encoding`]: type descriptor parsing and ABI layout
//! - [`value`]: boxed values and the comparison engine
//! - [`double`]: mocks, call templates and verification
//! - [`report`]: the reporter sink and [`TestContext`]
//! - [`check`]: assertion entry points (`check_equal!`, `check_less!`, ...)
//!
//! # Mocking a trait
//!
//! Code under test talks to a trait. The test implements that trait with a
//! thin shim forwarding every method to [`Mock::invoke`]:
//!
//! ```text
//! struct DataSourceShim(Mock);
//!
//! impl DataSource for DataSourceShim {
//!     fn row_count(&mut self) -> Result<i64, DoubleError> {
//!         let value = self.0.invoke("numberOfRows", [])?;
//!         Ok(value.and_then(|v| v.as_i64()).unwrap_or_default())
//!     }
//! }
//!
//! let cx = TestContext::buffered().0;
//! let mut mock = Mock::for_protocol("DataSource", cx);
//! mock.expect(call!(mock, "numberOfRows")).returning(BoxedValue::i64(3));
//! ```

pub mod check;
mod into_boxed;

pub use decoy_double as double;
pub use decoy_encoding as encoding;
pub use decoy_report as report;
pub use decoy_value as value;

pub use decoy_double::{
    Bucket, CallRecord, DoubleError, MatchOutcome, MethodId, Mock, MockTarget, Stub,
    UnmetExpectation,
};
pub use decoy_encoding::{parse, EncodingError, Kind, TypeDescriptor};
pub use decoy_report::{init_tracing, location, SourceLocation, TestContext};
pub use decoy_value::{BoxedValue, CompareError, ObjectRef, RuntimeObject};
pub use into_boxed::IntoBoxed;

/// Build a [`CallRecord`] addressed to `mock`, boxing each argument with
/// [`IntoBoxed`].
///
/// ```text
/// mock.accept(call!(mock, "setValue:forKey:", 3, "width"));
/// ```
#[macro_export]
macro_rules! call {
    ($mock:expr, $method:expr $(, $arg:expr)* $(,)?) => {
        $mock.call(
            $method,
            [$($crate::IntoBoxed::into_boxed($arg)),*],
        )
    };
}
