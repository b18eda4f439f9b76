//! Call templates.

use decoy_report::TestContext;
use decoy_value::BoxedValue;

use crate::CallRecord;

/// A registered call template plus what to do when it matches.
///
/// Returned as `&mut Stub` from every registration method so behaviour can
/// be chained:
///
/// ```text
/// mock.expect(mock.call("valueForKey:", [key]))
///     .returning(BoxedValue::i32(42));
/// mock.accept(mock.call("setNeedsDisplay:", []))
///     .any_arguments();
/// ```
#[derive(Clone, Debug)]
pub struct Stub {
    call: CallRecord,
    any_arguments: bool,
    return_value: Option<BoxedValue>,
    exception: Option<BoxedValue>,
    hits: usize,
}

impl Stub {
    pub fn new(call: CallRecord) -> Self {
        Stub {
            call,
            any_arguments: false,
            return_value: None,
            exception: None,
            hits: 0,
        }
    }

    // === Builders ===

    /// Match any arguments, including a different argument count.
    pub fn any_arguments(&mut self) -> &mut Self {
        self.any_arguments = true;
        self
    }

    /// Value handed back to the caller on a match.
    pub fn returning(&mut self, value: BoxedValue) -> &mut Self {
        self.return_value = Some(value);
        self
    }

    /// Exception raised to the caller on a match, instead of returning.
    pub fn raising(&mut self, exception: BoxedValue) -> &mut Self {
        self.exception = Some(exception);
        self
    }

    // === Accessors ===

    #[inline]
    pub fn call(&self) -> &CallRecord {
        &self.call
    }

    #[inline]
    pub fn accepts_any_arguments(&self) -> bool {
        self.any_arguments
    }

    #[inline]
    pub fn return_value(&self) -> Option<&BoxedValue> {
        self.return_value.as_ref()
    }

    #[inline]
    pub fn exception(&self) -> Option<&BoxedValue> {
        self.exception.as_ref()
    }

    /// Number of calls this template has answered.
    #[inline]
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Whether this template answers `call`.
    pub fn matches(&self, call: &CallRecord, cx: &TestContext) -> bool {
        self.call.matches(call, self.any_arguments, cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TargetId;

    #[test]
    fn builders_chain() {
        let call = CallRecord::new(TargetId::fresh(), "count", []);
        let mut stub = Stub::new(call);
        stub.any_arguments()
            .returning(BoxedValue::u64(3))
            .raising(BoxedValue::nil());

        assert!(stub.accepts_any_arguments());
        assert_eq!(stub.return_value().and_then(BoxedValue::as_u64), Some(3));
        assert!(stub.exception().is_some());
        assert_eq!(stub.hits(), 0);
    }

    #[test]
    fn any_arguments_widens_match() {
        let cx = TestContext::silent();
        let target = TargetId::fresh();
        let mut stub = Stub::new(CallRecord::new(target, "add:", [BoxedValue::i32(1)]));
        let call = CallRecord::new(target, "add:", [BoxedValue::i32(2)]);
        assert!(!stub.matches(&call, &cx));
        stub.any_arguments();
        assert!(stub.matches(&call, &cx));
    }
}
