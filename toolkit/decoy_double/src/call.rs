//! Recorded calls.

use std::fmt;

use decoy_report::TestContext;
use decoy_value::{is_equal, BoxedValue};
use smallvec::SmallVec;

use crate::{MethodId, TargetId};

/// Argument list; most methods take a handful of arguments.
pub type Arguments = SmallVec<[BoxedValue; 4]>;

/// A single message send: target, method and boxed arguments.
///
/// The same type serves as the template registered with a mock and as the
/// record of a call the mock actually received.
#[derive(Clone, Debug)]
pub struct CallRecord {
    target: TargetId,
    method: MethodId,
    arguments: Arguments,
}

impl CallRecord {
    pub fn new(
        target: TargetId,
        method: impl Into<MethodId>,
        arguments: impl IntoIterator<Item = BoxedValue>,
    ) -> Self {
        CallRecord {
            target,
            method: method.into(),
            arguments: arguments.into_iter().collect(),
        }
    }

    #[inline]
    pub fn target(&self) -> TargetId {
        self.target
    }

    #[inline]
    pub fn method(&self) -> &MethodId {
        &self.method
    }

    #[inline]
    pub fn arguments(&self) -> &[BoxedValue] {
        &self.arguments
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// Whether `call` has the same method and, unless `any_arguments`, the
    /// same number of arguments with each pair equal.
    ///
    /// An argument pair that cannot be compared counts as unequal.
    pub fn matches(&self, call: &CallRecord, any_arguments: bool, cx: &TestContext) -> bool {
        if self.method != call.method {
            return false;
        }
        if any_arguments {
            return true;
        }
        if self.arity() != call.arity() {
            return false;
        }
        self.arguments
            .iter()
            .zip(call.arguments.iter())
            .all(|(expected, actual)| match is_equal(expected, actual, cx) {
                Ok(equal) => equal,
                Err(error) => {
                    tracing::debug!(method = %self.method, %error, "argument not comparable");
                    false
                }
            })
    }
}

impl fmt::Display for CallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.method)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{argument}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(method: &str, args: Vec<BoxedValue>) -> CallRecord {
        CallRecord::new(TargetId::fresh(), method, args)
    }

    #[test]
    fn display_lists_arguments() {
        let call = record(
            "setValue:forKey:",
            vec![BoxedValue::i32(3), BoxedValue::c_string(Some("k"))],
        );
        assert_eq!(call.to_string(), "setValue:forKey:(3, \"k\")");
    }

    #[test]
    fn matching_ignores_target() {
        let cx = TestContext::silent();
        let a = record("value", vec![]);
        let b = record("value", vec![]);
        assert_ne!(a.target(), b.target());
        assert!(a.matches(&b, false, &cx));
    }

    #[test]
    fn matching_compares_arguments_by_value() {
        let cx = TestContext::silent();
        let template = record("add:", vec![BoxedValue::i64(2)]);
        assert!(template.matches(&record("add:", vec![BoxedValue::u8(2)]), false, &cx));
        assert!(!template.matches(&record("add:", vec![BoxedValue::u8(3)]), false, &cx));
        assert!(!template.matches(&record("add:", vec![]), false, &cx));
        assert!(template.matches(&record("add:", vec![]), true, &cx));
        assert!(!template.matches(&record("sub:", vec![BoxedValue::i64(2)]), true, &cx));
    }

    #[test]
    fn incomparable_argument_is_no_match() {
        let cx = TestContext::silent();
        let template = record("set:", vec![BoxedValue::nil()]);
        assert!(!template.matches(&record("set:", vec![BoxedValue::i32(7)]), false, &cx));
        assert!(template.matches(&record("set:", vec![BoxedValue::i32(0)]), false, &cx));
    }
}
