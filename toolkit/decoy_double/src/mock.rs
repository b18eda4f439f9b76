//! Mock objects.
//!
//! A [`Mock`] stands in for an object, a class or a protocol conformer. Test
//! code registers call templates in its expectation buckets, hands the mock
//! to the code under test through a trait shim, and verifies at the end that
//! every expectation was met.

use std::fmt;
use std::sync::Arc;

use decoy_encoding::{Kind, MethodSignature, TypeDescriptor};
use decoy_report::TestContext;
use decoy_value::BoxedValue;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::expectations::Dispatch;
use crate::{
    Bucket, CallRecord, DoubleError, ExpectationSet, MethodId, Stub, TargetId, UnmetExpectation,
};

/// Argument kinds of a method, receiver and selector excluded.
type ArgumentKinds = SmallVec<[TypeDescriptor; 4]>;

/// What the mock stands in for. Used only in messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockTarget {
    /// An instance of `class`.
    Object { class: Arc<str> },
    /// The class object itself, for class-method mocks.
    Class { class: Arc<str> },
    /// Any object conforming to protocol `name`.
    Protocol { name: Arc<str> },
}

impl fmt::Display for MockTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MockTarget::Object { class } => write!(f, "mock {class}"),
            MockTarget::Class { class } => write!(f, "mock class {class}"),
            MockTarget::Protocol { name } => write!(f, "mock <{name}>"),
        }
    }
}

/// Successful interception.
#[derive(Clone, Debug)]
pub enum MatchOutcome {
    /// A template answered; `return_value` is its canned value, if any.
    Matched {
        bucket: Bucket,
        return_value: Option<BoxedValue>,
    },
    /// Nothing matched but the mock accepts every call.
    AcceptedByDefault,
}

impl MatchOutcome {
    pub fn return_value(&self) -> Option<&BoxedValue> {
        match self {
            MatchOutcome::Matched { return_value, .. } => return_value.as_ref(),
            MatchOutcome::AcceptedByDefault => None,
        }
    }

    pub fn into_return_value(self) -> Option<BoxedValue> {
        match self {
            MatchOutcome::Matched { return_value, .. } => return_value,
            MatchOutcome::AcceptedByDefault => None,
        }
    }

    pub fn bucket(&self) -> Option<Bucket> {
        match self {
            MatchOutcome::Matched { bucket, .. } => Some(*bucket),
            MatchOutcome::AcceptedByDefault => None,
        }
    }
}

/// A test double recording every call it receives.
///
/// Dropping the mock reports each unmet expectation as a failure through its
/// [`TestContext`], unless [`verify`](Mock::verify) was called after the last
/// registration.
pub struct Mock {
    id: TargetId,
    target: MockTarget,
    cx: TestContext,
    expectations: ExpectationSet,
    signatures: FxHashMap<MethodId, ArgumentKinds>,
    strict_arguments: bool,
    history: Vec<CallRecord>,
    verified: bool,
}

impl Mock {
    pub fn new(target: MockTarget, cx: TestContext) -> Self {
        let id = TargetId::fresh();
        tracing::debug!(%id, mock = %target, "mock created");
        Mock {
            id,
            target,
            cx,
            expectations: ExpectationSet::new(),
            signatures: FxHashMap::default(),
            strict_arguments: false,
            history: Vec::new(),
            verified: false,
        }
    }

    pub fn for_object(class: &str, cx: TestContext) -> Self {
        Self::new(MockTarget::Object { class: class.into() }, cx)
    }

    pub fn for_class(class: &str, cx: TestContext) -> Self {
        Self::new(MockTarget::Class { class: class.into() }, cx)
    }

    pub fn for_protocol(name: &str, cx: TestContext) -> Self {
        Self::new(MockTarget::Protocol { name: name.into() }, cx)
    }

    #[inline]
    pub fn id(&self) -> TargetId {
        self.id
    }

    #[inline]
    pub fn target(&self) -> &MockTarget {
        &self.target
    }

    #[inline]
    pub fn context(&self) -> &TestContext {
        &self.cx
    }

    #[inline]
    pub fn expectations(&self) -> &ExpectationSet {
        &self.expectations
    }

    /// A call addressed to this mock, for registration or interception.
    pub fn call(
        &self,
        method: impl Into<MethodId>,
        arguments: impl IntoIterator<Item = BoxedValue>,
    ) -> CallRecord {
        CallRecord::new(self.id, method, arguments)
    }

    // === Registration ===

    /// Any call to the method fails, whatever its arguments.
    pub fn reject(&mut self, call: CallRecord) -> &mut Stub {
        self.register(Bucket::Rejected, call)
    }

    /// Must be received once, after every earlier in-order expectation.
    pub fn expect_in_order(&mut self, call: CallRecord) -> &mut Stub {
        self.register(Bucket::ExpectedInOrder, call)
    }

    /// Must be received exactly once, in any order.
    pub fn expect_once(&mut self, call: CallRecord) -> &mut Stub {
        self.register(Bucket::ExpectedOnce, call)
    }

    /// Must be received at least once.
    pub fn expect(&mut self, call: CallRecord) -> &mut Stub {
        self.register(Bucket::Expected, call)
    }

    /// May be received once.
    pub fn accept_once(&mut self, call: CallRecord) -> &mut Stub {
        self.register(Bucket::AcceptedOnce, call)
    }

    /// May be received any number of times.
    pub fn accept(&mut self, call: CallRecord) -> &mut Stub {
        self.register(Bucket::Accepted, call)
    }

    fn register(&mut self, bucket: Bucket, call: CallRecord) -> &mut Stub {
        tracing::debug!(mock = %self.target, %bucket, %call, "registered");
        self.verified = false;
        self.expectations.register(bucket, call)
    }

    /// Drop every registered template. History and fixed signatures stay.
    pub fn clear(&mut self) {
        tracing::debug!(mock = %self.target, "expectations cleared");
        self.verified = false;
        self.expectations.clear();
    }

    pub fn set_accepts_by_default(&mut self, accepts: bool) {
        self.expectations.set_accepts_by_default(accepts);
    }

    /// Reject calls whose argument kinds differ from the method signature.
    pub fn set_strict_arguments(&mut self, strict: bool) {
        self.strict_arguments = strict;
    }

    /// Fix the signature of `method` from a full method type string such as
    /// `v24@0:8@16`.
    pub fn register_signature(
        &mut self,
        method: impl Into<MethodId>,
        signature: &str,
    ) -> Result<(), DoubleError> {
        let signature = MethodSignature::parse(signature)?;
        let kinds = signature.explicit_arguments().iter().cloned().collect();
        self.signatures.insert(method.into(), kinds);
        Ok(())
    }

    // === Interception ===

    /// Resolve a received call against the expectation buckets.
    pub fn intercept(&mut self, call: &CallRecord) -> Result<MatchOutcome, DoubleError> {
        self.history.push(call.clone());
        self.check_signature(call)?;

        match self.expectations.dispatch(call, &self.cx) {
            Dispatch::Rejected => {
                tracing::debug!(mock = %self.target, %call, "rejected");
                Err(DoubleError::rejected(&self.target, call))
            }
            Dispatch::Delivered { bucket, stub } => {
                tracing::debug!(mock = %self.target, %call, %bucket, "matched");
                if let Some(exception) = stub.exception() {
                    return Err(DoubleError::Raised {
                        method: call.method().clone(),
                        exception: exception.clone(),
                    });
                }
                Ok(MatchOutcome::Matched {
                    bucket,
                    return_value: stub.return_value().cloned(),
                })
            }
            Dispatch::AcceptedByDefault => {
                tracing::debug!(mock = %self.target, %call, "accepted by default");
                Ok(MatchOutcome::AcceptedByDefault)
            }
            Dispatch::Unexpected => {
                tracing::debug!(mock = %self.target, %call, "unexpected");
                Err(DoubleError::unexpected(&self.target, call))
            }
        }
    }

    /// Intercept `method(arguments)` and hand back the canned return value.
    ///
    /// This is the entry point for trait shims: each shim method forwards
    /// here and converts the result.
    pub fn invoke(
        &mut self,
        method: impl Into<MethodId>,
        arguments: impl IntoIterator<Item = BoxedValue>,
    ) -> Result<Option<BoxedValue>, DoubleError> {
        let call = self.call(method, arguments);
        self.intercept(&call).map(MatchOutcome::into_return_value)
    }

    fn check_signature(&mut self, call: &CallRecord) -> Result<(), DoubleError> {
        let expectations = &self.expectations;
        let kinds = self
            .signatures
            .entry(call.method().clone())
            .or_insert_with(|| infer_signature(expectations, call));

        if kinds.len() != call.arity() {
            return Err(DoubleError::signature_mismatch(
                call.method(),
                call,
                format!(
                    "expected {} argument(s), received {}",
                    kinds.len(),
                    call.arity()
                ),
            ));
        }
        if !self.strict_arguments {
            return Ok(());
        }
        for (index, (expected, argument)) in kinds.iter().zip(call.arguments()).enumerate() {
            if !fits(expected, argument) {
                return Err(DoubleError::signature_mismatch(
                    call.method(),
                    call,
                    format!(
                        "argument {index} has type {}, expected {expected}",
                        argument.descriptor()
                    ),
                ));
            }
        }
        Ok(())
    }

    // === Verification ===

    /// Every call received so far, in order.
    pub fn received(&self) -> &[CallRecord] {
        &self.history
    }

    pub fn received_count(&self, method: &str) -> usize {
        self.history
            .iter()
            .filter(|call| call.method().name() == method)
            .count()
    }

    /// Expectations not yet met. Marks the mock as verified, so dropping it
    /// reports nothing until another template is registered.
    pub fn verify(&mut self) -> Vec<UnmetExpectation> {
        self.verified = true;
        self.expectations.unmet()
    }

    pub fn verify_or_err(&mut self) -> Result<(), DoubleError> {
        let unmet = self.verify();
        if unmet.is_empty() {
            Ok(())
        } else {
            Err(DoubleError::Unmet(unmet))
        }
    }
}

/// Argument kinds from the first template that pins its arguments, else
/// from the call itself.
fn infer_signature(expectations: &ExpectationSet, call: &CallRecord) -> ArgumentKinds {
    let source = expectations
        .templates()
        .map(|(_, stub)| stub)
        .find(|stub| stub.call().method() == call.method() && !stub.accepts_any_arguments())
        .map_or(call, Stub::call);
    source
        .arguments()
        .iter()
        .map(|argument| argument.descriptor().clone())
        .collect()
}

/// Whether `argument` may be passed where `expected` is declared.
///
/// A literal integer zero fits any pointer-like parameter.
fn fits(expected: &TypeDescriptor, argument: &BoxedValue) -> bool {
    let actual = argument.descriptor();
    if expected.same_shape(actual) || (expected.is_c_string() && actual.is_c_string()) {
        return true;
    }
    let pointer_like = expected.is_object()
        || expected.is_c_string()
        || matches!(expected.kind(), Kind::Pointer(_) | Kind::MethodRef);
    pointer_like && argument.numeric().is_some_and(|n| n.is_integer_zero())
}

impl fmt::Debug for Mock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mock")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("expectations", &self.expectations)
            .field("strict_arguments", &self.strict_arguments)
            .field("received", &self.history.len())
            .field("verified", &self.verified)
            .finish_non_exhaustive()
    }
}

impl Drop for Mock {
    fn drop(&mut self) {
        if self.verified || std::thread::panicking() {
            return;
        }
        for unmet in self.expectations.unmet() {
            self.cx
                .fail_at_last_location(&format!("{}: {unmet}", self.target));
        }
    }
}
