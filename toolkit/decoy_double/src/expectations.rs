//! Per-mock expectation buckets and the dispatch precedence.
//!
//! An intercepted call is resolved against the buckets in a fixed order:
//!
//! 1. `rejected`: any template with the same method, arguments ignored
//! 2. `expected_in_order`: only the head of the queue
//! 3. `expected_once`: first match, removed
//! 4. `expected`: first match, kept
//! 5. `accepted_once`: first match, removed
//! 6. `accepted`: first match, kept
//! 7. the accept-by-default switch
//!
//! A method may sit in several buckets at once; the first bucket that
//! matches wins.

use std::collections::VecDeque;
use std::fmt;

use decoy_report::TestContext;

use crate::{CallRecord, Stub, UnmetExpectation};

/// Registration bucket of a template.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Bucket {
    Rejected,
    ExpectedInOrder,
    ExpectedOnce,
    Expected,
    AcceptedOnce,
    Accepted,
}

impl Bucket {
    pub const fn name(self) -> &'static str {
        match self {
            Bucket::Rejected => "rejected",
            Bucket::ExpectedInOrder => "expected in order",
            Bucket::ExpectedOnce => "expected once",
            Bucket::Expected => "expected",
            Bucket::AcceptedOnce => "accepted once",
            Bucket::Accepted => "accepted",
        }
    }

    /// Whether a template in this bucket is consumed by its first match.
    pub const fn is_once(self) -> bool {
        matches!(
            self,
            Bucket::ExpectedInOrder | Bucket::ExpectedOnce | Bucket::AcceptedOnce
        )
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a call was resolved.
#[derive(Clone, Debug)]
pub enum Dispatch {
    /// The method is rejected.
    Rejected,
    /// A template answered. `stub` is a snapshot taken after its hit was
    /// counted.
    Delivered { bucket: Bucket, stub: Stub },
    /// Nothing matched but the mock accepts by default.
    AcceptedByDefault,
    /// Nothing matched.
    Unexpected,
}

/// The six buckets plus the accept-by-default switch.
#[derive(Clone, Debug, Default)]
pub struct ExpectationSet {
    rejected: Vec<Stub>,
    expected_in_order: VecDeque<Stub>,
    expected_once: Vec<Stub>,
    expected: Vec<Stub>,
    accepted_once: Vec<Stub>,
    accepted: Vec<Stub>,
    accepts_by_default: bool,
}

impl ExpectationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `call` as a template in `bucket` and return it for configuration.
    pub fn register(&mut self, bucket: Bucket, call: CallRecord) -> &mut Stub {
        let stub = Stub::new(call);
        let list = match bucket {
            Bucket::ExpectedInOrder => {
                self.expected_in_order.push_back(stub);
                let last = self.expected_in_order.len() - 1;
                return &mut self.expected_in_order[last];
            }
            Bucket::Rejected => &mut self.rejected,
            Bucket::ExpectedOnce => &mut self.expected_once,
            Bucket::Expected => &mut self.expected,
            Bucket::AcceptedOnce => &mut self.accepted_once,
            Bucket::Accepted => &mut self.accepted,
        };
        list.push(stub);
        let last = list.len() - 1;
        &mut list[last]
    }

    /// Remove every template. The accept-by-default switch is kept.
    pub fn clear(&mut self) {
        self.rejected.clear();
        self.expected_in_order.clear();
        self.expected_once.clear();
        self.expected.clear();
        self.accepted_once.clear();
        self.accepted.clear();
    }

    pub fn accepts_by_default(&self) -> bool {
        self.accepts_by_default
    }

    pub fn set_accepts_by_default(&mut self, accepts: bool) {
        self.accepts_by_default = accepts;
    }

    /// Every template in precedence order.
    pub fn templates(&self) -> impl Iterator<Item = (Bucket, &Stub)> {
        self.rejected
            .iter()
            .map(|s| (Bucket::Rejected, s))
            .chain(self.expected_in_order.iter().map(|s| (Bucket::ExpectedInOrder, s)))
            .chain(self.expected_once.iter().map(|s| (Bucket::ExpectedOnce, s)))
            .chain(self.expected.iter().map(|s| (Bucket::Expected, s)))
            .chain(self.accepted_once.iter().map(|s| (Bucket::AcceptedOnce, s)))
            .chain(self.accepted.iter().map(|s| (Bucket::Accepted, s)))
    }

    pub fn is_empty(&self) -> bool {
        self.templates().next().is_none()
    }

    /// Resolve `call` against the buckets, consuming once-only templates.
    pub fn dispatch(&mut self, call: &CallRecord, cx: &TestContext) -> Dispatch {
        if self
            .rejected
            .iter()
            .any(|stub| stub.call().method() == call.method())
        {
            return Dispatch::Rejected;
        }

        if self
            .expected_in_order
            .front()
            .is_some_and(|stub| stub.matches(call, cx))
        {
            if let Some(stub) = self.expected_in_order.pop_front() {
                return delivered(Bucket::ExpectedInOrder, stub);
            }
        }

        if let Some(stub) = take_first(&mut self.expected_once, call, cx) {
            return delivered(Bucket::ExpectedOnce, stub);
        }
        if let Some(stub) = hit_first(&mut self.expected, call, cx) {
            return Dispatch::Delivered {
                bucket: Bucket::Expected,
                stub,
            };
        }
        if let Some(stub) = take_first(&mut self.accepted_once, call, cx) {
            return delivered(Bucket::AcceptedOnce, stub);
        }
        if let Some(stub) = hit_first(&mut self.accepted, call, cx) {
            return Dispatch::Delivered {
                bucket: Bucket::Accepted,
                stub,
            };
        }

        if self.accepts_by_default {
            Dispatch::AcceptedByDefault
        } else {
            Dispatch::Unexpected
        }
    }

    /// Expectations not yet satisfied: everything left in the in-order
    /// queue and the expect-once bucket, plus `expected` templates that
    /// never matched.
    pub fn unmet(&self) -> Vec<UnmetExpectation> {
        let unmet = |bucket: Bucket, stub: &Stub| UnmetExpectation {
            bucket,
            method: stub.call().method().clone(),
            call: stub.call().to_string(),
        };
        self.expected_in_order
            .iter()
            .map(|s| unmet(Bucket::ExpectedInOrder, s))
            .chain(self.expected_once.iter().map(|s| unmet(Bucket::ExpectedOnce, s)))
            .chain(
                self.expected
                    .iter()
                    .filter(|s| s.hits() == 0)
                    .map(|s| unmet(Bucket::Expected, s)),
            )
            .collect()
    }
}

fn delivered(bucket: Bucket, mut stub: Stub) -> Dispatch {
    stub.record_hit();
    Dispatch::Delivered { bucket, stub }
}

/// Remove and return the first template matching `call`.
fn take_first(list: &mut Vec<Stub>, call: &CallRecord, cx: &TestContext) -> Option<Stub> {
    let index = list.iter().position(|stub| stub.matches(call, cx))?;
    Some(list.remove(index))
}

/// Count a hit on the first template matching `call` and snapshot it.
fn hit_first(list: &mut [Stub], call: &CallRecord, cx: &TestContext) -> Option<Stub> {
    let stub = list.iter_mut().find(|stub| stub.matches(call, cx))?;
    stub.record_hit();
    Some(stub.clone())
}
