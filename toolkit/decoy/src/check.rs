//! Assertion entry points.
//!
//! Every check caches its call site in the [`TestContext`], runs the
//! comparison and reports a pass or a failure there. Comparison errors are
//! reported as failures; nothing here panics or returns an error. Each
//! function returns whether the assertion held so callers can bail out
//! early.
//!
//! The `check_*!` macros capture the call site automatically:
//!
//! ```text
//! check_equal!(cx, rows, 3);
//! check_less!(cx, elapsed, 0.5);
//! check_nil!(cx, delegate);
//! ```

use std::cmp::Ordering;
use std::num::FpCategory;

use decoy_encoding::{Kind, TypeDescriptor};
use decoy_report::{SourceLocation, TestContext};
use decoy_value::{compare, is_equal, is_within, BoxedValue, CompareError, Numeric};

use crate::IntoBoxed;

/// Report the outcome of an assertion described by `claim`.
fn settle(
    cx: &TestContext,
    at: &SourceLocation,
    claim: &str,
    held: Result<bool, CompareError>,
) -> bool {
    tracing::debug!(%at, claim, ?held, "check");
    match held {
        Ok(true) => {
            cx.pass(claim, Some(at));
            true
        }
        Ok(false) => {
            cx.fail(&format!("assertion {claim} failed"), Some(at));
            false
        }
        Err(error) => {
            cx.fail(&format!("assertion {claim}: {error}"), Some(at));
            false
        }
    }
}

fn ordered(
    cx: &TestContext,
    at: SourceLocation,
    lhs: BoxedValue,
    rhs: BoxedValue,
    op: &str,
    accepts: fn(Ordering) -> bool,
) -> bool {
    cx.cache_location(at.clone());
    let held = compare(&lhs, &rhs, cx).map(accepts);
    settle(cx, &at, &format!("{lhs} {op} {rhs}"), held)
}

// === Equality ===

pub fn equal(
    cx: &TestContext,
    at: SourceLocation,
    lhs: impl IntoBoxed,
    rhs: impl IntoBoxed,
) -> bool {
    let (lhs, rhs) = (lhs.into_boxed(), rhs.into_boxed());
    cx.cache_location(at.clone());
    let held = is_equal(&lhs, &rhs, cx);
    settle(cx, &at, &format!("{lhs} == {rhs}"), held)
}

pub fn not_equal(
    cx: &TestContext,
    at: SourceLocation,
    lhs: impl IntoBoxed,
    rhs: impl IntoBoxed,
) -> bool {
    let (lhs, rhs) = (lhs.into_boxed(), rhs.into_boxed());
    cx.cache_location(at.clone());
    let held = is_equal(&lhs, &rhs, cx).map(|equal| !equal);
    settle(cx, &at, &format!("{lhs} != {rhs}"), held)
}

/// `lhs` and `rhs` are numbers at most `tolerance` apart.
pub fn within(
    cx: &TestContext,
    at: SourceLocation,
    lhs: impl IntoBoxed,
    rhs: impl IntoBoxed,
    tolerance: f64,
) -> bool {
    let (lhs, rhs) = (lhs.into_boxed(), rhs.into_boxed());
    cx.cache_location(at.clone());
    let held = is_within(&lhs, &rhs, tolerance);
    settle(cx, &at, &format!("{lhs} == {rhs} ± {tolerance}"), held)
}

// === Ordering ===

pub fn greater(
    cx: &TestContext,
    at: SourceLocation,
    lhs: impl IntoBoxed,
    rhs: impl IntoBoxed,
) -> bool {
    ordered(cx, at, lhs.into_boxed(), rhs.into_boxed(), ">", Ordering::is_gt)
}

pub fn not_greater(
    cx: &TestContext,
    at: SourceLocation,
    lhs: impl IntoBoxed,
    rhs: impl IntoBoxed,
) -> bool {
    ordered(cx, at, lhs.into_boxed(), rhs.into_boxed(), "<=", Ordering::is_le)
}

pub fn less(
    cx: &TestContext,
    at: SourceLocation,
    lhs: impl IntoBoxed,
    rhs: impl IntoBoxed,
) -> bool {
    ordered(cx, at, lhs.into_boxed(), rhs.into_boxed(), "<", Ordering::is_lt)
}

pub fn not_less(
    cx: &TestContext,
    at: SourceLocation,
    lhs: impl IntoBoxed,
    rhs: impl IntoBoxed,
) -> bool {
    ordered(cx, at, lhs.into_boxed(), rhs.into_boxed(), ">=", Ordering::is_ge)
}

// === Truth and nil ===

/// `value` is nonzero (or a non-nil pointer).
pub fn is_true(cx: &TestContext, at: SourceLocation, value: impl IntoBoxed) -> bool {
    let value = value.into_boxed();
    cx.cache_location(at.clone());
    let held = truth(&value);
    settle(cx, &at, &format!("{value} is true"), held)
}

/// `value` is zero (or a nil pointer).
pub fn is_false(cx: &TestContext, at: SourceLocation, value: impl IntoBoxed) -> bool {
    let value = value.into_boxed();
    cx.cache_location(at.clone());
    let held = truth(&value).map(|truth| !truth);
    settle(cx, &at, &format!("{value} is false"), held)
}

pub fn nil(cx: &TestContext, at: SourceLocation, value: impl IntoBoxed) -> bool {
    let value = value.into_boxed();
    cx.cache_location(at.clone());
    let held = nil_state(&value);
    settle(cx, &at, &format!("{value} is nil"), held)
}

pub fn not_nil(cx: &TestContext, at: SourceLocation, value: impl IntoBoxed) -> bool {
    let value = value.into_boxed();
    cx.cache_location(at.clone());
    let held = nil_state(&value).map(|nil| !nil);
    settle(cx, &at, &format!("{value} is not nil"), held)
}

/// C truth: nonzero numbers and non-NULL pointers are true.
fn truth(value: &BoxedValue) -> Result<bool, CompareError> {
    if let Some(number) = value.numeric() {
        return Ok(match number {
            Numeric::Signed(v, _) => v != 0,
            Numeric::Unsigned(v, _) => v != 0,
            Numeric::Bool(b) => b,
            Numeric::F32(v) => v.classify() != FpCategory::Zero,
            Numeric::F64(v) => v.classify() != FpCategory::Zero,
        });
    }
    match value.address() {
        Some(address) => Ok(address != 0),
        None => Err(CompareError::type_mismatch(
            value.descriptor(),
            &TypeDescriptor::new(Kind::Bool),
            "only numbers and pointers have a truth value",
        )),
    }
}

fn nil_state(value: &BoxedValue) -> Result<bool, CompareError> {
    match value.address() {
        Some(address) => Ok(address == 0),
        None => Err(CompareError::type_mismatch(
            value.descriptor(),
            &TypeDescriptor::pointer(Kind::Void.into()),
            "only pointer-sized values can be nil",
        )),
    }
}

// === Macros ===

#[macro_export]
macro_rules! check_equal {
    ($cx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::check::equal(&$cx, $crate::location!(), $lhs, $rhs)
    };
}

#[macro_export]
macro_rules! check_not_equal {
    ($cx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::check::not_equal(&$cx, $crate::location!(), $lhs, $rhs)
    };
}

#[macro_export]
macro_rules! check_within {
    ($cx:expr, $lhs:expr, $rhs:expr, $tolerance:expr $(,)?) => {
        $crate::check::within(&$cx, $crate::location!(), $lhs, $rhs, $tolerance)
    };
}

#[macro_export]
macro_rules! check_greater {
    ($cx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::check::greater(&$cx, $crate::location!(), $lhs, $rhs)
    };
}

#[macro_export]
macro_rules! check_not_greater {
    ($cx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::check::not_greater(&$cx, $crate::location!(), $lhs, $rhs)
    };
}

#[macro_export]
macro_rules! check_less {
    ($cx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::check::less(&$cx, $crate::location!(), $lhs, $rhs)
    };
}

#[macro_export]
macro_rules! check_not_less {
    ($cx:expr, $lhs:expr, $rhs:expr $(,)?) => {
        $crate::check::not_less(&$cx, $crate::location!(), $lhs, $rhs)
    };
}

#[macro_export]
macro_rules! check_true {
    ($cx:expr, $value:expr $(,)?) => {
        $crate::check::is_true(&$cx, $crate::location!(), $value)
    };
}

#[macro_export]
macro_rules! check_false {
    ($cx:expr, $value:expr $(,)?) => {
        $crate::check::is_false(&$cx, $crate::location!(), $value)
    };
}

#[macro_export]
macro_rules! check_nil {
    ($cx:expr, $value:expr $(,)?) => {
        $crate::check::nil(&$cx, $crate::location!(), $value)
    };
}

#[macro_export]
macro_rules! check_not_nil {
    ($cx:expr, $value:expr $(,)?) => {
        $crate::check::not_nil(&$cx, $crate::location!(), $value)
    };
}
