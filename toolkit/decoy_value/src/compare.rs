//! Comparison of boxed values.
//!
//! Each operand pair is dispatched on the operands' categories:
//!
//! | lhs / rhs                      | equality                        | ordering |
//! |--------------------------------|---------------------------------|----------|
//! | numeric / numeric              | usual arithmetic conversions    | same     |
//! | string-like / string-like      | UTF-8 text, else string bytes   | text only |
//! | object / object                | `is_equal` hook, else identity  | `compare` hook |
//! | object / numeric               | integer zero only: nil check    | never    |
//! | `^v`, C string / numeric       | integer zero only: NULL check   | never    |
//! | anything else                  | same shape and same bytes       | never    |
//!
//! String-like means `*`, `r*` and char arrays (`[Nc]`, `[NC]`).
//! Qualifiers never affect a comparison.

use std::cmp::Ordering;

use decoy_encoding::Kind;
use decoy_report::TestContext;

use crate::numeric::{compare_as, promote, Numeric};
use crate::object::{related_by_type, same_object};
use crate::{BoxedValue, CompareError};

/// Comparison category of one operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Category {
    Numeric,
    Object,
    CString,
    CharArray,
    VoidPointer,
    Other,
}

impl Category {
    fn of(value: &BoxedValue) -> Self {
        let desc = value.descriptor();
        if desc.is_numeric() {
            Category::Numeric
        } else if desc.is_object() {
            Category::Object
        } else if desc.is_c_string() {
            Category::CString
        } else if desc.is_char_array() {
            Category::CharArray
        } else if desc.is_void_pointer() {
            Category::VoidPointer
        } else {
            Category::Other
        }
    }

    fn is_string_like(self) -> bool {
        matches!(self, Category::CString | Category::CharArray)
    }

    /// Pointer-sized values that may be compared against a literal zero.
    fn is_nullable(self) -> bool {
        matches!(
            self,
            Category::Object | Category::CString | Category::VoidPointer
        )
    }
}

/// How a pair of operands is compared.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Rule {
    Numeric,
    Text,
    Objects,
    /// `(nullable, numeric)`, with `swapped` set when the numeric is on the left.
    NullCheck { swapped: bool },
    Bytes,
}

fn rule_for(lhs: Category, rhs: Category) -> Rule {
    match (lhs, rhs) {
        (Category::Numeric, Category::Numeric) => Rule::Numeric,
        (a, b) if a.is_string_like() && b.is_string_like() => Rule::Text,
        (Category::Object, Category::Object) => Rule::Objects,
        (a, Category::Numeric) if a.is_nullable() => Rule::NullCheck { swapped: false },
        (Category::Numeric, b) if b.is_nullable() => Rule::NullCheck { swapped: true },
        _ => Rule::Bytes,
    }
}

/// Bare bitfields have no standalone representation to compare.
fn check_comparable(value: &BoxedValue) -> Result<(), CompareError> {
    match value.descriptor().kind() {
        Kind::Bitfield(_) | Kind::Unknown => Err(CompareError::invalid_type(value.descriptor())),
        _ => Ok(()),
    }
}

fn numeric_of(value: &BoxedValue) -> Result<Numeric, CompareError> {
    value
        .numeric()
        .ok_or_else(|| CompareError::invalid_type(value.descriptor()))
}

// === Entry points ===

/// Whether `lhs` equals `rhs`.
pub fn is_equal(lhs: &BoxedValue, rhs: &BoxedValue, cx: &TestContext) -> Result<bool, CompareError> {
    check_comparable(lhs)?;
    check_comparable(rhs)?;
    let rule = rule_for(Category::of(lhs), Category::of(rhs));
    tracing::trace!(lhs = %lhs.descriptor(), rhs = %rhs.descriptor(), ?rule, "equality");
    match rule {
        Rule::Numeric => {
            let order = numeric_order(numeric_of(lhs)?, numeric_of(rhs)?, cx);
            Ok(order == Some(Ordering::Equal))
        }
        Rule::Text => Ok(text_equal(lhs, rhs)),
        Rule::Objects => Ok(objects_equal(lhs, rhs)),
        Rule::NullCheck { swapped } => {
            let (nullable, numeric) = if swapped { (rhs, lhs) } else { (lhs, rhs) };
            if numeric_of(numeric)?.is_integer_zero() {
                Ok(nullable.is_nil())
            } else {
                Err(CompareError::type_mismatch(
                    lhs.descriptor(),
                    rhs.descriptor(),
                    "only an integer zero may stand in for nil",
                ))
            }
        }
        Rule::Bytes => Ok(bytes_equal(lhs, rhs)),
    }
}

/// Ordering of `lhs` relative to `rhs`.
pub fn compare(lhs: &BoxedValue, rhs: &BoxedValue, cx: &TestContext) -> Result<Ordering, CompareError> {
    check_comparable(lhs)?;
    check_comparable(rhs)?;
    let rule = rule_for(Category::of(lhs), Category::of(rhs));
    tracing::trace!(lhs = %lhs.descriptor(), rhs = %rhs.descriptor(), ?rule, "ordering");
    let unordered = |reason: &'static str| {
        CompareError::invalid_comparison(lhs.descriptor(), rhs.descriptor(), reason)
    };
    match rule {
        Rule::Numeric => numeric_order(numeric_of(lhs)?, numeric_of(rhs)?, cx)
            .ok_or_else(|| unordered("floating-point values are unordered")),
        Rule::Text => match (lhs.text(), rhs.text()) {
            (Some(a), Some(b)) => Ok(a.cmp(b)),
            _ => Err(unordered("strings are not valid UTF-8 text")),
        },
        Rule::Objects => objects_order(lhs, rhs).map_err(unordered),
        Rule::NullCheck { .. } => Err(unordered("pointers and numbers have no ordering")),
        Rule::Bytes => Err(unordered("values of this type have no ordering")),
    }
}

/// Whether two numeric values differ by at most `tolerance`.
pub fn is_within(
    lhs: &BoxedValue,
    rhs: &BoxedValue,
    tolerance: f64,
) -> Result<bool, CompareError> {
    match (lhs.numeric(), rhs.numeric()) {
        (Some(a), Some(b)) => Ok((a.to_f64() - b.to_f64()).abs() <= tolerance.abs()),
        _ => Err(CompareError::type_mismatch(
            lhs.descriptor(),
            rhs.descriptor(),
            "tolerance comparison needs two numbers",
        )),
    }
}

// === Rules ===

fn numeric_order(a: Numeric, b: Numeric, cx: &TestContext) -> Option<Ordering> {
    let promotion = promote(a, b);
    if promotion.signed_to_unsigned && cx.warns_about_sign_comparisons() {
        cx.warn_at_last_location(&format!(
            "comparison between signed and unsigned operands: {a} ({}) and {b} ({}) compared as {}",
            a.type_name(),
            b.type_name(),
            promotion.common,
        ));
    }
    compare_as(a, b, promotion.common)
}

fn text_equal(lhs: &BoxedValue, rhs: &BoxedValue) -> bool {
    if let (Some(a), Some(b)) = (lhs.text(), rhs.text()) {
        return a == b;
    }
    match (lhs.string_bytes(), rhs.string_bytes()) {
        (Some(a), Some(b)) => a == b,
        _ if lhs.is_nil() && rhs.is_nil() => true,
        _ => bytes_equal(lhs, rhs),
    }
}

fn objects_equal(lhs: &BoxedValue, rhs: &BoxedValue) -> bool {
    match (lhs.is_nil(), rhs.is_nil()) {
        (true, true) => true,
        (true, false) | (false, true) => false,
        (false, false) => match (lhs.object_ref(), rhs.object_ref()) {
            (Some(a), Some(b)) => a
                .is_equal(b.as_ref())
                .unwrap_or_else(|| same_object(a, b)),
            _ => lhs.address() == rhs.address(),
        },
    }
}

fn objects_order(lhs: &BoxedValue, rhs: &BoxedValue) -> Result<Ordering, &'static str> {
    let (Some(a), Some(b)) = (lhs.object_ref(), rhs.object_ref()) else {
        return Err("nil objects have no ordering");
    };
    if !related_by_type(a.as_ref(), b.as_ref()) {
        return Err("objects of unrelated classes have no ordering");
    }
    a.compare(b.as_ref())
        .or_else(|| b.compare(a.as_ref()).map(Ordering::reverse))
        .ok_or("neither object defines an ordering")
}

fn bytes_equal(lhs: &BoxedValue, rhs: &BoxedValue) -> bool {
    lhs.descriptor().same_shape(rhs.descriptor()) && lhs.bytes() == rhs.bytes()
}
