//! Cross-crate guarantees.

use std::cmp::Ordering;

use decoy::value::{compare, is_equal};
use decoy::{call, parse, BoxedValue, CompareError, DoubleError, Mock, TestContext};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::item;

// === Descriptors ===

#[test]
fn reserialized_descriptors_parse_to_equal_trees() {
    for source in [
        "i",
        "r*",
        "^^{Node=i^{Node}}",
        "[16c]",
        "{Rect={Point=dd}{Size=dd}}",
        "(Value=iqd*)",
        "{Flags=b1b3b28}",
        "Vv",
        "^?",
    ] {
        let tree = parse(source).unwrap();
        let again = parse(&tree.to_string()).unwrap();
        assert_eq!(again, tree, "{source}");
    }
}

#[test]
fn struct_of_short_and_object_is_sixteen_bytes() {
    let desc = parse("{s=id}").unwrap();
    assert_eq!(desc.embedded_size().unwrap(), 16);
    assert_eq!(desc.standalone_size().unwrap(), 16);
    assert_eq!(desc.alignment().unwrap(), 8);
}

// === Values ===

#[test]
fn nil_equals_zero_but_not_five() {
    let cx = TestContext::silent();
    let nil = BoxedValue::nil();
    assert!(is_equal(&nil, &BoxedValue::i32(0), &cx).unwrap());
    assert!(matches!(
        is_equal(&nil, &BoxedValue::i32(5), &cx),
        Err(CompareError::TypeMismatch { .. })
    ));
}

#[test]
fn objects_use_their_equality_hook() {
    let cx = TestContext::silent();
    let a = BoxedValue::object(Some(item("pen")));
    let b = BoxedValue::object(Some(item("pen")));
    let c = BoxedValue::object(Some(item("ink")));
    assert!(is_equal(&a, &b, &cx).unwrap());
    assert!(!is_equal(&a, &c, &cx).unwrap());
    assert!(matches!(
        compare(&a, &b, &cx),
        Err(CompareError::InvalidComparison { .. })
    ));
}

fn promoted_order(lhs: i64, rhs: u32) -> Ordering {
    // i64 outranks u32, so both become i64.
    lhs.cmp(&i64::from(rhs))
}

proptest! {
    #[test]
    fn int_vs_unsigned_int_compares_as_unsigned(a: i32, b: u32) {
        let cx = TestContext::silent();
        let order = compare(&BoxedValue::i32(a), &BoxedValue::u32(b), &cx).unwrap();
        #[allow(clippy::cast_sign_loss, reason = "C conversion")]
        let expected = (a as u32).cmp(&b);
        prop_assert_eq!(order, expected);
    }

    #[test]
    fn long_long_vs_unsigned_int_compares_as_long_long(a: i64, b: u32) {
        let cx = TestContext::silent();
        let order = compare(&BoxedValue::i64(a), &BoxedValue::u32(b), &cx).unwrap();
        prop_assert_eq!(order, promoted_order(a, b));
    }

    #[test]
    fn small_ints_compare_natively(a: i8, b: u16) {
        let cx = TestContext::silent();
        let order = compare(&BoxedValue::i8(a), &BoxedValue::u16(b), &cx).unwrap();
        prop_assert_eq!(order, i32::from(a).cmp(&i32::from(b)));
    }
}

// === Expectations ===

#[test]
fn accept_once_answers_a_single_call() {
    let mut mock = Mock::for_object("Printer", TestContext::silent());
    mock.accept_once(call!(mock, "flush"));

    assert!(mock.invoke("flush", []).is_ok());
    assert!(matches!(
        mock.invoke("flush", []),
        Err(DoubleError::UnexpectedCall { .. })
    ));
    assert!(mock.verify().is_empty());
}

#[test]
fn in_order_expectations() {
    let mut mock = Mock::for_object("Printer", TestContext::silent());
    mock.expect_in_order(call!(mock, "begin"));
    mock.expect_in_order(call!(mock, "end"));

    assert!(matches!(
        mock.invoke("end", []),
        Err(DoubleError::UnexpectedCall { .. })
    ));
    assert_eq!(mock.expectations().unmet().len(), 2);

    mock.invoke("begin", []).unwrap();
    mock.invoke("end", []).unwrap();
    assert!(mock.verify().is_empty());
}

#[test]
fn arguments_match_across_widths() {
    let mut mock = Mock::for_object("Printer", TestContext::silent());
    mock.expect(call!(mock, "print:copies:", "report", 2i64))
        .returning(BoxedValue::bool(true));

    let printed = mock
        .invoke(
            "print:copies:",
            [BoxedValue::c_string(Some("report")), BoxedValue::u8(2)],
        )
        .unwrap();
    assert_eq!(printed.and_then(|v| v.as_bool()), Some(true));
}

#[test]
fn verify_reports_the_uncalled_expectation() {
    let mut mock = Mock::for_object("Printer", TestContext::silent());
    mock.expect(call!(mock, "print:", "summary"));

    let unmet = mock.verify();
    assert_eq!(unmet.len(), 1);
    assert_eq!(unmet[0].method.name(), "print:");
    assert_eq!(
        unmet[0].to_string(),
        "expected call print:(\"summary\") (expected) was never received"
    );
}
