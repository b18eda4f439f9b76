use super::*;
use crate::object::RuntimeObject;
use pretty_assertions::assert_eq;
use std::any::Any;

#[derive(Debug)]
struct Widget;

impl RuntimeObject for Widget {
    fn class_name(&self) -> &str {
        "Widget"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn scalar_round_trips_through_accessor() {
    assert_eq!(BoxedValue::i32(-7).as_i32(), Some(-7));
    assert_eq!(BoxedValue::u64(u64::MAX).as_u64(), Some(u64::MAX));
    assert_eq!(BoxedValue::f64(2.5).as_f64(), Some(2.5));
    assert_eq!(BoxedValue::bool(true).as_bool(), Some(true));
}

#[test]
fn accessor_on_wrong_kind_is_none() {
    let v = BoxedValue::i32(1);
    assert_eq!(v.as_i64(), None);
    assert_eq!(v.as_u32(), None);
    assert_eq!(v.as_f32(), None);
    assert_eq!(v.as_bool(), None);
}

#[test]
fn byte_length_matches_standalone_size() {
    let values = [
        BoxedValue::i8(1),
        BoxedValue::i16(1),
        BoxedValue::u32(1),
        BoxedValue::f64(1.0),
        BoxedValue::nil(),
        BoxedValue::c_string(Some("hi")),
        BoxedValue::selector("count"),
        BoxedValue::char_array("abc", 8),
        BoxedValue::void_pointer(0x1000),
    ];
    for v in values {
        assert_eq!(v.descriptor().standalone_size(), Ok(v.bytes().len()), "{v}");
    }
}

#[test]
fn from_bytes_checks_length() {
    let desc = Arc::new(TypeDescriptor::signed(IntWidth::W16));
    assert!(BoxedValue::from_bytes(Arc::clone(&desc), &[1, 0]).is_ok());
    assert_eq!(
        BoxedValue::from_bytes(desc, &[1, 0, 0]).err(),
        Some(ValueError::BufferSize {
            descriptor: "s".to_string(),
            expected: 2,
            actual: 3,
        })
    );
}

#[test]
fn from_encoding_reads_struct() {
    let mut bytes = vec![0u8; 16];
    bytes[..4].copy_from_slice(&3i32.to_ne_bytes());
    let v = BoxedValue::from_encoding("{s=id}", &bytes).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(v.descriptor().to_string(), "{s=id}");
    assert_eq!(v.numeric(), None);
}

#[test]
fn from_encoding_propagates_parse_errors() {
    assert!(matches!(
        BoxedValue::from_encoding("{s=", &[]),
        Err(ValueError::Encoding(_))
    ));
}

#[test]
fn nil_object_has_zero_address() {
    let nil = BoxedValue::nil();
    assert!(nil.is_nil());
    assert!(nil.object_ref().is_none());
    assert_eq!(nil.to_string(), "nil");
}

#[test]
fn object_keeps_referent() {
    let widget: ObjectRef = Arc::new(Widget);
    let v = BoxedValue::object(Some(Arc::clone(&widget)));
    assert!(!v.is_nil());
    assert_eq!(v.address(), Some(address_of(&widget)));
    assert_eq!(v.object_ref().map(|o| o.class_name()), Some("Widget"));
    assert!(v.to_string().starts_with("<Widget 0x"));
}

#[test]
fn c_string_text_stops_at_nul() {
    let v = BoxedValue::c_string_from_bytes(Kind::ConstCString, Some(b"abc\0def"));
    assert_eq!(v.text(), Some("abc"));
    assert_eq!(v.descriptor().to_string(), "r*");
    assert_eq!(v.to_string(), "\"abc\"");
}

#[test]
fn null_c_string_has_no_text() {
    let v = BoxedValue::c_string(None);
    assert!(v.is_nil());
    assert_eq!(v.text(), None);
    assert_eq!(v.to_string(), "NULL");
}

#[test]
fn char_array_pads_and_truncates() {
    let padded = BoxedValue::char_array("hi", 4);
    assert_eq!(padded.bytes(), b"hi\0\0");
    assert_eq!(padded.text(), Some("hi"));

    let truncated = BoxedValue::char_array("hello", 3);
    assert_eq!(truncated.text(), Some("hel"));
}

#[test]
fn selectors_with_equal_names_share_bits() {
    let a = BoxedValue::selector("setValue:");
    let b = BoxedValue::selector("setValue:");
    assert_eq!(a.bytes(), b.bytes());
    assert_eq!(a.selector_name(), Some("setValue:"));
    assert_eq!(a.to_string(), "@selector(setValue:)");
}

#[test]
fn numeric_view_sign_extends() {
    assert_eq!(
        BoxedValue::i8(-1).numeric(),
        Some(Numeric::Signed(-1, IntWidth::W8))
    );
    assert_eq!(
        BoxedValue::u16(65535).numeric(),
        Some(Numeric::Unsigned(65535, IntWidth::W16))
    );
}

#[test]
fn compound_display_shows_bytes() {
    let v = BoxedValue::from_encoding("{p=cc}", &[1, 2]).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(v.to_string(), "({p=cc}) [01 02]");
}
