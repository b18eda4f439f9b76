use super::*;
use pretty_assertions::assert_eq;

fn int(v: i32) -> Numeric {
    Numeric::Signed(i64::from(v), IntWidth::W32)
}

fn uint(v: u32) -> Numeric {
    Numeric::Unsigned(u64::from(v), IntWidth::W32)
}

#[test]
fn small_integers_promote_to_int() {
    let p = promote(
        Numeric::Unsigned(200, IntWidth::W8),
        Numeric::Signed(-3, IntWidth::W16),
    );
    assert_eq!(
        p,
        Promotion {
            common: CommonType::I32,
            signed_to_unsigned: false,
        }
    );
}

#[test]
fn bool_promotes_to_int() {
    assert_eq!(
        promote(Numeric::Bool(true), Numeric::Unsigned(1, IntWidth::W16)).common,
        CommonType::I32
    );
}

#[test]
fn int_against_unsigned_int_goes_unsigned() {
    let p = promote(int(-1), uint(1));
    assert_eq!(p.common, CommonType::U32);
    assert!(p.signed_to_unsigned);
    assert_eq!(compare_as(int(-1), uint(1), p.common), Some(Ordering::Greater));
}

#[test]
fn wider_signed_beats_narrower_unsigned() {
    let wide = Numeric::Signed(-1, IntWidth::W64);
    let p = promote(uint(7), wide);
    assert_eq!(p.common, CommonType::I64);
    assert!(!p.signed_to_unsigned);
    assert_eq!(compare_as(uint(7), wide, p.common), Some(Ordering::Greater));
}

#[test]
fn unsigned_long_long_wins_over_long_long() {
    let p = promote(
        Numeric::Signed(-5, IntWidth::W64),
        Numeric::Unsigned(5, IntWidth::W64),
    );
    assert_eq!(p.common, CommonType::U64);
    assert!(p.signed_to_unsigned);
}

#[test]
fn unsigned_int_against_signed_char_goes_unsigned() {
    let p = promote(uint(3), Numeric::Signed(-2, IntWidth::W8));
    assert_eq!(p.common, CommonType::U32);
    assert!(p.signed_to_unsigned);
}

#[test]
fn same_signedness_widest_wins() {
    assert_eq!(
        promote(int(1), Numeric::Signed(2, IntWidth::W64)).common,
        CommonType::I64
    );
    assert_eq!(
        promote(uint(1), Numeric::Unsigned(2, IntWidth::W8)).common,
        CommonType::U32
    );
}

#[test]
fn floating_wins() {
    assert_eq!(promote(Numeric::F32(1.0), uint(2)).common, CommonType::F32);
    assert_eq!(
        promote(Numeric::F32(1.0), Numeric::F64(2.0)).common,
        CommonType::F64
    );
    assert!(!promote(Numeric::F64(1.0), int(-1)).signed_to_unsigned);
}

#[test]
fn nan_is_unordered() {
    assert_eq!(
        compare_as(Numeric::F64(f64::NAN), Numeric::F64(1.0), CommonType::F64),
        None
    );
}

#[test]
fn integer_zero_detection() {
    assert!(int(0).is_integer_zero());
    assert!(Numeric::Unsigned(0, IntWidth::W64).is_integer_zero());
    assert!(Numeric::Bool(false).is_integer_zero());
    assert!(!Numeric::F64(0.0).is_integer_zero());
    assert!(!int(5).is_integer_zero());
}

// === Property tests ===

mod proptest_promotion {
    use super::super::{compare_as, promote, Numeric};
    use decoy_encoding::IntWidth;
    use proptest::prelude::*;

    fn cmp(a: Numeric, b: Numeric) -> Option<std::cmp::Ordering> {
        compare_as(a, b, promote(a, b).common)
    }

    proptest! {
        #[test]
        fn int_vs_unsigned_int_matches_c(a in any::<i32>(), b in any::<u32>()) {
            let native = (a as u32).cmp(&b);
            prop_assert_eq!(
                cmp(Numeric::Signed(i64::from(a), IntWidth::W32), Numeric::Unsigned(u64::from(b), IntWidth::W32)),
                Some(native)
            );
        }

        #[test]
        fn short_vs_unsigned_short_matches_c(a in any::<i16>(), b in any::<u16>()) {
            let native = i32::from(a).cmp(&i32::from(b));
            prop_assert_eq!(
                cmp(Numeric::Signed(i64::from(a), IntWidth::W16), Numeric::Unsigned(u64::from(b), IntWidth::W16)),
                Some(native)
            );
        }

        #[test]
        fn long_long_vs_unsigned_int_matches_c(a in any::<i64>(), b in any::<u32>()) {
            let native = a.cmp(&i64::from(b));
            prop_assert_eq!(
                cmp(Numeric::Signed(a, IntWidth::W64), Numeric::Unsigned(u64::from(b), IntWidth::W32)),
                Some(native)
            );
        }

        #[test]
        fn unsigned_long_long_vs_char_matches_c(a in any::<u64>(), b in any::<i8>()) {
            let native = a.cmp(&(b as u64));
            prop_assert_eq!(
                cmp(Numeric::Unsigned(a, IntWidth::W64), Numeric::Signed(i64::from(b), IntWidth::W8)),
                Some(native)
            );
        }

        #[test]
        fn float_vs_int_matches_c(a in -1.0e9f32..1.0e9f32, b in any::<i32>()) {
            let native = a.partial_cmp(&(b as f32));
            prop_assert_eq!(
                cmp(Numeric::F32(a), Numeric::Signed(i64::from(b), IntWidth::W32)),
                native
            );
        }

        #[test]
        fn comparison_is_antisymmetric(a in any::<i64>(), b in any::<u16>()) {
            let x = Numeric::Signed(a, IntWidth::W64);
            let y = Numeric::Unsigned(u64::from(b), IntWidth::W16);
            prop_assert_eq!(cmp(x, y).map(std::cmp::Ordering::reverse), cmp(y, x));
        }
    }
}
