//! Conversion of plain Rust values into [`BoxedValue`]s.

use decoy_value::{BoxedValue, ObjectRef};

/// A value that can be boxed with its runtime type descriptor.
///
/// Implemented for the fixed-width scalars, `bool`, strings (as `r*` C
/// strings), object references and boxed values themselves, so assertion
/// entry points and [`call!`](crate::call) accept them directly.
pub trait IntoBoxed {
    fn into_boxed(self) -> BoxedValue;
}

impl IntoBoxed for BoxedValue {
    #[inline]
    fn into_boxed(self) -> BoxedValue {
        self
    }
}

impl IntoBoxed for &BoxedValue {
    #[inline]
    fn into_boxed(self) -> BoxedValue {
        self.clone()
    }
}

macro_rules! scalar_into_boxed {
    ($($ty:ty => $ctor:ident),* $(,)?) => {
        $(
            impl IntoBoxed for $ty {
                #[inline]
                fn into_boxed(self) -> BoxedValue {
                    BoxedValue::$ctor(self)
                }
            }
        )*
    };
}

scalar_into_boxed! {
    i8 => i8,
    i16 => i16,
    i32 => i32,
    i64 => i64,
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    f32 => f32,
    f64 => f64,
    bool => bool,
}

impl IntoBoxed for &str {
    fn into_boxed(self) -> BoxedValue {
        BoxedValue::const_c_string(Some(self))
    }
}

impl IntoBoxed for Option<&str> {
    fn into_boxed(self) -> BoxedValue {
        BoxedValue::const_c_string(self)
    }
}

impl IntoBoxed for ObjectRef {
    fn into_boxed(self) -> BoxedValue {
        BoxedValue::object(Some(self))
    }
}

impl IntoBoxed for &ObjectRef {
    fn into_boxed(self) -> BoxedValue {
        BoxedValue::object(Some(ObjectRef::clone(self)))
    }
}

impl IntoBoxed for Option<ObjectRef> {
    fn into_boxed(self) -> BoxedValue {
        BoxedValue::object(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decoy_encoding::{IntWidth, Kind};

    #[test]
    fn scalars_keep_their_width() {
        assert_eq!(
            *7u16.into_boxed().descriptor().kind(),
            Kind::UnsignedInt(IntWidth::W16)
        );
        assert_eq!(*(-1i8).into_boxed().descriptor().kind(), Kind::SignedInt(IntWidth::W8));
        assert_eq!(true.into_boxed().as_bool(), Some(true));
    }

    #[test]
    fn strings_box_as_const_c_strings() {
        let boxed = "hello".into_boxed();
        assert_eq!(*boxed.descriptor().kind(), Kind::ConstCString);
        assert_eq!(boxed.text(), Some("hello"));
        assert!(None::<&str>.into_boxed().is_nil());
    }

    #[test]
    fn missing_object_is_nil() {
        assert!(None::<ObjectRef>.into_boxed().is_nil());
    }
}
