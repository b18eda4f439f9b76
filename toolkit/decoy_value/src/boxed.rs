//! Boxed runtime-typed values.
//!
//! A [`BoxedValue`] is a descriptor plus the value's bit pattern in native
//! byte order, sized exactly `standalone_size(descriptor)`. Object
//! references, selectors and C strings also keep their referent so the
//! comparison engine can call equality hooks and read text. For those the
//! bytes hold the referent's address, `0` for nil/`NULL`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use decoy_encoding::{IntWidth, Kind, TypeDescriptor};
use rustc_hash::FxHasher;
use smallvec::SmallVec;

use crate::numeric::Numeric;
use crate::object::{address_of, ObjectRef};
use crate::ValueError;

/// Out-of-line data a boxed value points at.
#[derive(Clone, Debug)]
enum Referent {
    None,
    Object(ObjectRef),
    /// Bytes before the terminating NUL.
    CString(Arc<[u8]>),
    Selector(Arc<str>),
}

/// An immutable value tagged with its runtime type descriptor.
#[derive(Clone, Debug)]
pub struct BoxedValue {
    descriptor: Arc<TypeDescriptor>,
    bytes: SmallVec<[u8; 16]>,
    referent: Referent,
}

impl BoxedValue {
    // === Raw construction ===

    /// Box `bytes` as a value of type `descriptor`.
    ///
    /// `bytes` must be exactly `standalone_size(descriptor)` long.
    pub fn from_bytes(descriptor: Arc<TypeDescriptor>, bytes: &[u8]) -> Result<Self, ValueError> {
        let expected = descriptor.standalone_size()?;
        if bytes.len() != expected {
            return Err(ValueError::BufferSize {
                descriptor: descriptor.to_string(),
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self::trusted(descriptor, bytes, Referent::None))
    }

    /// Parse `encoding` and box `bytes` as a value of that type.
    pub fn from_encoding(encoding: &str, bytes: &[u8]) -> Result<Self, ValueError> {
        let descriptor = decoy_encoding::parse(encoding)?;
        Self::from_bytes(Arc::new(descriptor), bytes)
    }

    fn trusted(descriptor: Arc<TypeDescriptor>, bytes: &[u8], referent: Referent) -> Self {
        BoxedValue {
            descriptor,
            bytes: SmallVec::from_slice(bytes),
            referent,
        }
    }

    fn with_address(kind: Kind, address: usize, referent: Referent) -> Self {
        let address = address as u64;
        Self::trusted(
            Arc::new(TypeDescriptor::new(kind)),
            &address.to_ne_bytes(),
            referent,
        )
    }

    // === Scalars ===

    pub fn bool(value: bool) -> Self {
        Self::trusted(
            Arc::new(TypeDescriptor::new(Kind::Bool)),
            &[u8::from(value)],
            Referent::None,
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match (self.descriptor.kind(), self.bytes.as_slice()) {
            (Kind::Bool, [b]) => Some(*b != 0),
            _ => None,
        }
    }

    // === References ===

    /// An `@` value. `None` is nil.
    pub fn object(object: Option<ObjectRef>) -> Self {
        Self::reference(Kind::ObjectRef, object)
    }

    /// A nil `@`.
    pub fn nil() -> Self {
        Self::object(None)
    }

    /// A `#` value. `None` is `Nil`.
    pub fn class(class: Option<ObjectRef>) -> Self {
        Self::reference(Kind::ClassRef, class)
    }

    fn reference(kind: Kind, object: Option<ObjectRef>) -> Self {
        match object {
            Some(object) => Self::with_address(kind, address_of(&object), Referent::Object(object)),
            None => Self::with_address(kind, 0, Referent::None),
        }
    }

    /// A `:` value. Equal names produce equal bit patterns.
    pub fn selector(name: &str) -> Self {
        let mut hasher = FxHasher::default();
        name.hash(&mut hasher);
        let bits = hasher.finish().max(1);
        Self::trusted(
            Arc::new(TypeDescriptor::new(Kind::MethodRef)),
            &bits.to_ne_bytes(),
            Referent::Selector(Arc::from(name)),
        )
    }

    /// A `*` value. `None` is `NULL`.
    pub fn c_string(text: Option<&str>) -> Self {
        Self::c_string_from_bytes(Kind::MutableCString, text.map(str::as_bytes))
    }

    /// An `r*` value. `None` is `NULL`.
    pub fn const_c_string(text: Option<&str>) -> Self {
        Self::c_string_from_bytes(Kind::ConstCString, text.map(str::as_bytes))
    }

    /// A C string of arbitrary bytes, cut at the first NUL.
    ///
    /// `kind` other than `ConstCString` produces a `*`.
    pub fn c_string_from_bytes(kind: Kind, bytes: Option<&[u8]>) -> Self {
        let kind = match kind {
            Kind::ConstCString => Kind::ConstCString,
            _ => Kind::MutableCString,
        };
        match bytes {
            Some(bytes) => {
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                let text: Arc<[u8]> = Arc::from(&bytes[..end]);
                let address = Arc::as_ptr(&text).cast::<u8>() as usize;
                Self::with_address(kind, address, Referent::CString(text))
            }
            None => Self::with_address(kind, 0, Referent::None),
        }
    }

    /// A `[len c]` array holding `text`, NUL-padded or truncated to `len`.
    pub fn char_array(text: &str, len: usize) -> Self {
        let mut bytes = vec![0u8; len];
        let n = text.len().min(len);
        bytes[..n].copy_from_slice(&text.as_bytes()[..n]);
        let descriptor = TypeDescriptor::array(TypeDescriptor::signed(IntWidth::W8), len);
        Self::trusted(Arc::new(descriptor), &bytes, Referent::None)
    }

    /// A `^pointee` value holding `address`.
    pub fn pointer(pointee: TypeDescriptor, address: usize) -> Self {
        Self::with_address(Kind::Pointer(Box::new(pointee)), address, Referent::None)
    }

    /// A `^v` value holding `address`.
    pub fn void_pointer(address: usize) -> Self {
        Self::pointer(TypeDescriptor::new(Kind::Void), address)
    }

    // === Accessors ===

    #[inline]
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Shared handle to the descriptor.
    pub fn shared_descriptor(&self) -> Arc<TypeDescriptor> {
        Arc::clone(&self.descriptor)
    }

    /// The value's bit pattern.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Stored address of a pointer-sized value.
    pub fn address(&self) -> Option<usize> {
        match self.descriptor.kind() {
            Kind::Pointer(_)
            | Kind::ConstCString
            | Kind::MutableCString
            | Kind::ObjectRef
            | Kind::ClassRef
            | Kind::MethodRef => {
                let bytes: [u8; 8] = self.bytes.as_slice().try_into().ok()?;
                usize::try_from(u64::from_ne_bytes(bytes)).ok()
            }
            _ => None,
        }
    }

    /// A pointer-sized value holding address `0`.
    pub fn is_nil(&self) -> bool {
        self.address() == Some(0)
    }

    /// The referenced object of an `@` or `#` value.
    pub fn object_ref(&self) -> Option<&ObjectRef> {
        match &self.referent {
            Referent::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Name of a selector built with [`selector`](Self::selector).
    pub fn selector_name(&self) -> Option<&str> {
        match &self.referent {
            Referent::Selector(name) => Some(name.as_ref()),
            _ => None,
        }
    }

    /// Bytes of a C string (before its NUL) or of a char array (before its
    /// first NUL, or all of it).
    pub fn string_bytes(&self) -> Option<&[u8]> {
        if self.descriptor.is_char_array() {
            let end = self
                .bytes
                .iter()
                .position(|&b| b == 0)
                .unwrap_or(self.bytes.len());
            return Some(&self.bytes[..end]);
        }
        match &self.referent {
            Referent::CString(text) if self.descriptor.is_c_string() => Some(text.as_ref()),
            _ => None,
        }
    }

    /// UTF-8 text of a string-like value.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(self.string_bytes()?).ok()
    }

    /// Numeric view of a numeric scalar.
    pub fn numeric(&self) -> Option<Numeric> {
        match self.descriptor.kind() {
            Kind::SignedInt(w) => {
                let v = match w {
                    IntWidth::W8 => i64::from(self.as_i8()?),
                    IntWidth::W16 => i64::from(self.as_i16()?),
                    IntWidth::W32 => i64::from(self.as_i32()?),
                    IntWidth::W64 => self.as_i64()?,
                };
                Some(Numeric::Signed(v, *w))
            }
            Kind::UnsignedInt(w) => {
                let v = match w {
                    IntWidth::W8 => u64::from(self.as_u8()?),
                    IntWidth::W16 => u64::from(self.as_u16()?),
                    IntWidth::W32 => u64::from(self.as_u32()?),
                    IntWidth::W64 => self.as_u64()?,
                };
                Some(Numeric::Unsigned(v, *w))
            }
            Kind::Bool => self.as_bool().map(Numeric::Bool),
            Kind::Float32 => self.as_f32().map(Numeric::F32),
            Kind::Float64 => self.as_f64().map(Numeric::F64),
            _ => None,
        }
    }
}

/// Constructor and accessor pairs for fixed-width scalars.
macro_rules! scalars {
    ($($ctor:ident, $get:ident, $ty:ty, $kind:expr;)*) => {
        impl BoxedValue {
            $(
                pub fn $ctor(value: $ty) -> Self {
                    Self::trusted(
                        Arc::new(TypeDescriptor::new($kind)),
                        &value.to_ne_bytes(),
                        Referent::None,
                    )
                }

                pub fn $get(&self) -> Option<$ty> {
                    if *self.descriptor.kind() != $kind {
                        return None;
                    }
                    let bytes = self.bytes.as_slice().try_into().ok()?;
                    Some(<$ty>::from_ne_bytes(bytes))
                }
            )*
        }
    };
}

scalars! {
    i8, as_i8, i8, Kind::SignedInt(IntWidth::W8);
    i16, as_i16, i16, Kind::SignedInt(IntWidth::W16);
    i32, as_i32, i32, Kind::SignedInt(IntWidth::W32);
    i64, as_i64, i64, Kind::SignedInt(IntWidth::W64);
    u8, as_u8, u8, Kind::UnsignedInt(IntWidth::W8);
    u16, as_u16, u16, Kind::UnsignedInt(IntWidth::W16);
    u32, as_u32, u32, Kind::UnsignedInt(IntWidth::W32);
    u64, as_u64, u64, Kind::UnsignedInt(IntWidth::W64);
    f32, as_f32, f32, Kind::Float32;
    f64, as_f64, f64, Kind::Float64;
}

// === Rendering ===

impl fmt::Display for BoxedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.numeric() {
            return write!(f, "{n}");
        }
        match self.descriptor.kind() {
            Kind::ObjectRef | Kind::ClassRef => match (&self.referent, self.address()) {
                (_, Some(0)) => f.write_str("nil"),
                (Referent::Object(object), Some(address)) => {
                    write!(f, "<{} {address:#x}>", object.class_name())
                }
                (_, address) => write!(f, "{}", Hex(address)),
            },
            Kind::MethodRef => match self.selector_name() {
                Some(name) => write!(f, "@selector({name})"),
                None => write!(f, "{}", Hex(self.address())),
            },
            _ if self.descriptor.is_string_like() => match self.string_bytes() {
                Some(bytes) => write!(f, "{:?}", String::from_utf8_lossy(bytes)),
                None if self.is_nil() => f.write_str("NULL"),
                None => write!(f, "{}", Hex(self.address())),
            },
            Kind::Pointer(_) => match self.address() {
                Some(0) => f.write_str("NULL"),
                address => write!(f, "{}", Hex(address)),
            },
            _ => {
                write!(f, "({}) [", self.descriptor)?;
                for (i, b) in self.bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{b:02x}")?;
                }
                f.write_str("]")
            }
        }
    }
}

struct Hex(Option<usize>);

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(address) => write!(f, "{address:#x}"),
            None => f.write_str("?"),
        }
    }
}

#[cfg(test)]
mod tests;
