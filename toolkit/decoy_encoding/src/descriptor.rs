//! The type descriptor tree.
//!
//! A [`TypeDescriptor`] pairs a [`Kind`] with its [`Qualifiers`]. Trees are
//! built by the [scanner](crate::scanner) or by the constructors below and
//! never mutated afterwards. `Display` writes the encoding string back out,
//! so `parse(&desc.to_string())` yields a tree equal to `desc`.

use std::fmt;

use crate::layout::{self, Layout};
use crate::{EncodingError, Qualifiers};

/// Width of an integer kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    pub const fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }

    pub const fn bytes(self) -> usize {
        match self {
            IntWidth::W8 => 1,
            IntWidth::W16 => 2,
            IntWidth::W32 => 4,
            IntWidth::W64 => 8,
        }
    }

    const fn signed_char(self) -> char {
        match self {
            IntWidth::W8 => 'c',
            IntWidth::W16 => 's',
            IntWidth::W32 => 'i',
            IntWidth::W64 => 'q',
        }
    }

    const fn unsigned_char(self) -> char {
        match self {
            IntWidth::W8 => 'C',
            IntWidth::W16 => 'S',
            IntWidth::W32 => 'I',
            IntWidth::W64 => 'Q',
        }
    }
}

/// Kind of a described type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    // === Scalars ===
    /// `c` `s` `i` `l` `q`
    SignedInt(IntWidth),
    /// `C` `S` `I` `L` `Q`
    UnsignedInt(IntWidth),
    /// `f`
    Float32,
    /// `d`
    Float64,
    /// `B`
    Bool,
    /// `v`
    Void,

    // === Pointer-sized ===
    /// `^type`
    Pointer(Box<TypeDescriptor>),
    /// `r*`
    ConstCString,
    /// `*`
    MutableCString,
    /// `@`
    ObjectRef,
    /// `#`
    ClassRef,
    /// `:`
    MethodRef,

    // === Composites ===
    /// `[count type]`
    Array {
        element: Box<TypeDescriptor>,
        count: usize,
    },
    /// `{name=members}`, or `{name}` when the member list is not given.
    Struct {
        name: String,
        members: Option<Vec<TypeDescriptor>>,
    },
    /// `(name=members)`, or `(name)` when the member list is not given.
    Union {
        name: String,
        members: Option<Vec<TypeDescriptor>>,
    },
    /// `bN`
    Bitfield(u32),

    /// `?` (function pointers, unknown types)
    Unknown,
}

/// A parsed or constructed type descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    kind: Kind,
    qualifiers: Qualifiers,
}

impl TypeDescriptor {
    /// Descriptor of `kind` with no qualifiers.
    ///
    /// `ConstCString` always carries [`Qualifiers::CONST`], matching what the
    /// parser produces for `r*`.
    pub fn new(kind: Kind) -> Self {
        Self::with_qualifiers(kind, Qualifiers::empty())
    }

    /// Descriptor of `kind` with `qualifiers`.
    ///
    /// A `const`-qualified `MutableCString` is a `ConstCString`.
    pub fn with_qualifiers(kind: Kind, mut qualifiers: Qualifiers) -> Self {
        let kind = match kind {
            Kind::MutableCString if qualifiers.contains(Qualifiers::CONST) => Kind::ConstCString,
            kind => kind,
        };
        if kind == Kind::ConstCString {
            qualifiers |= Qualifiers::CONST;
        }
        TypeDescriptor { kind, qualifiers }
    }

    // === Constructors ===

    pub fn signed(width: IntWidth) -> Self {
        Self::new(Kind::SignedInt(width))
    }

    pub fn unsigned(width: IntWidth) -> Self {
        Self::new(Kind::UnsignedInt(width))
    }

    pub fn pointer(to: TypeDescriptor) -> Self {
        Self::new(Kind::Pointer(Box::new(to)))
    }

    pub fn array(element: TypeDescriptor, count: usize) -> Self {
        Self::new(Kind::Array {
            element: Box::new(element),
            count,
        })
    }

    pub fn structure(name: impl Into<String>, members: Vec<TypeDescriptor>) -> Self {
        Self::new(Kind::Struct {
            name: name.into(),
            members: Some(members),
        })
    }

    pub fn union(name: impl Into<String>, members: Vec<TypeDescriptor>) -> Self {
        Self::new(Kind::Union {
            name: name.into(),
            members: Some(members),
        })
    }

    // === Accessors ===

    #[inline]
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    #[inline]
    pub fn qualifiers(&self) -> Qualifiers {
        self.qualifiers
    }

    #[inline]
    pub fn into_kind(self) -> Kind {
        self.kind
    }

    /// Integer or floating-point scalar (including `Bool`).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.kind,
            Kind::SignedInt(_) | Kind::UnsignedInt(_) | Kind::Float32 | Kind::Float64 | Kind::Bool
        )
    }

    /// Integer scalar (including `Bool`).
    pub fn is_integer(&self) -> bool {
        matches!(
            self.kind,
            Kind::SignedInt(_) | Kind::UnsignedInt(_) | Kind::Bool
        )
    }

    /// `@` or `#`.
    pub fn is_object(&self) -> bool {
        matches!(self.kind, Kind::ObjectRef | Kind::ClassRef)
    }

    /// `*` or `r*`.
    pub fn is_c_string(&self) -> bool {
        matches!(self.kind, Kind::ConstCString | Kind::MutableCString)
    }

    /// `[Nc]` or `[NC]`.
    pub fn is_char_array(&self) -> bool {
        match &self.kind {
            Kind::Array { element, .. } => matches!(
                element.kind,
                Kind::SignedInt(IntWidth::W8) | Kind::UnsignedInt(IntWidth::W8)
            ),
            _ => false,
        }
    }

    /// Anything compared as text: C strings and char arrays.
    pub fn is_string_like(&self) -> bool {
        self.is_c_string() || self.is_char_array()
    }

    /// `^v`
    pub fn is_void_pointer(&self) -> bool {
        matches!(&self.kind, Kind::Pointer(to) if to.kind == Kind::Void)
    }

    /// Struct, union or array.
    pub fn is_compound(&self) -> bool {
        matches!(
            self.kind,
            Kind::Array { .. } | Kind::Struct { .. } | Kind::Union { .. }
        )
    }

    /// Structural equality ignoring qualifiers at every level.
    pub fn same_shape(&self, other: &TypeDescriptor) -> bool {
        decoy_stack::ensure_sufficient_stack(|| match (&self.kind, &other.kind) {
            (Kind::Pointer(a), Kind::Pointer(b)) => a.same_shape(b),
            (
                Kind::Array {
                    element: a,
                    count: n,
                },
                Kind::Array {
                    element: b,
                    count: m,
                },
            ) => n == m && a.same_shape(b),
            (
                Kind::Struct {
                    name: a,
                    members: ma,
                },
                Kind::Struct {
                    name: b,
                    members: mb,
                },
            )
            | (
                Kind::Union {
                    name: a,
                    members: ma,
                },
                Kind::Union {
                    name: b,
                    members: mb,
                },
            ) => a == b && same_members(ma.as_deref(), mb.as_deref()),
            (a, b) => a == b,
        })
    }

    // === Layout ===

    pub fn layout(&self) -> Result<Layout, EncodingError> {
        layout::layout(self)
    }

    pub fn embedded_size(&self) -> Result<usize, EncodingError> {
        layout::embedded_size(self)
    }

    pub fn standalone_size(&self) -> Result<usize, EncodingError> {
        layout::standalone_size(self)
    }

    pub fn alignment(&self) -> Result<usize, EncodingError> {
        layout::alignment(self)
    }
}

fn same_members(a: Option<&[TypeDescriptor]>, b: Option<&[TypeDescriptor]>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y)),
        (None, None) => true,
        _ => false,
    }
}

impl From<Kind> for TypeDescriptor {
    fn from(kind: Kind) -> Self {
        TypeDescriptor::new(kind)
    }
}

// === Serialization ===

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        decoy_stack::ensure_sufficient_stack(|| {
            for c in self.qualifiers.encoding_chars() {
                write!(f, "{c}")?;
            }
            fmt::Display::fmt(&self.kind, f)
        })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::SignedInt(w) => write!(f, "{}", w.signed_char()),
            Kind::UnsignedInt(w) => write!(f, "{}", w.unsigned_char()),
            Kind::Float32 => f.write_str("f"),
            Kind::Float64 => f.write_str("d"),
            Kind::Bool => f.write_str("B"),
            Kind::Void => f.write_str("v"),
            Kind::Pointer(to) => write!(f, "^{to}"),
            // The `r` is written by the qualifier prefix.
            Kind::ConstCString | Kind::MutableCString => f.write_str("*"),
            Kind::ObjectRef => f.write_str("@"),
            Kind::ClassRef => f.write_str("#"),
            Kind::MethodRef => f.write_str(":"),
            Kind::Array { element, count } => write!(f, "[{count}{element}]"),
            Kind::Struct { name, members } => write_aggregate(f, ('{', '}'), name, members),
            Kind::Union { name, members } => write_aggregate(f, ('(', ')'), name, members),
            Kind::Bitfield(width) => write!(f, "b{width}"),
            Kind::Unknown => f.write_str("?"),
        }
    }
}

fn write_aggregate(
    f: &mut fmt::Formatter<'_>,
    (open, close): (char, char),
    name: &str,
    members: &Option<Vec<TypeDescriptor>>,
) -> fmt::Result {
    write!(f, "{open}{name}")?;
    if let Some(members) = members {
        f.write_str("=")?;
        for member in members {
            write!(f, "{member}")?;
        }
    }
    write!(f, "{close}")
}
