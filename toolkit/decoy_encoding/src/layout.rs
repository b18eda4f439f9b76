//! Size and alignment under the LP64 ABI.
//!
//! | kind                                     | size | align |
//! |------------------------------------------|------|-------|
//! | 8-bit ints, `Bool`                       | 1    | 1     |
//! | 16-bit ints                              | 2    | 2     |
//! | 32-bit ints, `Float32`                   | 4    | 4     |
//! | 64-bit ints, `Float64`                   | 8    | 8     |
//! | pointers, C strings, objects, classes, selectors | 8 | 8 |
//! | `Void`                                   | 0    | 1     |
//! | `Bitfield(w)`, w ≤ 32                    | 4    | 4     |
//! | `Bitfield(w)`, w ≤ 64                    | 8    | 8     |
//!
//! Composites use the least-compact placement: every member starts at an
//! offset rounded up to its own alignment and the total is rounded up to
//! the largest member alignment. Each bitfield occupies its own storage
//! unit. Sizes computed here are therefore never smaller than the
//! compiler's `sizeof`.
//!
//! A pointer's size never depends on its pointee, so `^?` and `^{opaque}`
//! are measurable even though `?` and `{opaque}` alone are not.

use decoy_stack::ensure_sufficient_stack;

use crate::{EncodingError, IntWidth, Kind, TypeDescriptor};

/// Pointer size and alignment on LP64.
const POINTER: Layout = Layout::scalar(8);

/// Size and alignment of a type, in bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    pub size: usize,
    pub align: usize,
}

impl Layout {
    pub const fn new(size: usize, align: usize) -> Self {
        Layout { size, align }
    }

    /// A scalar whose alignment equals its size.
    const fn scalar(size: usize) -> Self {
        Layout { size, align: size }
    }

    const fn int(width: IntWidth) -> Self {
        Layout::scalar(width.bytes())
    }
}

/// Size and alignment of `desc` as a member of a composite.
pub fn layout(desc: &TypeDescriptor) -> Result<Layout, EncodingError> {
    ensure_sufficient_stack(|| match desc.kind() {
        Kind::SignedInt(w) | Kind::UnsignedInt(w) => Ok(Layout::int(*w)),
        Kind::Bool => Ok(Layout::scalar(1)),
        Kind::Float32 => Ok(Layout::scalar(4)),
        Kind::Float64 => Ok(Layout::scalar(8)),
        Kind::Void => Ok(Layout::new(0, 1)),
        Kind::Pointer(_)
        | Kind::ConstCString
        | Kind::MutableCString
        | Kind::ObjectRef
        | Kind::ClassRef
        | Kind::MethodRef => Ok(POINTER),
        Kind::Bitfield(width) => match width {
            0..=32 => Ok(Layout::scalar(4)),
            33..=64 => Ok(Layout::scalar(8)),
            _ => Err(EncodingError::invalid_type(
                desc,
                "bitfields wider than 64 bits are not supported",
            )),
        },
        Kind::Array { element, count } => {
            let element = layout(element)?;
            let size = element
                .size
                .checked_mul(*count)
                .ok_or_else(|| EncodingError::invalid_type(desc, "array size overflows"))?;
            Ok(Layout::new(size, element.align))
        }
        Kind::Struct { members, .. } => {
            let members = members
                .as_deref()
                .ok_or_else(|| EncodingError::invalid_type(desc, "struct has no member list"))?;
            struct_layout(desc, members)
        }
        Kind::Union { members, .. } => {
            let members = members
                .as_deref()
                .ok_or_else(|| EncodingError::invalid_type(desc, "union has no member list"))?;
            union_layout(desc, members)
        }
        Kind::Unknown => Err(EncodingError::invalid_type(
            desc,
            "unknown types have no size",
        )),
    })
}

fn struct_layout(desc: &TypeDescriptor, members: &[TypeDescriptor]) -> Result<Layout, EncodingError> {
    let overflow = || EncodingError::invalid_type(desc, "struct size overflows");
    let mut offset: usize = 0;
    let mut align = 1;
    for member in members {
        let member = layout(member)?;
        offset = offset
            .checked_next_multiple_of(member.align)
            .and_then(|o| o.checked_add(member.size))
            .ok_or_else(overflow)?;
        align = align.max(member.align);
    }
    let size = offset.checked_next_multiple_of(align).ok_or_else(overflow)?;
    Ok(Layout::new(size, align))
}

fn union_layout(desc: &TypeDescriptor, members: &[TypeDescriptor]) -> Result<Layout, EncodingError> {
    let mut size: usize = 0;
    let mut align = 1;
    for member in members {
        let member = layout(member)?;
        size = size.max(member.size);
        align = align.max(member.align);
    }
    let size = size
        .checked_next_multiple_of(align)
        .ok_or_else(|| EncodingError::invalid_type(desc, "union size overflows"))?;
    Ok(Layout::new(size, align))
}

/// Bytes `desc` occupies inside a struct, union or array.
pub fn embedded_size(desc: &TypeDescriptor) -> Result<usize, EncodingError> {
    layout(desc).map(|l| l.size)
}

/// Minimum buffer size for a standalone value of type `desc`.
///
/// Equal to [`embedded_size`] on LP64.
pub fn standalone_size(desc: &TypeDescriptor) -> Result<usize, EncodingError> {
    embedded_size(desc)
}

/// Required alignment of `desc`.
pub fn alignment(desc: &TypeDescriptor) -> Result<usize, EncodingError> {
    layout(desc).map(|l| l.align)
}
