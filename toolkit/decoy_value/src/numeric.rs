//! Numeric scalars and the usual arithmetic conversions.
//!
//! Two numeric operands are compared after converting both to a common
//! type, the way a C compiler would:
//!
//! 1. If either is `double`, both become `double`; else if either is
//!    `float`, both become `float`.
//! 2. Integers narrower than 32 bits (and `Bool`) promote to `int`.
//! 3. Same signedness: the wider type wins.
//! 4. Mixed signedness: the unsigned type wins if it is at least as wide as
//!    the signed one, otherwise the signed type wins.
//!
//! Case 4 converting a signed operand to unsigned is the classic source of
//! surprising results (`-1 < 1u` is false), so [`Promotion`] records it.

use std::cmp::Ordering;
use std::fmt;

use decoy_encoding::IntWidth;

/// A numeric scalar read out of a boxed value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Numeric {
    Signed(i64, IntWidth),
    Unsigned(u64, IntWidth),
    Bool(bool),
    F32(f32),
    F64(f64),
}

/// Common type both operands are converted to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommonType {
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl CommonType {
    pub const fn name(self) -> &'static str {
        match self {
            CommonType::I32 => "int",
            CommonType::U32 => "unsigned int",
            CommonType::I64 => "long long",
            CommonType::U64 => "unsigned long long",
            CommonType::F32 => "float",
            CommonType::F64 => "double",
        }
    }

    const fn integer(signed: bool, width: IntWidth) -> Self {
        match (signed, width) {
            (true, IntWidth::W64) => CommonType::I64,
            (false, IntWidth::W64) => CommonType::U64,
            (true, _) => CommonType::I32,
            (false, _) => CommonType::U32,
        }
    }
}

impl fmt::Display for CommonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of the usual arithmetic conversions for one operand pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Promotion {
    pub common: CommonType,
    /// A signed operand was converted to an unsigned common type.
    pub signed_to_unsigned: bool,
}

/// Integer operand after integer promotion: `(signed, width)`.
#[derive(Copy, Clone)]
struct Rank {
    signed: bool,
    width: IntWidth,
}

impl Numeric {
    /// Rank after integer promotion, `None` for floating operands.
    fn rank(self) -> Option<Rank> {
        let promoted = |signed, width: IntWidth| {
            if width < IntWidth::W32 {
                Rank {
                    signed: true,
                    width: IntWidth::W32,
                }
            } else {
                Rank { signed, width }
            }
        };
        match self {
            Numeric::Signed(_, w) => Some(promoted(true, w)),
            Numeric::Unsigned(_, w) => Some(promoted(false, w)),
            Numeric::Bool(_) => Some(promoted(true, IntWidth::W8)),
            Numeric::F32(_) | Numeric::F64(_) => None,
        }
    }

    pub fn is_integer(self) -> bool {
        self.rank().is_some()
    }

    /// Integer zero of any width, or `false`.
    pub fn is_integer_zero(self) -> bool {
        match self {
            Numeric::Signed(v, _) => v == 0,
            Numeric::Unsigned(v, _) => v == 0,
            Numeric::Bool(b) => !b,
            Numeric::F32(_) | Numeric::F64(_) => false,
        }
    }

    // === Conversions ===
    // Each follows C conversion semantics: integers wrap, floats truncate.

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap,
        reason = "C conversion semantics"
    )]
    fn to_i64(self) -> i64 {
        match self {
            Numeric::Signed(v, _) => v,
            Numeric::Unsigned(v, _) => v as i64,
            Numeric::Bool(b) => i64::from(b),
            Numeric::F32(v) => v as i64,
            Numeric::F64(v) => v as i64,
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "C conversion semantics"
    )]
    fn to_u64(self) -> u64 {
        match self {
            Numeric::Signed(v, _) => v as u64,
            Numeric::Unsigned(v, _) => v,
            Numeric::Bool(b) => u64::from(b),
            Numeric::F32(v) => v as u64,
            Numeric::F64(v) => v as u64,
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "C conversion semantics"
    )]
    fn to_i32(self) -> i32 {
        self.to_i64() as i32
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "C conversion semantics"
    )]
    fn to_u32(self) -> u32 {
        self.to_u64() as u32
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        reason = "C conversion semantics"
    )]
    fn to_f32(self) -> f32 {
        match self {
            Numeric::Signed(v, _) => v as f32,
            Numeric::Unsigned(v, _) => v as f32,
            Numeric::Bool(b) => f32::from(u8::from(b)),
            Numeric::F32(v) => v,
            Numeric::F64(v) => v as f32,
        }
    }

    /// The value as a `double`, as C would convert it.
    #[allow(clippy::cast_precision_loss, reason = "C conversion semantics")]
    pub fn to_f64(self) -> f64 {
        match self {
            Numeric::Signed(v, _) => v as f64,
            Numeric::Unsigned(v, _) => v as f64,
            Numeric::Bool(b) => f64::from(u8::from(b)),
            Numeric::F32(v) => f64::from(v),
            Numeric::F64(v) => v,
        }
    }

    /// Short type name for messages.
    pub fn type_name(self) -> &'static str {
        match self {
            Numeric::Signed(_, IntWidth::W8) => "char",
            Numeric::Signed(_, IntWidth::W16) => "short",
            Numeric::Signed(_, IntWidth::W32) => "int",
            Numeric::Signed(_, IntWidth::W64) => "long long",
            Numeric::Unsigned(_, IntWidth::W8) => "unsigned char",
            Numeric::Unsigned(_, IntWidth::W16) => "unsigned short",
            Numeric::Unsigned(_, IntWidth::W32) => "unsigned int",
            Numeric::Unsigned(_, IntWidth::W64) => "unsigned long long",
            Numeric::Bool(_) => "_Bool",
            Numeric::F32(_) => "float",
            Numeric::F64(_) => "double",
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Signed(v, _) => write!(f, "{v}"),
            Numeric::Unsigned(v, _) => write!(f, "{v}"),
            Numeric::Bool(b) => write!(f, "{b}"),
            Numeric::F32(v) => write!(f, "{v}"),
            Numeric::F64(v) => write!(f, "{v}"),
        }
    }
}

/// Apply the usual arithmetic conversions to `lhs` and `rhs`.
pub fn promote(lhs: Numeric, rhs: Numeric) -> Promotion {
    let floating = |common| Promotion {
        common,
        signed_to_unsigned: false,
    };
    if matches!(lhs, Numeric::F64(_)) || matches!(rhs, Numeric::F64(_)) {
        return floating(CommonType::F64);
    }
    if matches!(lhs, Numeric::F32(_)) || matches!(rhs, Numeric::F32(_)) {
        return floating(CommonType::F32);
    }

    let (Some(a), Some(b)) = (lhs.rank(), rhs.rank()) else {
        return floating(CommonType::F64);
    };

    if a.signed == b.signed {
        return Promotion {
            common: CommonType::integer(a.signed, a.width.max(b.width)),
            signed_to_unsigned: false,
        };
    }

    let (unsigned, signed) = if a.signed { (b, a) } else { (a, b) };
    if unsigned.width >= signed.width {
        Promotion {
            common: CommonType::integer(false, unsigned.width),
            signed_to_unsigned: true,
        }
    } else {
        Promotion {
            common: CommonType::integer(true, signed.width),
            signed_to_unsigned: false,
        }
    }
}

/// Compare `lhs` and `rhs` after converting both to `common`.
///
/// `None` only for unordered floating-point values (NaN).
pub fn compare_as(lhs: Numeric, rhs: Numeric, common: CommonType) -> Option<Ordering> {
    match common {
        CommonType::I32 => Some(lhs.to_i32().cmp(&rhs.to_i32())),
        CommonType::U32 => Some(lhs.to_u32().cmp(&rhs.to_u32())),
        CommonType::I64 => Some(lhs.to_i64().cmp(&rhs.to_i64())),
        CommonType::U64 => Some(lhs.to_u64().cmp(&rhs.to_u64())),
        CommonType::F32 => lhs.to_f32().partial_cmp(&rhs.to_f32()),
        CommonType::F64 => lhs.to_f64().partial_cmp(&rhs.to_f64()),
    }
}

#[cfg(test)]
mod tests;
