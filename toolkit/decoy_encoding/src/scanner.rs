//! Recursive-descent scanner for type descriptor strings.
//!
//! ```text
//! type       := qualifier* (simple | pointer | array | struct | union | bitfield)
//! qualifier  := 'r' | 'n' | 'N' | 'o' | 'O' | 'R' | 'V'
//! simple     := 'c' | 'i' | 's' | 'l' | 'q' | 'C' | 'I' | 'S' | 'L' | 'Q'
//!             | 'f' | 'd' | 'B' | 'v' | '*' | '@' | '#' | ':' | '?'
//! pointer    := '^' type
//! array      := '[' digit+ type ']'
//! struct     := '{' identifier ( '=' type* )? '}'
//! union      := '(' identifier ( '=' type* )? ')'
//! bitfield   := 'b' digit+
//! identifier := ( alnum | '_' | '?' )+
//! ```
//!
//! Every `scan_*` method starts at the cursor. On a match it advances past
//! the production and returns it; otherwise it returns `None` and leaves the
//! cursor where it was. `l`/`L` are read as 32-bit integers and `r*` as a
//! const C string.

use decoy_stack::ensure_sufficient_stack;

use crate::{EncodingError, IntWidth, Kind, Qualifiers, TypeDescriptor};

/// Cursor over a descriptor string.
#[derive(Clone, Debug)]
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    /// Furthest byte any production reached, for error positions.
    furthest: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::at(source, 0)
    }

    /// Scanner positioned at byte `pos` of `source`.
    pub fn at(source: &'a str, pos: usize) -> Self {
        Scanner {
            source,
            pos,
            furthest: pos,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn furthest(&self) -> usize {
        self.furthest
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Unconsumed input.
    pub fn rest(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or_default()
    }

    #[inline]
    fn current(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    #[inline]
    fn bump(&mut self) {
        self.pos += 1;
        self.furthest = self.furthest.max(self.pos);
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.current() == Some(byte) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Run `f`, rewinding the cursor if it does not match.
    fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.pos;
        let result = f(self);
        if result.is_none() {
            self.pos = start;
        }
        result
    }

    /// Run `f` and report how many bytes it consumed.
    pub fn measure<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<(T, usize)> {
        let start = self.pos;
        let value = self.attempt(f)?;
        Some((value, self.pos - start))
    }

    // === Lexical pieces ===

    /// One or more decimal digits.
    pub fn scan_number(&mut self) -> Option<usize> {
        self.attempt(|s| {
            let mut value: Option<usize> = None;
            while let Some(digit @ b'0'..=b'9') = s.current() {
                let d = usize::from(digit - b'0');
                value = Some(value.unwrap_or(0).checked_mul(10)?.checked_add(d)?);
                s.bump();
            }
            value
        })
    }

    /// An optional `-` followed by digits, as found after each type in a
    /// method signature.
    pub fn scan_offset(&mut self) -> Option<isize> {
        self.attempt(|s| {
            let negative = s.eat(b'-');
            let magnitude = isize::try_from(s.scan_number()?).ok()?;
            Some(if negative { -magnitude } else { magnitude })
        })
    }

    /// One or more qualifier characters.
    pub fn scan_qualifiers(&mut self) -> Option<Qualifiers> {
        let mut qualifiers = Qualifiers::empty();
        let mut any = false;
        while let Some(q) = self.current().and_then(Qualifiers::from_byte) {
            qualifiers |= q;
            any = true;
            self.bump();
        }
        any.then_some(qualifiers)
    }

    /// A struct or union name.
    pub fn scan_identifier(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while matches!(self.current(), Some(b) if b.is_ascii_alphanumeric() || b == b'_' || b == b'?')
        {
            self.bump();
        }
        if self.pos == start {
            return None;
        }
        self.source.get(start..self.pos)
    }

    // === Productions ===

    /// A single-character scalar, pointer-sized or unknown type.
    pub fn scan_simple_type(&mut self) -> Option<TypeDescriptor> {
        let kind = match self.current()? {
            b'c' => Kind::SignedInt(IntWidth::W8),
            b's' => Kind::SignedInt(IntWidth::W16),
            b'i' | b'l' => Kind::SignedInt(IntWidth::W32),
            b'q' => Kind::SignedInt(IntWidth::W64),
            b'C' => Kind::UnsignedInt(IntWidth::W8),
            b'S' => Kind::UnsignedInt(IntWidth::W16),
            b'I' | b'L' => Kind::UnsignedInt(IntWidth::W32),
            b'Q' => Kind::UnsignedInt(IntWidth::W64),
            b'f' => Kind::Float32,
            b'd' => Kind::Float64,
            b'B' => Kind::Bool,
            b'v' => Kind::Void,
            b'*' => Kind::MutableCString,
            b'@' => Kind::ObjectRef,
            b'#' => Kind::ClassRef,
            b':' => Kind::MethodRef,
            b'?' => Kind::Unknown,
            _ => return None,
        };
        self.bump();
        Some(TypeDescriptor::new(kind))
    }

    /// `^type`
    pub fn scan_pointer(&mut self) -> Option<TypeDescriptor> {
        ensure_sufficient_stack(|| {
            self.attempt(|s| {
                if !s.eat(b'^') {
                    return None;
                }
                let to = s.scan_type()?;
                Some(TypeDescriptor::pointer(to))
            })
        })
    }

    /// `[count type]`
    pub fn scan_array(&mut self) -> Option<TypeDescriptor> {
        ensure_sufficient_stack(|| {
            self.attempt(|s| {
                if !s.eat(b'[') {
                    return None;
                }
                let count = s.scan_number()?;
                let element = s.scan_type()?;
                if !s.eat(b']') {
                    return None;
                }
                Some(TypeDescriptor::array(element, count))
            })
        })
    }

    /// `{name=members}` or `{name}`
    pub fn scan_struct(&mut self) -> Option<TypeDescriptor> {
        let (name, members) = self.scan_aggregate(b'{', b'}')?;
        Some(TypeDescriptor::new(Kind::Struct { name, members }))
    }

    /// `(name=members)` or `(name)`
    pub fn scan_union(&mut self) -> Option<TypeDescriptor> {
        let (name, members) = self.scan_aggregate(b'(', b')')?;
        Some(TypeDescriptor::new(Kind::Union { name, members }))
    }

    fn scan_aggregate(
        &mut self,
        open: u8,
        close: u8,
    ) -> Option<(String, Option<Vec<TypeDescriptor>>)> {
        ensure_sufficient_stack(|| {
            self.attempt(|s| {
                if !s.eat(open) {
                    return None;
                }
                let name = s.scan_identifier()?.to_string();
                let members = if s.eat(b'=') {
                    let mut members = Vec::new();
                    while let Some(member) = s.scan_type() {
                        members.push(member);
                    }
                    Some(members)
                } else {
                    None
                };
                if !s.eat(close) {
                    return None;
                }
                Some((name, members))
            })
        })
    }

    /// `bN`
    pub fn scan_bitfield(&mut self) -> Option<TypeDescriptor> {
        self.attempt(|s| {
            if !s.eat(b'b') {
                return None;
            }
            let width = u32::try_from(s.scan_number()?).ok()?;
            Some(TypeDescriptor::new(Kind::Bitfield(width)))
        })
    }

    /// Qualifiers followed by any single type.
    pub fn scan_type(&mut self) -> Option<TypeDescriptor> {
        ensure_sufficient_stack(|| {
            self.attempt(|s| {
                let qualifiers = s.scan_qualifiers().unwrap_or_default();
                let desc = match s.current()? {
                    b'^' => s.scan_pointer(),
                    b'[' => s.scan_array(),
                    b'{' => s.scan_struct(),
                    b'(' => s.scan_union(),
                    b'b' => s.scan_bitfield(),
                    _ => s.scan_simple_type(),
                }?;
                Some(TypeDescriptor::with_qualifiers(desc.into_kind(), qualifiers))
            })
        })
    }

    /// The leading type of a method signature, skipping the frame size that
    /// may follow it.
    pub fn scan_return_type(&mut self) -> Option<TypeDescriptor> {
        self.attempt(|s| {
            let desc = s.scan_type()?;
            s.scan_offset();
            Some(desc)
        })
    }
}

/// Parse `input`, which must be exactly one type.
pub fn parse(input: &str) -> Result<TypeDescriptor, EncodingError> {
    let mut scanner = Scanner::new(input);
    let result = match scanner.scan_type() {
        Some(desc) if scanner.is_at_end() => Ok(desc),
        Some(_) => Err(EncodingError::malformed(input, scanner.position())),
        None => Err(EncodingError::malformed(input, scanner.furthest())),
    };
    tracing::trace!(input, ok = result.is_ok(), "parsed type descriptor");
    result
}

/// Parse one type starting at byte `at`, returning it with the number of
/// bytes consumed. Trailing input is left alone.
pub fn parse_prefix(input: &str, at: usize) -> Option<(TypeDescriptor, usize)> {
    Scanner::at(input, at).measure(Scanner::scan_type)
}
