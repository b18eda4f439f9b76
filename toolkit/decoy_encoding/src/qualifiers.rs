//! Type qualifiers.
//!
//! Qualifiers prefix a type in method signatures (`r*` is `const char *`,
//! `n@` is an `in` object argument). They carry no layout information and
//! are ignored by size computation and value comparison.

use bitflags::bitflags;

bitflags! {
    /// Set of qualifiers attached to a descriptor.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Qualifiers: u8 {
        /// `r`
        const CONST = 1 << 0;
        /// `n`
        const IN = 1 << 1;
        /// `N`
        const INOUT = 1 << 2;
        /// `o`
        const OUT = 1 << 3;
        /// `O`
        const BYCOPY = 1 << 4;
        /// `R`
        const BYREF = 1 << 5;
        /// `V`
        const ONEWAY = 1 << 6;
    }
}

/// Encoding characters in canonical serialization order.
const TABLE: [(u8, Qualifiers); 7] = [
    (b'r', Qualifiers::CONST),
    (b'n', Qualifiers::IN),
    (b'N', Qualifiers::INOUT),
    (b'o', Qualifiers::OUT),
    (b'O', Qualifiers::BYCOPY),
    (b'R', Qualifiers::BYREF),
    (b'V', Qualifiers::ONEWAY),
];

impl Qualifiers {
    /// The qualifier spelled by `byte`, if any.
    pub fn from_byte(byte: u8) -> Option<Qualifiers> {
        TABLE.iter().find(|(b, _)| *b == byte).map(|(_, q)| *q)
    }

    /// Encoding characters for every set flag, in canonical order.
    pub fn encoding_chars(self) -> impl Iterator<Item = char> {
        TABLE
            .into_iter()
            .filter(move |(_, q)| self.contains(*q))
            .map(|(b, _)| char::from(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_qualifier_byte_is_recognized() {
        for byte in *b"rnNoORV" {
            assert!(Qualifiers::from_byte(byte).is_some(), "{}", byte as char);
        }
        assert_eq!(Qualifiers::from_byte(b'i'), None);
    }

    #[test]
    fn chars_use_canonical_order() {
        let q = Qualifiers::ONEWAY | Qualifiers::CONST | Qualifiers::OUT;
        assert_eq!(q.encoding_chars().collect::<String>(), "roV");
    }
}
