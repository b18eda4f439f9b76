//! Method signature strings.
//!
//! A method's full type string lists the return type followed by every
//! argument type, each optionally followed by a stack offset:
//! `v24@0:8@16` is `void (id self, SEL _cmd, id arg)`. The offsets are
//! historically unreliable and are skipped. The first two arguments are
//! always the receiver and the selector.

use std::fmt;

use smallvec::SmallVec;

use crate::{EncodingError, Scanner, TypeDescriptor};

/// Receiver and selector.
const IMPLICIT_ARGUMENTS: usize = 2;

/// Parsed method signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    return_type: TypeDescriptor,
    arguments: SmallVec<[TypeDescriptor; 4]>,
}

impl MethodSignature {
    /// Parse a full method type string.
    pub fn parse(input: &str) -> Result<Self, EncodingError> {
        let mut scanner = Scanner::new(input);
        let return_type = scanner
            .scan_return_type()
            .ok_or_else(|| EncodingError::malformed_signature(input, scanner.furthest()))?;

        let mut arguments = SmallVec::new();
        while !scanner.is_at_end() {
            let argument = scanner
                .scan_type()
                .ok_or_else(|| EncodingError::malformed_signature(input, scanner.furthest()))?;
            scanner.scan_offset();
            arguments.push(argument);
        }

        tracing::trace!(input, arguments = arguments.len(), "parsed method signature");
        Ok(MethodSignature {
            return_type,
            arguments,
        })
    }

    /// Signature built from explicit parts. `arguments` excludes the
    /// receiver and selector, which are added here.
    pub fn from_parts(
        return_type: TypeDescriptor,
        explicit: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Self {
        let mut arguments: SmallVec<[TypeDescriptor; 4]> = SmallVec::new();
        arguments.push(TypeDescriptor::new(crate::Kind::ObjectRef));
        arguments.push(TypeDescriptor::new(crate::Kind::MethodRef));
        arguments.extend(explicit);
        MethodSignature {
            return_type,
            arguments,
        }
    }

    pub fn return_type(&self) -> &TypeDescriptor {
        &self.return_type
    }

    /// Every argument, including receiver and selector.
    pub fn arguments(&self) -> &[TypeDescriptor] {
        &self.arguments
    }

    /// Arguments after the receiver and selector.
    pub fn explicit_arguments(&self) -> &[TypeDescriptor] {
        self.arguments.get(IMPLICIT_ARGUMENTS..).unwrap_or_default()
    }

    /// Number of explicit arguments.
    pub fn arity(&self) -> usize {
        self.explicit_arguments().len()
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.return_type)?;
        for argument in &self.arguments {
            write!(f, "{argument}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IntWidth, Kind};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_offsets_and_skips_them() {
        let sig = MethodSignature::parse("v24@0:8@16").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(sig.return_type().kind(), &Kind::Void);
        assert_eq!(sig.arguments().len(), 3);
        assert_eq!(sig.arity(), 1);
        assert_eq!(sig.explicit_arguments()[0].kind(), &Kind::ObjectRef);
        assert_eq!(sig.to_string(), "v@:@");
    }

    #[test]
    fn parses_without_offsets() {
        let sig = MethodSignature::parse("i@:qd").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            sig.explicit_arguments(),
            &[
                TypeDescriptor::signed(IntWidth::W64),
                TypeDescriptor::new(Kind::Float64),
            ]
        );
    }

    #[test]
    fn negative_offsets_and_qualifiers() {
        let sig = MethodSignature::parse("Vv16@0:4r*-8").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(sig.arity(), 1);
        assert_eq!(sig.explicit_arguments()[0].kind(), &Kind::ConstCString);
    }

    #[test]
    fn compound_arguments() {
        let sig = MethodSignature::parse("{CGPoint=dd}32@0:8{CGPoint=dd}16")
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(sig.return_type().standalone_size(), Ok(16));
        assert_eq!(sig.arity(), 1);
    }

    #[test]
    fn too_few_arguments_have_no_explicit_part() {
        let sig = MethodSignature::parse("v@").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(sig.arity(), 0);
    }

    #[test]
    fn from_parts_adds_receiver_and_selector() {
        let sig = MethodSignature::from_parts(
            TypeDescriptor::new(Kind::Void),
            [TypeDescriptor::new(Kind::ObjectRef)],
        );
        assert_eq!(sig, MethodSignature::parse("v@:@").unwrap_or_else(|e| panic!("{e}")));
    }

    #[test]
    fn malformed_signature_reports_position() {
        assert_eq!(
            MethodSignature::parse("v24@0x"),
            Err(EncodingError::MalformedSignature {
                input: "v24@0x".to_string(),
                position: 5,
            })
        );
        assert!(MethodSignature::parse("").is_err());
    }
}
